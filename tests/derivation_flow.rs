//! Database-backed tests for raceclass generation and bib assignment.
//!
//! These need a Docker daemon for the PostgreSQL container:
//! `cargo test -- --ignored`

mod common;

use std::time::Duration;

use sqlx::PgPool;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use event_service::{
    config::RaceclassesConfig,
    db::repositories::EventRepository,
    handlers::{
        competition_formats::CompetitionFormatRequest, contestants::ContestantRequest,
        events::EventRequest, raceclasses::RaceclassRequest,
    },
    models::{Contestant, ContestantFilter, Event, Raceclass},
    services::{CompetitionFormatService, ContestantService, EventService, RaceclassService},
};

async fn event_with_format(pool: &PgPool, max_in_raceclass: Option<i32>) -> Event {
    let format_name = format!("Interval Start {}", Uuid::new_v4());
    assert_ok!(
        CompetitionFormatService::create(
            pool,
            CompetitionFormatRequest {
                name: format_name.clone(),
                starting_order: "Group starting order".to_string(),
                start_procedure: "Interval start".to_string(),
                max_no_of_contestants_in_raceclass: max_in_raceclass,
                max_no_of_contestants_in_race: None,
                time_between_groups: None,
                intervals: None,
            },
        )
        .await
    );

    EventService::create(
        pool,
        EventRequest {
            name: "Ski NM".to_string(),
            date_of_event: None,
            time_of_event: None,
            timezone: None,
            competition_format: Some(format_name),
            organiser: Some("Lyn Ski".to_string()),
            webpage: None,
            information: None,
        },
    )
    .await
    .expect("event created")
}

fn contestant(first_name: &str, last_name: &str, ageclass: &str) -> ContestantRequest {
    ContestantRequest {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        birth_date: None,
        gender: None,
        ageclass: ageclass.to_string(),
        region: None,
        club: None,
        team: None,
        email: None,
        minidrett_id: None,
        registration_date_time: None,
        distance: None,
        seeding_points: None,
        bib: None,
    }
}

fn raceclass(name: &str, group: i32, order: i32, ageclass: &str) -> RaceclassRequest {
    RaceclassRequest {
        name: name.to_string(),
        group,
        order,
        ageclasses: vec![ageclass.to_string()],
        distance: None,
        ranking: None,
        seeding: None,
    }
}

async fn register(pool: &PgPool, event_id: &Uuid, entries: &[(&str, &str, &str)]) {
    for (first_name, last_name, ageclass) in entries {
        ContestantService::create(pool, event_id, contestant(first_name, last_name, ageclass))
            .await
            .expect("contestant created");
    }
}

async fn contestants(pool: &PgPool, event_id: &Uuid) -> Vec<Contestant> {
    ContestantService::list(pool, event_id, ContestantFilter::default())
        .await
        .expect("contestants listed")
}

async fn generate(pool: &PgPool, event_id: &Uuid) -> event_service::AppResult<Vec<Raceclass>> {
    RaceclassService::generate(pool, event_id, &RaceclassesConfig::default()).await
}

fn bib_of(contestants: &[Contestant], last_name: &str) -> i32 {
    contestants
        .iter()
        .find(|c| c.last_name == last_name)
        .and_then(|c| c.bib)
        .expect("contestant has a bib")
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_generate_then_assign_bibs() {
    let pool = common::database().await;
    let event = event_with_format(&pool, Some(10)).await;

    assert_ok!(RaceclassService::create(&pool, &event.id, raceclass("J15", 1, 1, "J15")).await);
    assert_ok!(RaceclassService::create(&pool, &event.id, raceclass("G15", 1, 2, "G15")).await);
    register(
        &pool,
        &event.id,
        &[
            ("Ola", "Strand", "G15"),
            ("Kari", "Dahl", "J15"),
            ("Per", "Berg", "G15"),
            ("Ingrid", "Aas", "J15"),
            ("Sofie", "Cappelen", "J15"),
        ],
    )
    .await;

    let format_name = event.competition_format.clone().unwrap();
    let format = CompetitionFormatService::get_by_name(&pool, &format_name).await.unwrap();
    assert_eq!(format.max_no_of_contestants_in_raceclass, Some(10));

    let raceclasses = generate(&pool, &event.id).await.unwrap();
    let counts: Vec<(&str, i32)> = raceclasses
        .iter()
        .map(|r| (r.name.as_str(), r.no_of_contestants))
        .collect();
    assert_eq!(counts, vec![("J15", 3), ("G15", 2)]);

    let assigned = ContestantService::assign_bibs(&pool, &event.id, 1).await.unwrap();
    let bibs: Vec<(String, Option<i32>)> = assigned
        .iter()
        .map(|c| (c.last_name.clone(), c.bib))
        .collect();
    assert_eq!(
        bibs,
        vec![
            ("Aas".to_string(), Some(1)),
            ("Cappelen".to_string(), Some(2)),
            ("Dahl".to_string(), Some(3)),
            ("Berg".to_string(), Some(4)),
            ("Strand".to_string(), Some(5)),
        ]
    );
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_runs_are_idempotent() {
    let pool = common::database().await;
    let event = event_with_format(&pool, None).await;
    register(
        &pool,
        &event.id,
        &[
            ("Kari", "Dahl", "Jenter 15 år"),
            ("Per", "Berg", "Gutter 15 år"),
            ("Ola", "Aas", "Gutter 15 år"),
        ],
    )
    .await;

    let first = generate(&pool, &event.id).await.unwrap();
    let second = generate(&pool, &event.id).await.unwrap();

    let shape = |raceclasses: &[Raceclass]| {
        raceclasses
            .iter()
            .map(|r| (r.id, r.name.clone(), r.group, r.order, r.no_of_contestants))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&first), shape(&second));
    assert_eq!(
        first.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        vec!["G15", "J15"]
    );

    let first = ContestantService::assign_bibs(&pool, &event.id, 1).await.unwrap();
    let second = ContestantService::assign_bibs(&pool, &event.id, 1).await.unwrap();
    let bibs = |contestants: &[Contestant]| {
        contestants
            .iter()
            .map(|c| (c.id, c.bib))
            .collect::<Vec<_>>()
    };
    assert_eq!(bibs(&first), bibs(&second));
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_capacity_failure_persists_nothing() {
    let pool = common::database().await;
    let event = event_with_format(&pool, Some(10)).await;

    let names: Vec<String> = (0..11).map(|i| format!("Etternavn{:02}", i)).collect();
    let entries: Vec<(&str, &str, &str)> = names
        .iter()
        .map(|last_name| ("Kari", last_name.as_str(), "J15"))
        .collect();
    register(&pool, &event.id, &entries).await;

    let err = assert_err!(generate(&pool, &event.id).await);
    assert_eq!(err.error_code(), "CAPACITY_EXCEEDED");
    assert!(err.to_string().contains("J15"));

    let raceclasses = RaceclassService::list(&pool, &event.id).await.unwrap();
    assert!(raceclasses.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_assign_without_raceclasses_mutates_nothing() {
    let pool = common::database().await;
    let event = event_with_format(&pool, None).await;
    register(&pool, &event.id, &[("Kari", "Dahl", "J15")]).await;

    let err = assert_err!(ContestantService::assign_bibs(&pool, &event.id, 1).await);
    assert_eq!(err.error_code(), "PREREQUISITE_MISSING");

    let contestants = contestants(&pool, &event.id).await;
    assert!(contestants.iter().all(|c| c.bib.is_none()));
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_reassignment_swaps_bibs_between_contestants() {
    let pool = common::database().await;
    let event = event_with_format(&pool, None).await;
    register(
        &pool,
        &event.id,
        &[("Kari", "Dahl", "J15"), ("Ingrid", "Aas", "J15"), ("Per", "Berg", "G15")],
    )
    .await;

    assert_ok!(generate(&pool, &event.id).await);
    let before = ContestantService::assign_bibs(&pool, &event.id, 1).await.unwrap();
    assert_eq!(bib_of(&before, "Berg"), 1);
    assert_eq!(bib_of(&before, "Aas"), 2);
    assert_eq!(bib_of(&before, "Dahl"), 3);

    // Put J15 first so every bib moves to another contestant
    let raceclasses = RaceclassService::list(&pool, &event.id).await.unwrap();
    for existing in &raceclasses {
        let order = if existing.name == "J15" { 1 } else { 2 };
        let payload = raceclass(&existing.name, existing.group, order, &existing.ageclasses[0]);
        assert_ok!(RaceclassService::update(&pool, &event.id, &existing.id, payload).await);
    }

    let after = ContestantService::assign_bibs(&pool, &event.id, 1).await.unwrap();
    assert_eq!(bib_of(&after, "Aas"), 1);
    assert_eq!(bib_of(&after, "Dahl"), 2);
    assert_eq!(bib_of(&after, "Berg"), 3);

    let stored = contestants(&pool, &event.id).await;
    assert_eq!(
        stored.iter().map(|c| c.last_name.as_str()).collect::<Vec<_>>(),
        vec!["Aas", "Dahl", "Berg"]
    );
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_reassignment_with_start_bib() {
    let pool = common::database().await;
    let event = event_with_format(&pool, None).await;
    register(&pool, &event.id, &[("Kari", "Dahl", "J15"), ("Ingrid", "Aas", "J15")]).await;

    assert_ok!(generate(&pool, &event.id).await);
    assert_ok!(ContestantService::assign_bibs(&pool, &event.id, 1).await);

    let after = ContestantService::assign_bibs(&pool, &event.id, 100).await.unwrap();
    assert_eq!(bib_of(&after, "Aas"), 100);
    assert_eq!(bib_of(&after, "Dahl"), 101);
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_search_matches_first_and_last_name() {
    let pool = common::database().await;
    let event = event_with_format(&pool, None).await;
    register(
        &pool,
        &event.id,
        &[("Kari", "Dahl", "J15"), ("Ingrid", "Aas", "J15"), ("Per", "Karlsen", "G15")],
    )
    .await;

    let found = ContestantService::search(&pool, &event.id, "  kar ").await.unwrap();
    let mut names: Vec<&str> = found.iter().map(|c| c.last_name.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["Dahl", "Karlsen"]);

    let found = ContestantService::search(&pool, &event.id, "Ingrid Aas").await.unwrap();
    assert_eq!(found.len(), 1);

    let found = ContestantService::search(&pool, &event.id, "%").await.unwrap();
    assert!(found.is_empty());

    let err = assert_err!(ContestantService::search(&pool, &Uuid::new_v4(), "Kari").await);
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_raceclass_counts_follow_contestants() {
    let pool = common::database().await;
    let event = event_with_format(&pool, None).await;

    let created = RaceclassService::create(&pool, &event.id, raceclass("J15", 1, 1, "J15"))
        .await
        .unwrap();
    assert_eq!(created.no_of_contestants, 0);

    register(&pool, &event.id, &[("Kari", "Dahl", "J15"), ("Ingrid", "Aas", "J15")]).await;

    let fetched = RaceclassService::get(&pool, &event.id, &created.id).await.unwrap();
    assert_eq!(fetched.no_of_contestants, 2);

    let err = assert_err!(
        RaceclassService::create(&pool, &event.id, raceclass("J15", 1, 2, "J16")).await
    );
    assert_eq!(err.error_code(), "CONFLICT");
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_generation_requires_a_registered_format() {
    let pool = common::database().await;
    let event = EventService::create(
        &pool,
        EventRequest {
            name: "Klubbrenn".to_string(),
            date_of_event: None,
            time_of_event: None,
            timezone: None,
            competition_format: None,
            organiser: None,
            webpage: None,
            information: None,
        },
    )
    .await
    .unwrap();
    register(&pool, &event.id, &[("Kari", "Dahl", "J15")]).await;

    let err = assert_err!(generate(&pool, &event.id).await);
    assert_eq!(err.error_code(), "PREREQUISITE_MISSING");
    assert_eq!(event.timezone.as_deref(), Some("Europe/Oslo"));
}

#[tokio::test]
#[ignore = "requires Docker for testcontainers"]
async fn test_contestant_writes_wait_for_the_event_lock() {
    let pool = common::database().await;
    let event = event_with_format(&pool, None).await;

    // Hold the lock a derivation run would hold
    let mut tx = pool.begin().await.unwrap();
    assert_ok!(EventRepository::lock_for_update(&mut *tx, &event.id).await);

    let writer = tokio::spawn({
        let pool = pool.clone();
        let event_id = event.id;
        async move {
            ContestantService::create(&pool, &event_id, contestant("Kari", "Dahl", "J15")).await
        }
    });

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!writer.is_finished());
    assert!(contestants(&pool, &event.id).await.is_empty());

    tx.commit().await.unwrap();
    let created = writer.await.unwrap().unwrap();
    assert_eq!(created.last_name, "Dahl");
}

//! Raceclass service
//!
//! Direct CRUD on raceclasses plus the generation command. Every write takes
//! the event row lock first so it cannot interleave with a generation run or
//! a bib assignment.

use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::RaceclassesConfig,
    constants::MAX_AGECLASS_LENGTH,
    db::repositories::{
        CompetitionFormatRepository, ContestantRepository, EventRepository, RaceclassRepository,
    },
    engine,
    error::{AppError, AppResult, DomainError},
    handlers::raceclasses::request::RaceclassRequest,
    models::{CompetitionFormat, ContestantFilter, Event, Raceclass, RaceclassFields},
    services::EventService,
    utils::{non_blank, optional_text, required_text},
};

/// Raceclass service for business logic
pub struct RaceclassService;

impl RaceclassService {
    /// Replace the raceclass set of an event with one derived from its contestants.
    ///
    /// Runs in one transaction: either the complete new set is stored or the
    /// previous set is left untouched.
    pub async fn generate(
        pool: &PgPool,
        event_id: &Uuid,
        config: &RaceclassesConfig,
    ) -> AppResult<Vec<Raceclass>> {
        let mut tx = pool.begin().await?;

        let event = Self::lock_event(&mut tx, event_id).await?;
        let format = Self::competition_format(&mut tx, &event).await?;

        let contestants =
            ContestantRepository::list(&mut *tx, event_id, &ContestantFilter::default()).await?;
        let existing = RaceclassRepository::list_by_event(&mut *tx, event_id).await?;

        let plans = engine::generate_raceclasses(
            &contestants,
            &existing,
            format.capacity_limits(),
            config,
        )
        .inspect_err(|e| {
            warn!(event_id = %event_id, code = e.error_code(), error = %e, "Raceclass generation rejected");
        })?;

        let raceclasses = RaceclassRepository::replace_all(&mut tx, event_id, &plans).await?;
        tx.commit().await?;

        info!(
            event_id = %event_id,
            format = %format.name,
            contestants = contestants.len(),
            raceclasses = raceclasses.len(),
            reused = plans.iter().filter(|p| p.id.is_some()).count(),
            "Raceclasses generated"
        );

        Ok(raceclasses)
    }

    /// Create a raceclass
    pub async fn create(
        pool: &PgPool,
        event_id: &Uuid,
        payload: RaceclassRequest,
    ) -> AppResult<Raceclass> {
        let fields = Self::fields(payload)?;

        let mut tx = pool.begin().await?;
        Self::lock_event(&mut tx, event_id).await?;
        Self::ensure_unclaimed(&mut tx, event_id, &fields, None).await?;

        let raceclass = RaceclassRepository::create(&mut *tx, event_id, &fields).await?;
        tx.commit().await?;

        info!(event_id = %event_id, raceclass_id = %raceclass.id, name = %raceclass.name, "Raceclass created");
        Ok(raceclass)
    }

    /// Get raceclass by ID
    pub async fn get(pool: &PgPool, event_id: &Uuid, id: &Uuid) -> AppResult<Raceclass> {
        RaceclassRepository::find_by_id(pool, event_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Raceclass not found".to_string()))
    }

    /// List raceclasses of an event ordered by group, order and name
    pub async fn list(pool: &PgPool, event_id: &Uuid) -> AppResult<Vec<Raceclass>> {
        EventService::ensure_exists(pool, event_id).await?;
        RaceclassRepository::list_by_event(pool, event_id).await
    }

    /// Replace a raceclass, keeping its contestant count
    pub async fn update(
        pool: &PgPool,
        event_id: &Uuid,
        id: &Uuid,
        payload: RaceclassRequest,
    ) -> AppResult<Raceclass> {
        let fields = Self::fields(payload)?;

        let mut tx = pool.begin().await?;
        Self::lock_event(&mut tx, event_id).await?;
        Self::ensure_unclaimed(&mut tx, event_id, &fields, Some(id)).await?;

        let raceclass = RaceclassRepository::update(&mut *tx, event_id, id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound("Raceclass not found".to_string()))?;
        tx.commit().await?;

        info!(event_id = %event_id, raceclass_id = %id, "Raceclass updated");
        Ok(raceclass)
    }

    /// Delete a raceclass
    pub async fn delete(pool: &PgPool, event_id: &Uuid, id: &Uuid) -> AppResult<()> {
        let mut tx = pool.begin().await?;
        Self::lock_event(&mut tx, event_id).await?;

        if !RaceclassRepository::delete(&mut *tx, event_id, id).await? {
            return Err(AppError::NotFound("Raceclass not found".to_string()));
        }
        tx.commit().await?;

        info!(event_id = %event_id, raceclass_id = %id, "Raceclass deleted");
        Ok(())
    }

    /// Delete every raceclass of an event
    pub async fn delete_all(pool: &PgPool, event_id: &Uuid) -> AppResult<u64> {
        let mut tx = pool.begin().await?;
        Self::lock_event(&mut tx, event_id).await?;

        let deleted = RaceclassRepository::delete_all(&mut *tx, event_id).await?;
        tx.commit().await?;

        info!(event_id = %event_id, deleted, "Raceclasses deleted");
        Ok(deleted)
    }

    /// Normalize a raceclass request into the stored values
    pub fn fields(payload: RaceclassRequest) -> AppResult<RaceclassFields> {
        let mut ageclasses: Vec<String> = Vec::with_capacity(payload.ageclasses.len());
        for ageclass in &payload.ageclasses {
            let ageclass = non_blank(ageclass)
                .ok_or_else(|| AppError::Validation("ageclasses must not contain blank entries".to_string()))?;
            if ageclass.chars().count() as u64 > MAX_AGECLASS_LENGTH {
                return Err(AppError::Validation(format!(
                    "ageclass '{}' is longer than {} characters",
                    ageclass, MAX_AGECLASS_LENGTH
                )));
            }
            if !ageclasses.contains(&ageclass) {
                ageclasses.push(ageclass);
            }
        }

        if ageclasses.is_empty() {
            return Err(AppError::Validation("ageclasses must not be empty".to_string()));
        }

        Ok(RaceclassFields {
            name: required_text("name", &payload.name)?,
            group: payload.group,
            order: payload.order,
            ageclasses,
            distance: optional_text(payload.distance),
            ranking: payload.ranking.unwrap_or(true),
            seeding: payload.seeding.unwrap_or(false),
        })
    }

    async fn lock_event(conn: &mut PgConnection, event_id: &Uuid) -> AppResult<Event> {
        EventRepository::lock_for_update(conn, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))
    }

    /// The registered format the event refers to
    async fn competition_format(
        conn: &mut PgConnection,
        event: &Event,
    ) -> AppResult<CompetitionFormat> {
        let name = event.competition_format.as_deref().ok_or_else(|| {
            DomainError::PrerequisiteMissing(format!(
                "event '{}' has no competition format",
                event.name
            ))
        })?;

        let format = CompetitionFormatRepository::find_by_name(conn, name)
            .await?
            .ok_or_else(|| {
                DomainError::PrerequisiteMissing(format!(
                    "competition format '{}' of event '{}' is not registered",
                    name, event.name
                ))
            })?;

        Ok(format)
    }

    /// Raceclass names and ageclasses are both unique within an event
    async fn ensure_unclaimed(
        conn: &mut PgConnection,
        event_id: &Uuid,
        fields: &RaceclassFields,
        exclude: Option<&Uuid>,
    ) -> AppResult<()> {
        if RaceclassRepository::name_taken(&mut *conn, event_id, &fields.name, exclude).await? {
            return Err(AppError::Conflict(format!(
                "Raceclass '{}' already exists in this event",
                fields.name
            )));
        }

        let claiming =
            RaceclassRepository::find_claiming(conn, event_id, &fields.ageclasses, exclude).await?;

        if let Some(other) = claiming.first() {
            let ageclass = fields
                .ageclasses
                .iter()
                .find(|a| other.covers(a))
                .map(String::as_str)
                .unwrap_or_default();

            return Err(AppError::Conflict(format!(
                "Ageclass '{}' already belongs to raceclass '{}'",
                ageclass, other.name
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ageclasses: &[&str]) -> RaceclassRequest {
        RaceclassRequest {
            name: "J15".to_string(),
            group: 1,
            order: 1,
            ageclasses: ageclasses.iter().map(|a| a.to_string()).collect(),
            distance: Some(" 5 km ".to_string()),
            ranking: None,
            seeding: None,
        }
    }

    #[test]
    fn test_fields_trim_and_default() {
        let fields = RaceclassService::fields(request(&[" J 15 år", "J 16 år ", "J 15 år"])).unwrap();

        assert_eq!(fields.ageclasses, vec!["J 15 år", "J 16 år"]);
        assert_eq!(fields.distance.as_deref(), Some("5 km"));
        assert!(fields.ranking);
        assert!(!fields.seeding);
    }

    #[test]
    fn test_blank_ageclass_is_rejected() {
        let err = RaceclassService::fields(request(&["J 15 år", "  "])).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err = RaceclassService::fields(request(&[])).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut payload = request(&["G 15 år"]);
        payload.name = " ".to_string();

        assert!(RaceclassService::fields(payload).is_err());
    }
}

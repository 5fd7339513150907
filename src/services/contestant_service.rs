//! Contestant service
//!
//! Contestant CRUD, name search and the bib assignment command. Writes take
//! the event row lock so none can interleave with a bib assignment.

use sqlx::{PgConnection, PgPool};
use tracing::{info, warn};
use uuid::Uuid;
use validator::ValidateEmail;

use crate::{
    db::repositories::{ContestantRepository, EventRepository, RaceclassRepository},
    engine,
    error::{AppError, AppResult, DomainError},
    handlers::contestants::request::ContestantRequest,
    models::{Contestant, ContestantFields, ContestantFilter},
    services::EventService,
    utils::{non_blank, optional_text, required_text},
};

/// Contestant service for business logic
pub struct ContestantService;

impl ContestantService {
    /// Hand out bibs to every contestant of the event, starting at `start_bib`.
    ///
    /// All previous bibs are overwritten. The new assignment is written in one
    /// statement inside the transaction holding the event lock, so a rejected
    /// run leaves every contestant untouched.
    pub async fn assign_bibs(
        pool: &PgPool,
        event_id: &Uuid,
        start_bib: i32,
    ) -> AppResult<Vec<Contestant>> {
        let mut tx = pool.begin().await?;
        Self::lock_event(&mut tx, event_id).await?;

        let raceclasses = RaceclassRepository::list_by_event(&mut *tx, event_id).await?;
        let contestants =
            ContestantRepository::list(&mut *tx, event_id, &ContestantFilter::default()).await?;

        let assignments = engine::assign_bibs(&raceclasses, &contestants, start_bib).inspect_err(|e| {
            warn!(event_id = %event_id, code = e.error_code(), error = %e, "Bib assignment rejected");
        })?;

        let updated = ContestantRepository::assign_bibs(&mut *tx, event_id, &assignments).await?;
        let contestants =
            ContestantRepository::list(&mut *tx, event_id, &ContestantFilter::default()).await?;
        tx.commit().await?;

        info!(
            event_id = %event_id,
            start_bib,
            contestants = updated,
            raceclasses = raceclasses.len(),
            "Bibs assigned"
        );

        Ok(contestants)
    }

    /// Create a contestant
    pub async fn create(
        pool: &PgPool,
        event_id: &Uuid,
        payload: ContestantRequest,
    ) -> AppResult<Contestant> {
        let fields = Self::fields(payload)?;

        let mut tx = pool.begin().await?;
        Self::lock_event(&mut tx, event_id).await?;
        Self::ensure_bib_free(&mut tx, event_id, &fields, None).await?;

        let contestant = ContestantRepository::create(&mut *tx, event_id, &fields).await?;
        tx.commit().await?;

        info!(event_id = %event_id, contestant_id = %contestant.id, ageclass = %contestant.ageclass, "Contestant created");
        Ok(contestant)
    }

    /// Get contestant by ID
    pub async fn get(pool: &PgPool, event_id: &Uuid, id: &Uuid) -> AppResult<Contestant> {
        ContestantRepository::find_by_id(pool, event_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contestant not found".to_string()))
    }

    /// List contestants of an event, bib holders first in bib order
    pub async fn list(
        pool: &PgPool,
        event_id: &Uuid,
        filter: ContestantFilter,
    ) -> AppResult<Vec<Contestant>> {
        EventService::ensure_exists(pool, event_id).await?;

        let filter = ContestantFilter {
            ageclass: filter.ageclass.as_deref().and_then(non_blank),
            raceclass: filter.raceclass.as_deref().and_then(non_blank),
            bib: filter.bib,
        };
        ContestantRepository::list(pool, event_id, &filter).await
    }

    /// Find contestants of an event by first or last name
    pub async fn search(pool: &PgPool, event_id: &Uuid, name: &str) -> AppResult<Vec<Contestant>> {
        let name = non_blank(name)
            .ok_or_else(|| AppError::Validation("name must not be blank".to_string()))?;

        EventService::ensure_exists(pool, event_id).await?;
        ContestantRepository::search(pool, event_id, &name).await
    }

    /// Replace a contestant
    pub async fn update(
        pool: &PgPool,
        event_id: &Uuid,
        id: &Uuid,
        payload: ContestantRequest,
    ) -> AppResult<Contestant> {
        let fields = Self::fields(payload)?;

        let mut tx = pool.begin().await?;
        Self::lock_event(&mut tx, event_id).await?;
        Self::ensure_bib_free(&mut tx, event_id, &fields, Some(id)).await?;

        let contestant = ContestantRepository::update(&mut *tx, event_id, id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound("Contestant not found".to_string()))?;
        tx.commit().await?;

        info!(event_id = %event_id, contestant_id = %id, "Contestant updated");
        Ok(contestant)
    }

    /// Delete a contestant
    pub async fn delete(pool: &PgPool, event_id: &Uuid, id: &Uuid) -> AppResult<()> {
        let mut tx = pool.begin().await?;
        Self::lock_event(&mut tx, event_id).await?;

        if !ContestantRepository::delete(&mut *tx, event_id, id).await? {
            return Err(AppError::NotFound("Contestant not found".to_string()));
        }
        tx.commit().await?;

        info!(event_id = %event_id, contestant_id = %id, "Contestant deleted");
        Ok(())
    }

    /// Delete every contestant of an event
    pub async fn delete_all(pool: &PgPool, event_id: &Uuid) -> AppResult<u64> {
        let mut tx = pool.begin().await?;
        Self::lock_event(&mut tx, event_id).await?;

        let deleted = ContestantRepository::delete_all(&mut *tx, event_id).await?;
        tx.commit().await?;

        info!(event_id = %event_id, deleted, "Contestants deleted");
        Ok(deleted)
    }

    /// Normalize a contestant request into the stored values
    pub fn fields(payload: ContestantRequest) -> AppResult<ContestantFields> {
        let first_name = required_text("first_name", &payload.first_name)?;
        let last_name = required_text("last_name", &payload.last_name)?;

        let ageclass = non_blank(&payload.ageclass).ok_or_else(|| DomainError::InvalidContestant {
            contestant: format!("{} {}", first_name, last_name),
            message: "ageclass must not be empty".to_string(),
        })?;

        let email = optional_text(payload.email);
        if let Some(email) = &email {
            if !email.validate_email() {
                return Err(AppError::Validation(format!(
                    "email '{}' is not a valid address",
                    email
                )));
            }
        }

        Ok(ContestantFields {
            first_name,
            last_name,
            birth_date: payload.birth_date,
            gender: optional_text(payload.gender),
            ageclass,
            region: optional_text(payload.region),
            club: optional_text(payload.club),
            team: optional_text(payload.team),
            email,
            minidrett_id: optional_text(payload.minidrett_id),
            registration_date_time: payload.registration_date_time,
            distance: optional_text(payload.distance),
            seeding_points: payload.seeding_points,
            bib: payload.bib,
        })
    }

    async fn lock_event(conn: &mut PgConnection, event_id: &Uuid) -> AppResult<()> {
        EventRepository::lock_for_update(conn, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;
        Ok(())
    }

    async fn ensure_bib_free(
        conn: &mut PgConnection,
        event_id: &Uuid,
        fields: &ContestantFields,
        exclude: Option<&Uuid>,
    ) -> AppResult<()> {
        let Some(bib) = fields.bib else {
            return Ok(());
        };

        if ContestantRepository::bib_in_use(conn, event_id, bib, exclude).await? {
            return Err(AppError::AlreadyExists(format!(
                "Bib {} is already in use in this event",
                bib
            )));
        }

        Ok(())
    }
}

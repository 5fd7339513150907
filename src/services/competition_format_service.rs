//! Competition format registry

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::CompetitionFormatRepository,
    error::{AppError, AppResult, DomainError},
    handlers::competition_formats::request::CompetitionFormatRequest,
    models::{CompetitionFormat, CompetitionFormatFields, StartProcedure, StartingOrder},
    utils::{non_blank, validate_capacity},
};

/// Competition format service for business logic
pub struct CompetitionFormatService;

impl CompetitionFormatService {
    /// Check a submitted format and normalize it into the stored values
    pub fn validate(
        payload: &CompetitionFormatRequest,
    ) -> Result<CompetitionFormatFields, DomainError> {
        let name = non_blank(&payload.name).ok_or_else(|| DomainError::InvalidFormat {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        })?;

        let starting_order = payload
            .starting_order
            .parse::<StartingOrder>()
            .map_err(|e| DomainError::InvalidFormat {
                field: "starting_order".to_string(),
                message: e.to_string(),
            })?;

        let start_procedure = payload
            .start_procedure
            .parse::<StartProcedure>()
            .map_err(|e| DomainError::InvalidFormat {
                field: "start_procedure".to_string(),
                message: e.to_string(),
            })?;

        validate_capacity(
            "max_no_of_contestants_in_raceclass",
            payload.max_no_of_contestants_in_raceclass,
        )?;
        validate_capacity(
            "max_no_of_contestants_in_race",
            payload.max_no_of_contestants_in_race,
        )?;

        Ok(CompetitionFormatFields {
            name,
            starting_order,
            start_procedure,
            max_no_of_contestants_in_raceclass: payload.max_no_of_contestants_in_raceclass,
            max_no_of_contestants_in_race: payload.max_no_of_contestants_in_race,
            time_between_groups: payload.time_between_groups,
            intervals: payload.intervals,
        })
    }

    /// Register a new competition format
    pub async fn create(
        pool: &PgPool,
        payload: CompetitionFormatRequest,
    ) -> AppResult<CompetitionFormat> {
        let fields = Self::validate(&payload)?;

        if CompetitionFormatRepository::find_by_name(pool, &fields.name)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Competition format '{}' already exists",
                fields.name
            )));
        }

        let format = CompetitionFormatRepository::create(pool, &fields).await?;
        info!(format_id = %format.id, name = %format.name, "Competition format created");

        Ok(format)
    }

    /// Get competition format by ID
    pub async fn get(pool: &PgPool, id: &Uuid) -> AppResult<CompetitionFormat> {
        CompetitionFormatRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition format not found".to_string()))
    }

    /// Get competition format by name
    pub async fn get_by_name(pool: &PgPool, name: &str) -> AppResult<CompetitionFormat> {
        CompetitionFormatRepository::find_by_name(pool, name.trim())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Competition format '{}' not found", name.trim()))
            })
    }

    /// List competition formats, filtered on exact name when given
    pub async fn list(pool: &PgPool, name: Option<&str>) -> AppResult<Vec<CompetitionFormat>> {
        let name = name.and_then(non_blank);
        CompetitionFormatRepository::list(pool, name.as_deref()).await
    }

    /// Replace a competition format.
    ///
    /// Raceclasses and bibs derived earlier are left as they are.
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        payload: CompetitionFormatRequest,
    ) -> AppResult<CompetitionFormat> {
        let fields = Self::validate(&payload)?;

        if let Some(other) = CompetitionFormatRepository::find_by_name(pool, &fields.name).await? {
            if other.id != *id {
                return Err(AppError::AlreadyExists(format!(
                    "Competition format '{}' already exists",
                    fields.name
                )));
            }
        }

        let format = CompetitionFormatRepository::update(pool, id, &fields)
            .await?
            .ok_or_else(|| AppError::NotFound("Competition format not found".to_string()))?;
        info!(format_id = %format.id, name = %format.name, "Competition format updated");

        Ok(format)
    }

    /// Delete competition format
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !CompetitionFormatRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Competition format not found".to_string()));
        }

        info!(format_id = %id, "Competition format deleted");
        Ok(())
    }
}

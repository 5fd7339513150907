//! Competition format repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CompetitionFormat, CompetitionFormatFields},
};

/// Repository for competition format database operations
pub struct CompetitionFormatRepository;

impl CompetitionFormatRepository {
    /// Create a new competition format
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        fields: &CompetitionFormatFields,
    ) -> AppResult<CompetitionFormat> {
        let format = sqlx::query_as::<_, CompetitionFormat>(
            r#"
            INSERT INTO competition_formats (
                name, starting_order, start_procedure,
                max_no_of_contestants_in_raceclass, max_no_of_contestants_in_race,
                time_between_groups, intervals
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(fields.starting_order.as_str())
        .bind(fields.start_procedure.as_str())
        .bind(fields.max_no_of_contestants_in_raceclass)
        .bind(fields.max_no_of_contestants_in_race)
        .bind(fields.time_between_groups)
        .bind(fields.intervals)
        .fetch_one(executor)
        .await?;

        Ok(format)
    }

    /// Find competition format by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<CompetitionFormat>> {
        let format = sqlx::query_as::<_, CompetitionFormat>(
            r#"SELECT * FROM competition_formats WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(format)
    }

    /// Find competition format by its unique name
    pub async fn find_by_name<'e, E: PgExecutor<'e>>(
        executor: E,
        name: &str,
    ) -> AppResult<Option<CompetitionFormat>> {
        let format = sqlx::query_as::<_, CompetitionFormat>(
            r#"SELECT * FROM competition_formats WHERE name = $1"#,
        )
        .bind(name)
        .fetch_optional(executor)
        .await?;

        Ok(format)
    }

    /// List competition formats, optionally filtered by exact name
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        name: Option<&str>,
    ) -> AppResult<Vec<CompetitionFormat>> {
        let formats = sqlx::query_as::<_, CompetitionFormat>(
            r#"
            SELECT * FROM competition_formats
            WHERE ($1::TEXT IS NULL OR name = $1)
            ORDER BY name
            "#,
        )
        .bind(name)
        .fetch_all(executor)
        .await?;

        Ok(formats)
    }

    /// Replace every writable field of a competition format
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        fields: &CompetitionFormatFields,
    ) -> AppResult<Option<CompetitionFormat>> {
        let format = sqlx::query_as::<_, CompetitionFormat>(
            r#"
            UPDATE competition_formats
            SET
                name = $2,
                starting_order = $3,
                start_procedure = $4,
                max_no_of_contestants_in_raceclass = $5,
                max_no_of_contestants_in_race = $6,
                time_between_groups = $7,
                intervals = $8,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(fields.starting_order.as_str())
        .bind(fields.start_procedure.as_str())
        .bind(fields.max_no_of_contestants_in_raceclass)
        .bind(fields.max_no_of_contestants_in_race)
        .bind(fields.time_between_groups)
        .bind(fields.intervals)
        .fetch_optional(executor)
        .await?;

        Ok(format)
    }

    /// Delete competition format, returning whether a row was removed
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM competition_formats WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

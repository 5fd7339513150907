//! Event repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Event, EventFields},
};

/// Repository for event database operations
pub struct EventRepository;

impl EventRepository {
    /// Create a new event
    pub async fn create<'e, E: PgExecutor<'e>>(executor: E, fields: &EventFields) -> AppResult<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (
                name, date_of_event, time_of_event, timezone,
                competition_format, organiser, webpage, information
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(fields.date_of_event)
        .bind(fields.time_of_event)
        .bind(&fields.timezone)
        .bind(&fields.competition_format)
        .bind(&fields.organiser)
        .bind(&fields.webpage)
        .bind(&fields.information)
        .fetch_one(executor)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(r#"SELECT * FROM events WHERE id = $1"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(event)
    }

    /// Find event by ID and hold a row lock on it until the transaction ends.
    ///
    /// Every derivation run takes this lock first, so two runs on the same
    /// event are serialized.
    pub async fn lock_for_update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
    ) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(r#"SELECT * FROM events WHERE id = $1 FOR UPDATE"#)
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(event)
    }

    /// List all events
    pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> AppResult<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(
            r#"SELECT * FROM events ORDER BY date_of_event NULLS LAST, time_of_event NULLS LAST, name"#,
        )
        .fetch_all(executor)
        .await?;

        Ok(events)
    }

    /// Replace every writable field of an event
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        id: &Uuid,
        fields: &EventFields,
    ) -> AppResult<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET
                name = $2,
                date_of_event = $3,
                time_of_event = $4,
                timezone = $5,
                competition_format = $6,
                organiser = $7,
                webpage = $8,
                information = $9,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(fields.date_of_event)
        .bind(fields.time_of_event)
        .bind(&fields.timezone)
        .bind(&fields.competition_format)
        .bind(&fields.organiser)
        .bind(&fields.webpage)
        .bind(&fields.information)
        .fetch_optional(executor)
        .await?;

        Ok(event)
    }

    /// Delete event with its raceclasses and contestants
    pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM events WHERE id = $1"#)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

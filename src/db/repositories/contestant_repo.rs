//! Contestant repository

use sqlx::PgExecutor;
use uuid::Uuid;

use crate::{
    engine::BibAssignment,
    error::AppResult,
    models::{Contestant, ContestantFields, ContestantFilter},
};

/// Repository for contestant database operations
pub struct ContestantRepository;

impl ContestantRepository {
    /// Create a new contestant
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        fields: &ContestantFields,
    ) -> AppResult<Contestant> {
        let contestant = sqlx::query_as::<_, Contestant>(
            r#"
            INSERT INTO contestants (
                event_id, first_name, last_name, birth_date, gender, ageclass,
                region, club, team, email, minidrett_id, registration_date_time,
                distance, seeding_points, bib
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.birth_date)
        .bind(&fields.gender)
        .bind(&fields.ageclass)
        .bind(&fields.region)
        .bind(&fields.club)
        .bind(&fields.team)
        .bind(&fields.email)
        .bind(&fields.minidrett_id)
        .bind(fields.registration_date_time)
        .bind(&fields.distance)
        .bind(fields.seeding_points)
        .bind(fields.bib)
        .fetch_one(executor)
        .await?;

        Ok(contestant)
    }

    /// Find contestant of an event by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<Option<Contestant>> {
        let contestant = sqlx::query_as::<_, Contestant>(
            r#"SELECT * FROM contestants WHERE event_id = $1 AND id = $2"#,
        )
        .bind(event_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(contestant)
    }

    /// List contestants of an event matching `filter`
    pub async fn list<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        filter: &ContestantFilter,
    ) -> AppResult<Vec<Contestant>> {
        let contestants = sqlx::query_as::<_, Contestant>(
            r#"
            SELECT c.* FROM contestants c
            WHERE c.event_id = $1
              AND ($2::TEXT IS NULL OR c.ageclass = $2)
              AND ($3::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM raceclasses r
                    WHERE r.event_id = c.event_id
                      AND r.name = $3
                      AND c.ageclass = ANY(r.ageclasses)
                  ))
              AND ($4::INTEGER IS NULL OR c.bib = $4)
            ORDER BY c.bib NULLS LAST, c.ageclass, c.last_name, c.first_name
            "#,
        )
        .bind(event_id)
        .bind(filter.ageclass.as_deref())
        .bind(filter.raceclass.as_deref())
        .bind(filter.bib)
        .fetch_all(executor)
        .await?;

        Ok(contestants)
    }

    /// Contestants of an event whose first name, last name or full name
    /// contains `name`, ignoring case
    pub async fn search<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        name: &str,
    ) -> AppResult<Vec<Contestant>> {
        let pattern = format!("%{}%", escape_like(name));

        let contestants = sqlx::query_as::<_, Contestant>(
            r#"
            SELECT * FROM contestants
            WHERE event_id = $1
              AND (
                first_name ILIKE $2
                OR last_name ILIKE $2
                OR (first_name || ' ' || last_name) ILIKE $2
              )
            ORDER BY bib NULLS LAST, last_name, first_name
            "#,
        )
        .bind(event_id)
        .bind(pattern)
        .fetch_all(executor)
        .await?;

        Ok(contestants)
    }

    /// Whether `bib` is held by a contestant of the event other than `exclude`
    pub async fn bib_in_use<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        bib: i32,
        exclude: Option<&Uuid>,
    ) -> AppResult<bool> {
        let in_use: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM contestants
                WHERE event_id = $1 AND bib = $2 AND ($3::UUID IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(event_id)
        .bind(bib)
        .bind(exclude)
        .fetch_one(executor)
        .await?;

        Ok(in_use)
    }

    /// Replace the writable fields of a contestant
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        id: &Uuid,
        fields: &ContestantFields,
    ) -> AppResult<Option<Contestant>> {
        let contestant = sqlx::query_as::<_, Contestant>(
            r#"
            UPDATE contestants
            SET
                first_name = $3,
                last_name = $4,
                birth_date = $5,
                gender = $6,
                ageclass = $7,
                region = $8,
                club = $9,
                team = $10,
                email = $11,
                minidrett_id = $12,
                registration_date_time = $13,
                distance = $14,
                seeding_points = $15,
                bib = $16,
                updated_at = NOW()
            WHERE event_id = $1 AND id = $2
            RETURNING *
            "#,
        )
        .bind(event_id)
        .bind(id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(fields.birth_date)
        .bind(&fields.gender)
        .bind(&fields.ageclass)
        .bind(&fields.region)
        .bind(&fields.club)
        .bind(&fields.team)
        .bind(&fields.email)
        .bind(&fields.minidrett_id)
        .bind(fields.registration_date_time)
        .bind(&fields.distance)
        .bind(fields.seeding_points)
        .bind(fields.bib)
        .fetch_optional(executor)
        .await?;

        Ok(contestant)
    }

    /// Delete contestant of an event
    pub async fn delete<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM contestants WHERE event_id = $1 AND id = $2"#)
            .bind(event_id)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every contestant of an event
    pub async fn delete_all<'e, E: PgExecutor<'e>>(executor: E, event_id: &Uuid) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM contestants WHERE event_id = $1"#)
            .bind(event_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Write a complete bib assignment in one statement.
    ///
    /// Relies on the deferred `(event_id, bib)` uniqueness check, so bibs may
    /// be swapped between contestants. Must run inside the transaction
    /// holding the event lock.
    pub async fn assign_bibs<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        assignments: &[BibAssignment],
    ) -> AppResult<u64> {
        let (ids, bibs): (Vec<Uuid>, Vec<i32>) = assignments
            .iter()
            .map(|assignment| (assignment.contestant_id, assignment.bib))
            .unzip();

        let result = sqlx::query(
            r#"
            UPDATE contestants AS c
            SET bib = a.bib, updated_at = NOW()
            FROM UNNEST($2::UUID[], $3::INTEGER[]) AS a(id, bib)
            WHERE c.event_id = $1 AND c.id = a.id
            "#,
        )
        .bind(event_id)
        .bind(&ids)
        .bind(&bibs)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }
}

/// Escape the `LIKE` wildcards of a literal search term
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

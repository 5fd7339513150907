//! Raceclass repository
//!
//! `no_of_contestants` is not stored. Every query returning raceclasses
//! counts the event's contestants whose ageclass the raceclass covers.

use sqlx::{PgConnection, PgExecutor};
use uuid::Uuid;

use crate::{
    engine::RaceclassPlan,
    error::AppResult,
    models::{Raceclass, RaceclassFields},
};

/// Raceclass columns of row `r`, with the contestant count
macro_rules! raceclass_columns {
    () => {
        r#"
        r.id, r.event_id, r.name, r."group", r."order", r.ageclasses, r.distance,
        (
            SELECT COUNT(*)::INTEGER FROM contestants c
            WHERE c.event_id = r.event_id AND c.ageclass = ANY(r.ageclasses)
        ) AS no_of_contestants,
        r.ranking, r.seeding, r.created_at, r.updated_at
        "#
    };
}

/// Repository for raceclass database operations
pub struct RaceclassRepository;

impl RaceclassRepository {
    /// Create a new raceclass
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        fields: &RaceclassFields,
    ) -> AppResult<Raceclass> {
        let raceclass = sqlx::query_as::<_, Raceclass>(concat!(
            r#"
            WITH r AS (
                INSERT INTO raceclasses (
                    event_id, name, "group", "order", ageclasses, distance, ranking, seeding
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING *
            )
            SELECT "#,
            raceclass_columns!(),
            " FROM r"
        ))
        .bind(event_id)
        .bind(&fields.name)
        .bind(fields.group)
        .bind(fields.order)
        .bind(&fields.ageclasses)
        .bind(&fields.distance)
        .bind(fields.ranking)
        .bind(fields.seeding)
        .fetch_one(executor)
        .await?;

        Ok(raceclass)
    }

    /// Find raceclass of an event by ID
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<Option<Raceclass>> {
        let raceclass = sqlx::query_as::<_, Raceclass>(concat!(
            "SELECT ",
            raceclass_columns!(),
            " FROM raceclasses r WHERE r.event_id = $1 AND r.id = $2"
        ))
        .bind(event_id)
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(raceclass)
    }

    /// List raceclasses of an event in starting order
    pub async fn list_by_event<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
    ) -> AppResult<Vec<Raceclass>> {
        let raceclasses = sqlx::query_as::<_, Raceclass>(concat!(
            "SELECT ",
            raceclass_columns!(),
            r#"
            FROM raceclasses r
            WHERE r.event_id = $1
            ORDER BY r."group", r."order", r.name
            "#
        ))
        .bind(event_id)
        .fetch_all(executor)
        .await?;

        Ok(raceclasses)
    }

    /// Whether a raceclass of the event other than `exclude` is named `name`
    pub async fn name_taken<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        name: &str,
        exclude: Option<&Uuid>,
    ) -> AppResult<bool> {
        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM raceclasses
                WHERE event_id = $1 AND name = $2 AND ($3::UUID IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(event_id)
        .bind(name)
        .bind(exclude)
        .fetch_one(executor)
        .await?;

        Ok(taken)
    }

    /// Raceclasses of an event claiming any of `ageclasses`, other than `exclude`
    pub async fn find_claiming<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        ageclasses: &[String],
        exclude: Option<&Uuid>,
    ) -> AppResult<Vec<Raceclass>> {
        let raceclasses = sqlx::query_as::<_, Raceclass>(concat!(
            "SELECT ",
            raceclass_columns!(),
            r#"
            FROM raceclasses r
            WHERE r.event_id = $1
              AND r.ageclasses && $2
              AND ($3::UUID IS NULL OR r.id <> $3)
            ORDER BY r."group", r."order", r.name
            "#
        ))
        .bind(event_id)
        .bind(ageclasses)
        .bind(exclude)
        .fetch_all(executor)
        .await?;

        Ok(raceclasses)
    }

    /// Replace the writable fields of a raceclass
    pub async fn update<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        id: &Uuid,
        fields: &RaceclassFields,
    ) -> AppResult<Option<Raceclass>> {
        let raceclass = sqlx::query_as::<_, Raceclass>(concat!(
            r#"
            WITH r AS (
                UPDATE raceclasses
                SET
                    name = $3,
                    "group" = $4,
                    "order" = $5,
                    ageclasses = $6,
                    distance = $7,
                    ranking = $8,
                    seeding = $9,
                    updated_at = NOW()
                WHERE event_id = $1 AND id = $2
                RETURNING *
            )
            SELECT "#,
            raceclass_columns!(),
            " FROM r"
        ))
        .bind(event_id)
        .bind(id)
        .bind(&fields.name)
        .bind(fields.group)
        .bind(fields.order)
        .bind(&fields.ageclasses)
        .bind(&fields.distance)
        .bind(fields.ranking)
        .bind(fields.seeding)
        .fetch_optional(executor)
        .await?;

        Ok(raceclass)
    }

    /// Delete raceclass of an event
    pub async fn delete<'e, E: PgExecutor<'e>>(
        executor: E,
        event_id: &Uuid,
        id: &Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM raceclasses WHERE event_id = $1 AND id = $2"#)
            .bind(event_id)
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every raceclass of an event
    pub async fn delete_all<'e, E: PgExecutor<'e>>(executor: E, event_id: &Uuid) -> AppResult<u64> {
        let result = sqlx::query(r#"DELETE FROM raceclasses WHERE event_id = $1"#)
            .bind(event_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Replace the raceclass set of an event with a generated one.
    ///
    /// Reused raceclasses are updated in place so they keep their identity
    /// and creation time. Must run inside the transaction holding the event
    /// lock.
    pub async fn replace_all(
        conn: &mut PgConnection,
        event_id: &Uuid,
        plans: &[RaceclassPlan],
    ) -> AppResult<Vec<Raceclass>> {
        let kept: Vec<Uuid> = plans.iter().filter_map(|plan| plan.id).collect();

        sqlx::query(r#"DELETE FROM raceclasses WHERE event_id = $1 AND NOT (id = ANY($2))"#)
            .bind(event_id)
            .bind(&kept)
            .execute(&mut *conn)
            .await?;

        let mut raceclasses = Vec::with_capacity(plans.len());
        for plan in plans {
            let raceclass = sqlx::query_as::<_, Raceclass>(concat!(
                r#"
                WITH r AS (
                    INSERT INTO raceclasses (
                        id, event_id, name, "group", "order", ageclasses, distance,
                        ranking, seeding
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                    ON CONFLICT (id) DO UPDATE
                    SET
                        name = EXCLUDED.name,
                        "group" = EXCLUDED."group",
                        "order" = EXCLUDED."order",
                        ageclasses = EXCLUDED.ageclasses,
                        distance = EXCLUDED.distance,
                        ranking = EXCLUDED.ranking,
                        seeding = EXCLUDED.seeding,
                        updated_at = NOW()
                    RETURNING *
                )
                SELECT "#,
                raceclass_columns!(),
                " FROM r"
            ))
            .bind(plan.id.unwrap_or_else(Uuid::new_v4))
            .bind(event_id)
            .bind(&plan.name)
            .bind(plan.group)
            .bind(plan.order)
            .bind(&plan.ageclasses)
            .bind(&plan.distance)
            .bind(plan.ranking)
            .bind(plan.seeding)
            .fetch_one(&mut *conn)
            .await?;

            raceclasses.push(raceclass);
        }

        Ok(raceclasses)
    }
}

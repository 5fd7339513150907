//! Raceclass response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Raceclass;

/// Raceclass response
#[derive(Debug, Serialize)]
pub struct RaceclassResponse {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub group: i32,
    pub order: i32,
    pub ageclasses: Vec<String>,
    pub distance: Option<String>,
    pub no_of_contestants: i32,
    pub ranking: bool,
    pub seeding: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Raceclass> for RaceclassResponse {
    fn from(raceclass: Raceclass) -> Self {
        Self {
            id: raceclass.id,
            event_id: raceclass.event_id,
            name: raceclass.name,
            group: raceclass.group,
            order: raceclass.order,
            ageclasses: raceclass.ageclasses,
            distance: raceclass.distance,
            no_of_contestants: raceclass.no_of_contestants,
            ranking: raceclass.ranking,
            seeding: raceclass.seeding,
            created_at: raceclass.created_at,
            updated_at: raceclass.updated_at,
        }
    }
}

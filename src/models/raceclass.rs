//! Raceclass model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Raceclass database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Raceclass {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    /// Starting-order group
    pub group: i32,
    /// Position within the group
    pub order: i32,
    pub ageclasses: Vec<String>,
    pub distance: Option<String>,
    pub no_of_contestants: i32,
    pub ranking: bool,
    pub seeding: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Raceclass {
    /// Check if the raceclass covers the given ageclass
    pub fn covers(&self, ageclass: &str) -> bool {
        self.ageclasses.iter().any(|a| a == ageclass)
    }

    /// Starting position of the raceclass
    pub fn start_position(&self) -> (i32, i32) {
        (self.group, self.order)
    }
}

/// Writable values of a raceclass (the contestant count is never client-writable)
#[derive(Debug, Clone)]
pub struct RaceclassFields {
    pub name: String,
    pub group: i32,
    pub order: i32,
    pub ageclasses: Vec<String>,
    pub distance: Option<String>,
    pub ranking: bool,
    pub seeding: bool,
}

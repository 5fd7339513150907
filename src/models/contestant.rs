//! Contestant model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Contestant database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contestant {
    pub id: Uuid,
    pub event_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub ageclass: String,
    pub region: Option<String>,
    pub club: Option<String>,
    pub team: Option<String>,
    pub email: Option<String>,
    /// Reference into the national athlete registry
    pub minidrett_id: Option<String>,
    pub registration_date_time: Option<DateTime<Utc>>,
    pub distance: Option<String>,
    pub seeding_points: Option<i32>,
    pub bib: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contestant {
    /// Full name for messages and listings
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Writable values of a contestant
#[derive(Debug, Clone)]
pub struct ContestantFields {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: Option<String>,
    pub ageclass: String,
    pub region: Option<String>,
    pub club: Option<String>,
    pub team: Option<String>,
    pub email: Option<String>,
    pub minidrett_id: Option<String>,
    pub registration_date_time: Option<DateTime<Utc>>,
    pub distance: Option<String>,
    pub seeding_points: Option<i32>,
    pub bib: Option<i32>,
}

/// Optional filters of a contestant listing
#[derive(Debug, Clone, Default)]
pub struct ContestantFilter {
    pub ageclass: Option<String>,
    /// Name of a raceclass; matches contestants in any of its ageclasses
    pub raceclass: Option<String>,
    pub bib: Option<i32>,
}

//! Event model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Event database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub date_of_event: Option<NaiveDate>,
    pub time_of_event: Option<NaiveTime>,
    pub timezone: Option<String>,
    /// Name of the active competition format
    pub competition_format: Option<String>,
    pub organiser: Option<String>,
    pub webpage: Option<String>,
    pub information: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable values of an event
#[derive(Debug, Clone)]
pub struct EventFields {
    pub name: String,
    pub date_of_event: Option<NaiveDate>,
    pub time_of_event: Option<NaiveTime>,
    pub timezone: Option<String>,
    pub competition_format: Option<String>,
    pub organiser: Option<String>,
    pub webpage: Option<String>,
    pub information: Option<String>,
}

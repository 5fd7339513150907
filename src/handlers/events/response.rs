//! Event response DTOs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Event;

/// Event response
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub name: String,
    pub date_of_event: Option<NaiveDate>,
    pub time_of_event: Option<NaiveTime>,
    pub timezone: Option<String>,
    pub competition_format: Option<String>,
    pub organiser: Option<String>,
    pub webpage: Option<String>,
    pub information: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            name: event.name,
            date_of_event: event.date_of_event,
            time_of_event: event.time_of_event,
            timezone: event.timezone,
            competition_format: event.competition_format,
            organiser: event.organiser,
            webpage: event.webpage,
            information: event.information,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

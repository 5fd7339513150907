//! Contestant response DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Contestant;

/// Contestant response
#[derive(Debug, Serialize)]
pub struct ContestantResponse {
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
    pub minidrett_id: Option<String>,
    pub registration_date_time: Option<DateTime<Utc>>,
    pub distance: Option<String>,
    pub seeding_points: Option<i32>,
    pub bib: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contestant> for ContestantResponse {
    fn from(contestant: Contestant) -> Self {
        Self {
            id: contestant.id,
            event_id: contestant.event_id,
            first_name: contestant.first_name,
            last_name: contestant.last_name,
            birth_date: contestant.birth_date,
            gender: contestant.gender,
            ageclass: contestant.ageclass,
            region: contestant.region,
            club: contestant.club,
            team: contestant.team,
            email: contestant.email,
            minidrett_id: contestant.minidrett_id,
            registration_date_time: contestant.registration_date_time,
            distance: contestant.distance,
            seeding_points: contestant.seeding_points,
            bib: contestant.bib,
            created_at: contestant.created_at,
            updated_at: contestant.updated_at,
        }
    }
}

//! Contestant request DTOs

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_AGECLASS_LENGTH, MAX_NAME_LENGTH};

/// Create or replace a contestant
#[derive(Debug, Deserialize, Validate)]
pub struct ContestantRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub first_name: String,

    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub last_name: String,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub gender: Option<String>,

    #[validate(length(max = MAX_AGECLASS_LENGTH))]
    pub ageclass: String,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub region: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub club: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub team: Option<String>,

    /// Blank is treated as absent; the address is checked after trimming
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub email: Option<String>,

    /// Reference into the national registration system
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub minidrett_id: Option<String>,

    pub registration_date_time: Option<DateTime<Utc>>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub distance: Option<String>,

    pub seeding_points: Option<i32>,

    #[validate(range(min = 1))]
    pub bib: Option<i32>,
}

/// Search contestants by name
#[derive(Debug, Deserialize, Validate)]
pub struct SearchContestantsRequest {
    /// Matched against first name, last name and full name, ignoring case
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,
}

/// List contestants query parameters
#[derive(Debug, Deserialize)]
pub struct ListContestantsQuery {
    pub ageclass: Option<String>,
    /// Raceclass name
    pub raceclass: Option<String>,
    pub bib: Option<i32>,
}

/// Assign bibs query parameters
#[derive(Debug, Deserialize, Validate)]
pub struct AssignBibsQuery {
    /// First bib handed out, defaults to 1
    #[serde(rename = "start-bib")]
    #[validate(range(min = 1))]
    pub start_bib: Option<i32>,
}

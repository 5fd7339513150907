//! Event request DTOs

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_INFORMATION_LENGTH, MAX_NAME_LENGTH};

/// Create or replace an event
#[derive(Debug, Deserialize, Validate)]
pub struct EventRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,

    pub date_of_event: Option<NaiveDate>,
    pub time_of_event: Option<NaiveTime>,

    /// IANA zone name, defaults to Europe/Oslo
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub timezone: Option<String>,

    /// Name of a registered competition format
    #[validate(length(max = MAX_NAME_LENGTH))]
    pub competition_format: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub organiser: Option<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub webpage: Option<String>,

    #[validate(length(max = MAX_INFORMATION_LENGTH))]
    pub information: Option<String>,
}

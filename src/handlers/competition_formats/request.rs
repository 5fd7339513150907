//! Competition format request DTOs

use chrono::NaiveTime;
use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_NAME_LENGTH;

/// Create or replace a competition format
#[derive(Debug, Deserialize, Validate)]
pub struct CompetitionFormatRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,

    /// Draw, Group starting order or Heat starting order
    pub starting_order: String,

    /// Interval start, Mass start or Heat start
    pub start_procedure: String,

    /// Omitted means unbounded
    pub max_no_of_contestants_in_raceclass: Option<i32>,

    /// Omitted means unbounded
    pub max_no_of_contestants_in_race: Option<i32>,

    pub time_between_groups: Option<NaiveTime>,
    pub intervals: Option<NaiveTime>,
}

/// List competition formats query parameters
#[derive(Debug, Deserialize)]
pub struct ListCompetitionFormatsQuery {
    pub name: Option<String>,
}

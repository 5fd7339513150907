//! Raceclass request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_NAME_LENGTH;

/// Create or replace a raceclass.
///
/// `no_of_contestants` is not accepted; it is counted from the event's contestants.
#[derive(Debug, Deserialize, Validate)]
pub struct RaceclassRequest {
    #[validate(length(min = 1, max = MAX_NAME_LENGTH))]
    pub name: String,

    /// Starting-order group
    #[validate(range(min = 1))]
    pub group: i32,

    /// Position within the group
    #[validate(range(min = 1))]
    pub order: i32,

    #[validate(length(min = 1))]
    pub ageclasses: Vec<String>,

    #[validate(length(max = MAX_NAME_LENGTH))]
    pub distance: Option<String>,

    /// Defaults to true
    pub ranking: Option<bool>,

    /// Defaults to false
    pub seeding: Option<bool>,
}

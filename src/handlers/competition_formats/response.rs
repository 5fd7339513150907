//! Competition format response DTOs

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{CompetitionFormat, StartProcedure, StartingOrder};

/// Competition format response
#[derive(Debug, Serialize)]
pub struct CompetitionFormatResponse {
    pub id: Uuid,
    pub name: String,
    pub starting_order: StartingOrder,
    pub start_procedure: StartProcedure,
    pub max_no_of_contestants_in_raceclass: Option<i32>,
    pub max_no_of_contestants_in_race: Option<i32>,
    pub time_between_groups: Option<NaiveTime>,
    pub intervals: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CompetitionFormat> for CompetitionFormatResponse {
    fn from(format: CompetitionFormat) -> Self {
        Self {
            id: format.id,
            name: format.name,
            starting_order: format.starting_order,
            start_procedure: format.start_procedure,
            max_no_of_contestants_in_raceclass: format.max_no_of_contestants_in_raceclass,
            max_no_of_contestants_in_race: format.max_no_of_contestants_in_race,
            time_between_groups: format.time_between_groups,
            intervals: format.intervals,
            created_at: format.created_at,
            updated_at: format.updated_at,
        }
    }
}

//! Competition format model

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::{start_procedures, starting_orders};

/// Competition format database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CompetitionFormat {
    pub id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub starting_order: StartingOrder,
    #[sqlx(try_from = "String")]
    pub start_procedure: StartProcedure,
    /// `None` means unbounded
    pub max_no_of_contestants_in_raceclass: Option<i32>,
    /// `None` means unbounded
    pub max_no_of_contestants_in_race: Option<i32>,
    pub time_between_groups: Option<NaiveTime>,
    pub intervals: Option<NaiveTime>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CompetitionFormat {
    /// Capacity limits bounding the raceclass generator
    pub fn capacity_limits(&self) -> CapacityLimits {
        CapacityLimits {
            max_in_raceclass: self.max_no_of_contestants_in_raceclass,
            max_in_race: self.max_no_of_contestants_in_race,
        }
    }
}

/// Validated values of a competition format, as written by create and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitionFormatFields {
    pub name: String,
    pub starting_order: StartingOrder,
    pub start_procedure: StartProcedure,
    pub max_no_of_contestants_in_raceclass: Option<i32>,
    pub max_no_of_contestants_in_race: Option<i32>,
    pub time_between_groups: Option<NaiveTime>,
    pub intervals: Option<NaiveTime>,
}

/// Capacity limits of a competition format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityLimits {
    pub max_in_raceclass: Option<i32>,
    pub max_in_race: Option<i32>,
}

/// Error returned when a stored or submitted enumeration value is not supported
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported value '{value}', expected one of: {}", .expected.join(", "))]
pub struct UnsupportedValue {
    pub value: String,
    pub expected: &'static [&'static str],
}

/// Policy deciding the starting order of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StartingOrder {
    Draw,
    Group,
    Heat,
}

impl StartingOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draw => starting_orders::DRAW,
            Self::Group => starting_orders::GROUP,
            Self::Heat => starting_orders::HEAT,
        }
    }
}

/// How contestants leave the start line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StartProcedure {
    IntervalStart,
    MassStart,
    HeatStart,
}

impl StartProcedure {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IntervalStart => start_procedures::INTERVAL_START,
            Self::MassStart => start_procedures::MASS_START,
            Self::HeatStart => start_procedures::HEAT_START,
        }
    }
}

/// Case-insensitive lookup of `value` among the canonical spellings in `all`
fn canonical(value: &str, all: &'static [&'static str]) -> Result<&'static str, UnsupportedValue> {
    let wanted = value.trim();
    all.iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| UnsupportedValue {
            value: value.to_string(),
            expected: all,
        })
}

impl FromStr for StartingOrder {
    type Err = UnsupportedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s, starting_orders::ALL)? {
            starting_orders::DRAW => Ok(Self::Draw),
            starting_orders::GROUP => Ok(Self::Group),
            _ => Ok(Self::Heat),
        }
    }
}

impl FromStr for StartProcedure {
    type Err = UnsupportedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match canonical(s, start_procedures::ALL)? {
            start_procedures::INTERVAL_START => Ok(Self::IntervalStart),
            start_procedures::MASS_START => Ok(Self::MassStart),
            _ => Ok(Self::HeatStart),
        }
    }
}

impl TryFrom<String> for StartingOrder {
    type Error = UnsupportedValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for StartProcedure {
    type Error = UnsupportedValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StartingOrder> for String {
    fn from(value: StartingOrder) -> Self {
        value.as_str().to_string()
    }
}

impl From<StartProcedure> for String {
    fn from(value: StartProcedure) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for StartingOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StartProcedure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

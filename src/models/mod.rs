//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod competition_format;
pub mod contestant;
pub mod event;
pub mod raceclass;

pub use competition_format::*;
pub use contestant::*;
pub use event::*;
pub use raceclass::*;

//! Business logic services

pub mod auth_service;
pub mod competition_format_service;
pub mod contestant_service;
pub mod event_service;
pub mod raceclass_service;

pub use auth_service::AuthService;
pub use competition_format_service::CompetitionFormatService;
pub use contestant_service::ContestantService;
pub use event_service::EventService;
pub use raceclass_service::RaceclassService;

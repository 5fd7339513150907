//! Database repositories
//!
//! Repositories handle all direct database interactions. Every function takes
//! an executor, so the same query runs against the pool or inside a
//! transaction.

pub mod competition_format_repo;
pub mod contestant_repo;
pub mod event_repo;
pub mod raceclass_repo;

pub use competition_format_repo::CompetitionFormatRepository;
pub use contestant_repo::ContestantRepository;
pub use event_repo::EventRepository;
pub use raceclass_repo::RaceclassRepository;

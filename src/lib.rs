//! Event Service - Sporting Event Administration
//!
//! This library provides the core functionality for administering sporting
//! events: competition formats, events, raceclasses and contestants, and the
//! two derivations built on them.
//!
//! # Features
//!
//! - Competition format registry with enumerated starting orders and start procedures
//! - Raceclass generation from contestant ageclasses under capacity limits
//! - Start bib assignment following the raceclass starting order
//! - Role-based access control on every mutating endpoint
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic and transaction boundaries
//! - **Engine**: Pure raceclass and bib derivations
//! - **Repositories**: Database access
//! - **Models**: Domain models

pub mod config;
pub mod constants;
pub mod db;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use router::build_router;
pub use state::AppState;

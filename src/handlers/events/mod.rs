//! Event handlers
//!
//! Raceclass and contestant routes are nested below a single event.

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

use super::{contestants, raceclasses};

/// Event routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_events).post(handler::create_event))
        .route(
            "/{event_id}",
            get(handler::get_event)
                .put(handler::update_event)
                .delete(handler::delete_event),
        )
        // Derivation commands
        .route(
            "/{event_id}/generate-raceclasses",
            post(raceclasses::generate_raceclasses),
        )
        .nest("/{event_id}/raceclasses", raceclasses::routes())
        .nest("/{event_id}/contestants", contestants::routes())
}

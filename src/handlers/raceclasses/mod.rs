//! Raceclass handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Raceclass routes, nested below `/events/{event_id}/raceclasses`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_raceclasses)
                .post(handler::create_raceclass)
                .delete(handler::delete_all_raceclasses),
        )
        .route(
            "/{id}",
            get(handler::get_raceclass)
                .put(handler::update_raceclass)
                .delete(handler::delete_raceclass),
        )
}

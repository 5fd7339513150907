//! Contestant handlers

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

/// Contestant routes, nested below `/events/{event_id}/contestants`
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_contestants)
                .post(handler::create_contestant)
                .delete(handler::delete_all_contestants),
        )
        .route("/assign-bibs", post(handler::assign_bibs))
        .route("/search", post(handler::search_contestants))
        .route(
            "/{id}",
            get(handler::get_contestant)
                .put(handler::update_contestant)
                .delete(handler::delete_contestant),
        )
}

//! Competition format registry handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::get, Router};

use crate::state::AppState;

/// Competition format routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handler::list_competition_formats).post(handler::create_competition_format),
        )
        .route(
            "/{id}",
            get(handler::get_competition_format)
                .put(handler::update_competition_format)
                .delete(handler::delete_competition_format),
        )
}

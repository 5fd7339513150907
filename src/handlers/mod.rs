//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod competition_formats;
pub mod contestants;
pub mod events;
pub mod health;
pub mod raceclasses;

use axum::{
    http::{header::LOCATION, HeaderName, StatusCode},
    Json, Router,
};

use crate::state::AppState;

/// `201 Created` with a `Location` header pointing at the new resource
pub type Created<T> = (StatusCode, [(HeaderName, String); 1], Json<T>);

pub(crate) fn created<T>(location: String, body: T) -> Created<T> {
    (StatusCode::CREATED, [(LOCATION, location)], Json(body))
}

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/competition-formats", competition_formats::routes())
        .nest("/events", events::routes())
}

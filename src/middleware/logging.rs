//! Logging middleware

use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

/// Request logging middleware.
///
/// Logs the route template next to the concrete path so requests for
/// different events aggregate under one route.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| path.clone());

    let response = next.run(request).await;

    let status = response.status();
    let duration_ms = format!("{:.2}", start.elapsed().as_secs_f64() * 1000.0);

    if status.is_server_error() {
        warn!(%method, %route, %path, status = status.as_u16(), %duration_ms, "Request completed with server error");
    } else if status.is_client_error() && status != StatusCode::NOT_FOUND {
        warn!(%method, %route, %path, status = status.as_u16(), %duration_ms, "Request completed with client error");
    } else {
        info!(%method, %route, %path, status = status.as_u16(), %duration_ms, "Request completed");
    }

    response
}

//! Event handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::roles,
    error::AppResult,
    handlers::{created, Created},
    middleware::auth::AuthenticatedUser,
    services::EventService,
    state::AppState,
};

use super::{request::EventRequest, response::EventResponse};

/// List all events
pub async fn list_events(State(state): State<AppState>) -> AppResult<Json<Vec<EventResponse>>> {
    let events = EventService::list(state.db()).await?;
    Ok(Json(events.into_iter().map(Into::into).collect()))
}

/// Create an event
pub async fn create_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<EventRequest>,
) -> AppResult<Created<EventResponse>> {
    auth_user.require_role(roles::EVENT_WRITERS)?;
    payload.validate()?;

    let event = EventService::create(state.db(), payload).await?;
    let location = format!("/events/{}", event.id);

    Ok(created(location, event.into()))
}

/// Get an event
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<EventResponse>> {
    let event = EventService::get(state.db(), &event_id).await?;
    Ok(Json(event.into()))
}

/// Replace an event
pub async fn update_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<EventRequest>,
) -> AppResult<Json<EventResponse>> {
    auth_user.require_role(roles::EVENT_WRITERS)?;
    payload.validate()?;

    let event = EventService::update(state.db(), &event_id, payload).await?;
    Ok(Json(event.into()))
}

/// Delete an event with its raceclasses and contestants
pub async fn delete_event(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_role(roles::EVENT_WRITERS)?;

    EventService::delete(state.db(), &event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Raceclass handler implementations

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
    services::RaceclassService,
    state::AppState,
};

use super::{request::RaceclassRequest, response::RaceclassResponse};

/// Generate the raceclasses of an event from its contestants
pub async fn generate_raceclasses(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<Created<Vec<RaceclassResponse>>> {
    auth_user.require_role(roles::EVENT_WRITERS)?;

    let raceclasses =
        RaceclassService::generate(state.db(), &event_id, &state.config().raceclasses).await?;
    let location = format!("/events/{}/raceclasses", event_id);

    Ok(created(location, raceclasses.into_iter().map(Into::into).collect()))
}

/// List raceclasses of an event in starting order
pub async fn list_raceclasses(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Vec<RaceclassResponse>>> {
    let raceclasses = RaceclassService::list(state.db(), &event_id).await?;
    Ok(Json(raceclasses.into_iter().map(Into::into).collect()))
}

/// Create a raceclass
pub async fn create_raceclass(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<RaceclassRequest>,
) -> AppResult<Created<RaceclassResponse>> {
    auth_user.require_role(roles::EVENT_WRITERS)?;
    payload.validate()?;

    let raceclass = RaceclassService::create(state.db(), &event_id, payload).await?;
    let location = format!("/events/{}/raceclasses/{}", event_id, raceclass.id);

    Ok(created(location, raceclass.into()))
}

/// Delete every raceclass of an event
pub async fn delete_all_raceclasses(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_role(roles::EVENT_WRITERS)?;

    RaceclassService::delete_all(state.db(), &event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get a raceclass
pub async fn get_raceclass(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<RaceclassResponse>> {
    let raceclass = RaceclassService::get(state.db(), &event_id, &id).await?;
    Ok(Json(raceclass.into()))
}

/// Replace a raceclass
pub async fn update_raceclass(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((event_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<RaceclassRequest>,
) -> AppResult<Json<RaceclassResponse>> {
    auth_user.require_role(roles::EVENT_WRITERS)?;
    payload.validate()?;

    let raceclass = RaceclassService::update(state.db(), &event_id, &id, payload).await?;
    Ok(Json(raceclass.into()))
}

/// Delete a raceclass
pub async fn delete_raceclass(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((event_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    auth_user.require_role(roles::EVENT_WRITERS)?;

    RaceclassService::delete(state.db(), &event_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

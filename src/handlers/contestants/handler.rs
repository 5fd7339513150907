//! Contestant handler implementations

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::{roles, DEFAULT_START_BIB},
    error::AppResult,
    handlers::{created, Created},
    middleware::auth::AuthenticatedUser,
    models::ContestantFilter,
    services::ContestantService,
    state::AppState,
};

use super::{
    request::{AssignBibsQuery, ContestantRequest, ListContestantsQuery, SearchContestantsRequest},
    response::ContestantResponse,
};

/// List contestants of an event
pub async fn list_contestants(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Query(query): Query<ListContestantsQuery>,
) -> AppResult<Json<Vec<ContestantResponse>>> {
    let filter = ContestantFilter {
        ageclass: query.ageclass,
        raceclass: query.raceclass,
        bib: query.bib,
    };

    let contestants = ContestantService::list(state.db(), &event_id, filter).await?;
    Ok(Json(contestants.into_iter().map(Into::into).collect()))
}

/// Search contestants of an event by name
pub async fn search_contestants(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<SearchContestantsRequest>,
) -> AppResult<Json<Vec<ContestantResponse>>> {
    payload.validate()?;

    let contestants = ContestantService::search(state.db(), &event_id, &payload.name).await?;
    Ok(Json(contestants.into_iter().map(Into::into).collect()))
}

/// Create a contestant
pub async fn create_contestant(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
    Json(payload): Json<ContestantRequest>,
) -> AppResult<Created<ContestantResponse>> {
    auth_user.require_role(roles::EVENT_WRITERS)?;
    payload.validate()?;

    let contestant = ContestantService::create(state.db(), &event_id, payload).await?;
    let location = format!("/events/{}/contestants/{}", event_id, contestant.id);

    Ok(created(location, contestant.into()))
}

/// Delete every contestant of an event
pub async fn delete_all_contestants(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_role(roles::EVENT_WRITERS)?;

    ContestantService::delete_all(state.db(), &event_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Assign bibs to every contestant of an event following the starting order
pub async fn assign_bibs(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(event_id): Path<Uuid>,
    Query(query): Query<AssignBibsQuery>,
) -> AppResult<Created<Vec<ContestantResponse>>> {
    auth_user.require_role(roles::EVENT_WRITERS)?;
    query.validate()?;

    let start_bib = query.start_bib.unwrap_or(DEFAULT_START_BIB);
    let contestants = ContestantService::assign_bibs(state.db(), &event_id, start_bib).await?;
    let location = format!("/events/{}/contestants", event_id);

    Ok(created(location, contestants.into_iter().map(Into::into).collect()))
}

/// Get a contestant
pub async fn get_contestant(
    State(state): State<AppState>,
    Path((event_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ContestantResponse>> {
    let contestant = ContestantService::get(state.db(), &event_id, &id).await?;
    Ok(Json(contestant.into()))
}

/// Replace a contestant
pub async fn update_contestant(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((event_id, id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ContestantRequest>,
) -> AppResult<Json<ContestantResponse>> {
    auth_user.require_role(roles::EVENT_WRITERS)?;
    payload.validate()?;

    let contestant = ContestantService::update(state.db(), &event_id, &id, payload).await?;
    Ok(Json(contestant.into()))
}

/// Delete a contestant
pub async fn delete_contestant(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path((event_id, id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    auth_user.require_role(roles::EVENT_WRITERS)?;

    ContestantService::delete(state.db(), &event_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

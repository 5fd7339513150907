//! Competition format handler implementations

use axum::{
    extract::{Path, Query, State},
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
    services::CompetitionFormatService,
    state::AppState,
};

use super::{
    request::{CompetitionFormatRequest, ListCompetitionFormatsQuery},
    response::CompetitionFormatResponse,
};

/// List competition formats, optionally by name
pub async fn list_competition_formats(
    State(state): State<AppState>,
    Query(query): Query<ListCompetitionFormatsQuery>,
) -> AppResult<Json<Vec<CompetitionFormatResponse>>> {
    let formats = CompetitionFormatService::list(state.db(), query.name.as_deref()).await?;
    Ok(Json(formats.into_iter().map(Into::into).collect()))
}

/// Create a competition format
pub async fn create_competition_format(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Json(payload): Json<CompetitionFormatRequest>,
) -> AppResult<Created<CompetitionFormatResponse>> {
    auth_user.require_role(roles::EVENT_WRITERS)?;
    payload.validate()?;

    let format = CompetitionFormatService::create(state.db(), payload).await?;
    let location = format!("/competition-formats/{}", format.id);

    Ok(created(location, format.into()))
}

/// Get a competition format
pub async fn get_competition_format(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CompetitionFormatResponse>> {
    let format = CompetitionFormatService::get(state.db(), &id).await?;
    Ok(Json(format.into()))
}

/// Replace a competition format
pub async fn update_competition_format(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CompetitionFormatRequest>,
) -> AppResult<Json<CompetitionFormatResponse>> {
    auth_user.require_role(roles::EVENT_WRITERS)?;
    payload.validate()?;

    let format = CompetitionFormatService::update(state.db(), &id, payload).await?;
    Ok(Json(format.into()))
}

/// Delete a competition format
pub async fn delete_competition_format(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    auth_user.require_role(roles::EVENT_WRITERS)?;

    CompetitionFormatService::delete(state.db(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Link handlers — create, update, delete, public listing.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use linkfolio_core::error::AppError;
use linkfolio_service::link::{CreateLinkRequest, UpdateLinkRequest};

use crate::dto::response::LinkResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Link ids are opaque; one that does not parse cannot exist.
fn parse_link_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::not_found(format!("Link {id} not found")))
}

/// POST /api/links
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let link = state.link_service.create(auth.principal(), req).await?;
    Ok((StatusCode::CREATED, Json(link.into())))
}

/// PUT /api/links/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let id = parse_link_id(&id)?;
    let link = state.link_service.update(auth.principal(), id, req).await?;
    Ok(Json(link.into()))
}

/// DELETE /api/links/{id}
pub async fn remove(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_link_id(&id)?;
    state.link_service.delete(auth.principal(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/{username}/links
///
/// Public listing of a user's links in display order.
pub async fn list_for_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_for_username(&username).await?;
    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

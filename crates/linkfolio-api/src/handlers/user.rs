//! User handlers — signup, public profile, profile update.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use linkfolio_core::error::AppError;
use linkfolio_service::user::{SignupRequest, UpdateUserRequest};

use crate::dto::response::UserResponse;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state.user_service.signup(req).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users/{username}
///
/// Public profile lookup; no authentication.
pub async fn get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = state.user_service.profile(&username).await?;
    Ok(Json(user.into()))
}

/// PUT /api/users/{id}
///
/// Only the addressed user may update themselves; anything else reads
/// as an unauthenticated request.
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    // An id that does not parse cannot belong to the principal.
    let target =
        Uuid::parse_str(&id).map_err(|_| AppError::authentication("Not authenticated"))?;

    let user = state
        .user_service
        .update(auth.principal(), target, req)
        .await?;

    Ok(Json(user.into()))
}

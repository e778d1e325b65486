//! Auth handlers — login, logout, refresh.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use linkfolio_core::error::AppError;
use linkfolio_service::session::LoginRequest;

use crate::dto::response::{LoginResponse, MessageResponse, RefreshResponse};
use crate::state::AppState;

/// POST /api/login
///
/// Returns the access token in the body and sets the refresh token on a
/// secure, HttpOnly cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<(CookieJar, Json<LoginResponse>), AppError> {
    let result = state.session_service.login(req).await?;

    let cookie = Cookie::build((
        state.config.auth.refresh_cookie_name.clone(),
        result.tokens.refresh_token,
    ))
    .path("/")
    .http_only(true)
    .secure(true)
    .same_site(SameSite::None)
    .build();

    Ok((
        jar.add(cookie),
        Json(LoginResponse {
            message: "Login successful".to_string(),
            access_token: result.tokens.access_token,
        }),
    ))
}

/// POST /api/logout
///
/// Always succeeds, authenticated or not; the only effect is clearing
/// the refresh cookie. Stateless tokens leave nothing to revoke
/// server-side.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    let mut cookie = Cookie::new(state.config.auth.refresh_cookie_name.clone(), "");
    cookie.set_path("/");
    cookie.set_http_only(true);

    (
        jar.remove(cookie),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// POST /api/refresh
///
/// Mints a fresh access token from the refresh cookie.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<RefreshResponse>, AppError> {
    let token = jar
        .get(&state.config.auth.refresh_cookie_name)
        .map(|c| c.value().to_string())
        .ok_or_else(|| AppError::authentication("Not authenticated"))?;

    let (access_token, _expires_at) = state.session_service.refresh(&token).await?;

    Ok(Json(RefreshResponse { access_token }))
}

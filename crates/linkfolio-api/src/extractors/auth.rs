//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! validates it, and exposes the request's [`Principal`].
//!
//! Every failure mode (missing header, non-Bearer scheme, unparseable or
//! expired token, bad signature, refresh token presented as access token)
//! collapses into one fixed 401 so the response reveals nothing about why
//! the credential was rejected.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use linkfolio_core::error::AppError;
use linkfolio_service::context::Principal;

use crate::state::AppState;

/// Extracted authenticated principal available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    /// Returns the inner [`Principal`].
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = Principal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn not_authenticated() -> AppError {
    AppError::authentication("Not authenticated")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(not_authenticated)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(not_authenticated)?;

        let claims = state
            .jwt_decoder
            .decode_access_token(token)
            .map_err(|_| not_authenticated())?;

        Ok(AuthUser(Principal::new(claims.sub, claims.username)))
    }
}

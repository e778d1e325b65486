//! Credential verification and token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use linkfolio_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use linkfolio_auth::password::CredentialVerifier;
use linkfolio_core::error::AppError;
use linkfolio_core::result::AppResult;
use linkfolio_database::store::UserStore;
use linkfolio_entity::user::User;

use crate::validate::require_text;

/// Fixed response for every credential failure. Unknown usernames and
/// wrong passwords are deliberately indistinguishable to the caller.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
}

/// Manages the session lifecycle over stateless tokens.
pub struct SessionService {
    /// User lookup.
    users: Arc<dyn UserStore>,
    /// Password verification.
    verifier: Arc<dyn CredentialVerifier>,
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for refresh validation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Hash verified against when the username is unknown, so both
    /// failure paths cost the same and reveal nothing about existence.
    fallback_hash: String,
}

impl std::fmt::Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService").finish_non_exhaustive()
    }
}

impl SessionService {
    /// Creates a new session service.
    ///
    /// Fails only if the verifier cannot produce the fallback hash.
    pub fn new(
        users: Arc<dyn UserStore>,
        verifier: Arc<dyn CredentialVerifier>,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
    ) -> AppResult<Self> {
        let fallback_hash = verifier.hash("fallback-credential-placeholder")?;
        Ok(Self {
            users,
            verifier,
            jwt_encoder,
            jwt_decoder,
            fallback_hash,
        })
    }

    /// Performs the login flow:
    ///
    /// 1. Validate the request fields
    /// 2. Look up the user by username
    /// 3. Verify the password (against the fallback hash on a miss)
    /// 4. Mint the access + refresh token pair
    pub async fn login(&self, req: LoginRequest) -> AppResult<LoginResult> {
        let username = require_text(req.username, "username required")?;
        let password = require_text(req.password, "password required")?;

        let user = self.users.find_by_username(&username).await?;

        let stored_hash = user
            .as_ref()
            .map(|u| u.password_hash.as_str())
            .unwrap_or(&self.fallback_hash);
        let password_valid = self.verifier.verify(&password, stored_hash)?;

        let Some(user) = user else {
            warn!(%username, "Login attempt for unknown username");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !password_valid {
            warn!(user_id = %user.id, "Login attempt with wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let tokens = self
            .jwt_encoder
            .generate_token_pair(user.id, &user.username)?;

        info!(user_id = %user.id, "Login successful");

        Ok(LoginResult { tokens, user })
    }

    /// Mints a fresh access token from a valid refresh token.
    ///
    /// Any decode failure, and a subject that no longer exists, report
    /// identically as an unauthenticated request.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(String, DateTime<Utc>)> {
        let claims = self
            .jwt_decoder
            .decode_refresh_token(refresh_token)
            .map_err(|_| AppError::authentication("Not authenticated"))?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::authentication("Not authenticated"))?;

        let (token, expires_at) = self
            .jwt_encoder
            .generate_access_token(user.id, &user.username)?;

        info!(user_id = %user.id, "Access token refreshed");

        Ok((token, expires_at))
    }
}

//! User operations — self-registration, profile lookup, profile updates.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use linkfolio_auth::password::CredentialVerifier;
use linkfolio_core::error::AppError;
use linkfolio_core::result::AppResult;
use linkfolio_database::store::UserStore;
use linkfolio_entity::user::{CreateUser, UpdateUser, User};

use crate::context::Principal;
use crate::validate::require_text;

/// Signup request with every field optional for ordered validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    /// Display name.
    pub name: Option<String>,
    /// Desired username.
    pub username: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Profile update request; absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// New display name.
    pub name: Option<String>,
    /// New username.
    pub username: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
}

/// Handles user registration and profile operations.
pub struct UserService {
    /// User persistence.
    users: Arc<dyn UserStore>,
    /// Password hashing.
    verifier: Arc<dyn CredentialVerifier>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish_non_exhaustive()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(users: Arc<dyn UserStore>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { users, verifier }
    }

    /// Registers a new user.
    ///
    /// Fields are checked in order (`name`, `username`, `email`,
    /// `password`); the password is hashed before the insert, and the
    /// store's uniqueness enforcement is the only duplicate check.
    pub async fn signup(&self, req: SignupRequest) -> AppResult<User> {
        let name = require_text(req.name, "name required")?;
        let username = require_text(req.username, "username required")?;
        let email = require_text(req.email, "email required")?;
        let password = require_text(req.password, "password required")?;

        let password_hash = self.verifier.hash(&password)?;

        let user = self
            .users
            .insert(&CreateUser {
                name,
                username,
                email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User signed up");

        Ok(user)
    }

    /// Looks up a user by username for the public profile page.
    pub async fn profile(&self, username: &str) -> AppResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User '{username}' not found")))
    }

    /// Updates a user's own profile.
    ///
    /// A principal addressing any other user is rejected exactly like an
    /// unauthenticated request, so valid user ids cannot be probed.
    pub async fn update(
        &self,
        principal: &Principal,
        target: Uuid,
        req: UpdateUserRequest,
    ) -> AppResult<User> {
        if !principal.owns(target) {
            return Err(AppError::authentication("Not authenticated"));
        }

        let password_hash = match req.password {
            Some(p) if !p.trim().is_empty() => Some(self.verifier.hash(&p)?),
            _ => None,
        };

        let user = self
            .users
            .update(&UpdateUser {
                id: target,
                name: req.name,
                username: req.username,
                email: req.email,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "Profile updated");

        Ok(user)
    }
}

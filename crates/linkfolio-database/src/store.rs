//! Store traits for the two persistent resource types.
//!
//! Services depend on these traits rather than on a concrete backend, so
//! business logic is testable against the in-memory implementations in
//! [`crate::repositories::memory`].
//!
//! Uniqueness of `username` and `email` is part of the store contract:
//! implementations enforce it atomically (unique index in Postgres, a
//! single write-lock critical section in memory) and translate violations
//! into the validation errors below. Callers never pre-check.

use async_trait::async_trait;
use uuid::Uuid;

use linkfolio_core::AppError;
use linkfolio_core::result::AppResult;
use linkfolio_entity::link::{CreateLink, Link, UpdateLink};
use linkfolio_entity::user::{CreateUser, UpdateUser, User};

/// Persistence operations for [`User`] records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Find a user by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new user. Fails with a validation error on a duplicate
    /// username or email.
    async fn insert(&self, data: &CreateUser) -> AppResult<User>;

    /// Apply the non-`None` fields of `data` to the addressed user and
    /// return the updated record. Uniqueness violations translate the
    /// same way as on insert.
    async fn update(&self, data: &UpdateUser) -> AppResult<User>;

    /// Count total users.
    async fn count(&self) -> AppResult<u64>;
}

/// Persistence operations for [`Link`] records.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Find a link by primary key.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Link>>;

    /// List an owner's links in display order (`position` ascending,
    /// ties broken by creation order).
    async fn find_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Link>>;

    /// Insert a new link.
    async fn insert(&self, data: &CreateLink) -> AppResult<Link>;

    /// Replace a link's mutable fields and return the updated record.
    async fn update(&self, data: &UpdateLink) -> AppResult<Link>;

    /// Delete a link by ID. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Count total links.
    async fn count(&self) -> AppResult<u64>;
}

/// Validation error for a duplicate username, naming field and value.
pub(crate) fn username_taken(username: &str) -> AppError {
    AppError::validation(format!("username '{username}' is already taken"))
}

/// Validation error for a duplicate email, naming field and value.
pub(crate) fn email_taken(email: &str) -> AppError {
    AppError::validation(format!("email '{email}' is already taken"))
}

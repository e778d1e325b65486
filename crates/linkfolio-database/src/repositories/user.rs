//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use linkfolio_core::error::{AppError, ErrorKind};
use linkfolio_core::result::AppResult;
use linkfolio_entity::user::{CreateUser, UpdateUser, User};

use crate::store::{UserStore, email_taken, username_taken};

/// PostgreSQL-backed [`UserStore`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Translate a unique-index violation into the validation error naming
    /// the field and offending value; anything else is a database error.
    fn translate_unique(e: sqlx::Error, username: Option<&str>, email: Option<&str>) -> AppError {
        match &e {
            sqlx::Error::Database(db_err) if db_err.constraint() == Some("users_username_key") => {
                username_taken(username.unwrap_or_default())
            }
            sqlx::Error::Database(db_err) if db_err.constraint() == Some("users_email_key") => {
                email_taken(email.unwrap_or_default())
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to write user", e),
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    async fn insert(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, username, email, password_hash) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::translate_unique(e, Some(&data.username), Some(&data.email)))
    }

    async fn update(&self, data: &UpdateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET name = COALESCE($2, name), \
                              username = COALESCE($3, username), \
                              email = COALESCE($4, email), \
                              password_hash = COALESCE($5, password_hash), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.username)
        .bind(&data.email)
        .bind(&data.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::translate_unique(e, data.username.as_deref(), data.email.as_deref()))?
        .ok_or_else(|| AppError::not_found(format!("User {} not found", data.id)))
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;
        Ok(count as u64)
    }
}

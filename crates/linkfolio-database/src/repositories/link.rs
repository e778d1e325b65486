//! Link repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use linkfolio_core::error::{AppError, ErrorKind};
use linkfolio_core::result::AppResult;
use linkfolio_entity::link::{CreateLink, Link, UpdateLink};

use crate::store::LinkStore;

/// PostgreSQL-backed [`LinkStore`].
#[derive(Debug, Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    /// Create a new link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for LinkRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Link>> {
        sqlx::query_as::<_, Link>("SELECT * FROM links WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link by id", e))
    }

    async fn find_by_owner(&self, user_id: Uuid) -> AppResult<Vec<Link>> {
        sqlx::query_as::<_, Link>(
            "SELECT * FROM links WHERE user_id = $1 ORDER BY position ASC, created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list links", e))
    }

    async fn insert(&self, data: &CreateLink) -> AppResult<Link> {
        sqlx::query_as::<_, Link>(
            "INSERT INTO links (url, description, position, user_id) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(&data.url)
        .bind(&data.desc)
        .bind(data.position)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create link", e))
    }

    async fn update(&self, data: &UpdateLink) -> AppResult<Link> {
        sqlx::query_as::<_, Link>(
            "UPDATE links SET url = $2, description = $3, position = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.url)
        .bind(&data.desc)
        .bind(data.position)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update link", e))?
        .ok_or_else(|| AppError::not_found(format!("Link {} not found", data.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete link", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count links", e))?;
        Ok(count as u64)
    }
}

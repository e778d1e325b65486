//! Link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single curated link on a user's profile.
///
/// Links belong to exactly one owner for their whole lifetime; the owner
/// reference is set at creation and never changes. Display order among an
/// owner's links is `position` ascending, ties broken by creation order.
/// Duplicate and gapped positions are legal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Link {
    /// Unique link identifier.
    pub id: Uuid,
    /// Target URL.
    pub url: String,
    /// Short description shown on the profile.
    #[sqlx(rename = "description")]
    pub desc: String,
    /// Display order (ascending, zero is valid).
    pub position: i32,
    /// The owning user.
    #[serde(rename = "user")]
    pub user_id: Uuid,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// When the link was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLink {
    /// Target URL.
    pub url: String,
    /// Short description.
    pub desc: String,
    /// Display order.
    pub position: i32,
    /// The owning user.
    pub user_id: Uuid,
}

/// Full replacement of a link's mutable fields.
///
/// The owner is deliberately absent: it is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLink {
    /// The link ID to update.
    pub id: Uuid,
    /// New target URL.
    pub url: String,
    /// New description.
    pub desc: String,
    /// New display order.
    pub position: i32,
}

//! Response DTOs.
//!
//! Projections deliberately never carry the password hash; error bodies
//! share the `{"error": ...}` shape defined in `linkfolio-core`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use linkfolio_entity::link::Link;
use linkfolio_entity::user::User;

/// Public user projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Username.
    pub username: String,
    /// Email address.
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            email: user.email,
        }
    }
}

/// Link projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkResponse {
    /// Link ID.
    pub id: Uuid,
    /// Target URL.
    pub url: String,
    /// Short description.
    pub desc: String,
    /// Display order.
    pub position: i32,
    /// Owning user ID.
    pub user: Uuid,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            url: link.url,
            desc: link.desc,
            position: link.position,
            user: link.user_id,
        }
    }
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Success message.
    pub message: String,
    /// Short-lived access token.
    pub access_token: String,
}

/// Refresh response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// Freshly minted access token.
    pub access_token: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
}

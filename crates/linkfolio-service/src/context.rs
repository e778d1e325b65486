//! The authenticated identity attached to a request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated identity for the current request.
///
/// Derived solely from a validated access token and threaded explicitly
/// into service methods; there is no ambient "current user" state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The username (convenience field from the token claims).
    pub username: String,
}

impl Principal {
    /// Creates a new principal.
    pub fn new(user_id: Uuid, username: String) -> Self {
        Self { user_id, username }
    }

    /// Whether this principal owns the resource belonging to `owner_id`.
    pub fn owns(&self, owner_id: Uuid) -> bool {
        self.user_id == owner_id
    }
}

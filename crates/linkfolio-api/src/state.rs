//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use linkfolio_auth::jwt::JwtDecoder;
use linkfolio_core::config::AppConfig;
use linkfolio_database::store::{LinkStore, UserStore};
use linkfolio_service::link::LinkService;
use linkfolio_service::session::SessionService;
use linkfolio_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Stores ───────────────────────────────────────────────
    /// User store
    pub user_store: Arc<dyn UserStore>,
    /// Link store
    pub link_store: Arc<dyn LinkStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Session lifecycle service
    pub session_service: Arc<SessionService>,
    /// User service
    pub user_service: Arc<UserService>,
    /// Link service
    pub link_service: Arc<LinkService>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

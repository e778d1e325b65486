//! Linkfolio server — link aggregation with owner-gated curation.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use linkfolio_api::router::build_router;
use linkfolio_api::state::AppState;
use linkfolio_auth::jwt::{JwtDecoder, JwtEncoder};
use linkfolio_auth::password::{CredentialVerifier, PasswordHasher};
use linkfolio_core::config::AppConfig;
use linkfolio_core::error::AppError;
use linkfolio_database::repositories::link::LinkRepository;
use linkfolio_database::repositories::user::UserRepository;
use linkfolio_database::store::{LinkStore, UserStore};
use linkfolio_service::link::LinkService;
use linkfolio_service::session::SessionService;
use linkfolio_service::user::UserService;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration for the environment selected by `LINKFOLIO_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("LINKFOLIO_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Linkfolio v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db_pool = linkfolio_database::connection::create_pool(&config.database).await?;
    linkfolio_database::migration::run_migrations(&db_pool).await?;

    // ── Step 2: Stores ───────────────────────────────────────────
    let user_store: Arc<dyn UserStore> = Arc::new(UserRepository::new(db_pool.clone()));
    let link_store: Arc<dyn LinkStore> = Arc::new(LinkRepository::new(db_pool));

    // ── Step 3: Auth primitives ──────────────────────────────────
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Step 4: Services ─────────────────────────────────────────
    let session_service = Arc::new(SessionService::new(
        Arc::clone(&user_store),
        Arc::clone(&verifier),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
    )?);
    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_store),
        Arc::clone(&verifier),
    ));
    let link_service = Arc::new(LinkService::new(
        Arc::clone(&link_store),
        Arc::clone(&user_store),
    ));

    // ── Step 5: Router + listener ────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        user_store,
        link_store,
        jwt_decoder,
        session_service,
        user_service,
        link_service,
    };
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Linkfolio listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves when the process receives a shutdown signal.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}

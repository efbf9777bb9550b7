//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use auth::{
    AuthAppState, MemorySessionStore, PgSessionStore, PgUserRepository, SESSION_CLEANUP_INTERVAL,
    SessionBackend, attach_identity, auth_router, spawn_session_cleanup,
};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use portal::{PgPortalRepository, PortalAppState, SeedUseCase, portal_router};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ServerConfig, SessionStoreKind};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,portal=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!(max_connections = config.max_connections, "Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Session store
    let sessions = match config.session_store {
        SessionStoreKind::Postgres => SessionBackend::Postgres(PgSessionStore::new(pool.clone())),
        SessionStoreKind::Memory => SessionBackend::Memory(MemorySessionStore::new()),
    };
    if !sessions.is_durable() {
        tracing::warn!(
            backend = sessions.name(),
            "Sessions are held in process memory and are lost on restart"
        );
    }

    // Expired sessions are swept at startup and then on every tick
    let _cleanup = spawn_session_cleanup(sessions.clone(), SESSION_CLEANUP_INTERVAL);

    // Default content
    let portal_repo = Arc::new(PgPortalRepository::new(pool.clone()));
    if let Err(e) = SeedUseCase::new(portal_repo.clone()).execute().await {
        tracing::warn!(error = %e, "Seeding default content failed, continuing anyway");
    }

    if config.uses_ephemeral_secret() && sessions.is_durable() {
        tracing::warn!(
            "SESSION_SECRET is not set; a random secret is in use and stored sessions \
             stop validating after a restart"
        );
    }

    let auth_state = AuthAppState::new(
        PgUserRepository::new(pool.clone()),
        sessions,
        config.auth_config(),
    );
    let portal_state = PortalAppState { repo: portal_repo };

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Build router
    let api = auth_router(auth_state.clone())
        .merge(portal_router(portal_state))
        .layer(middleware::from_fn_with_state(
            auth_state,
            attach_identity::<PgUserRepository, SessionBackend>,
        ));

    let app = Router::new().nest("/api", api).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors),
    );

    // Start server
    tracing::info!(environment = ?config.environment, "Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Postbox Server — account and session service
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use postbox_auth::password::PasswordHasher;
use postbox_auth::session::{RefreshTokenSweeper, SessionService, secret};
use postbox_auth::token::AccessTokenCodec;
use postbox_core::config::AppConfig;
use postbox_core::error::AppError;
use postbox_core::types::id::IdGenerator;
use postbox_database::connection::DatabasePool;
use postbox_database::repositories::account::AccountRepository;
use postbox_database::repositories::refresh_token::RefreshTokenRepository;
use postbox_entity::account::AccountStore;
use postbox_entity::refresh_token::RefreshTokenStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("POSTBOX_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
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
    tracing::info!("Starting Postbox v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = Arc::new(DatabasePool::connect(&config.database).await?);
    postbox_database::migration::run_migrations(db.pool()).await?;

    // ── Stores ───────────────────────────────────────────────────
    let accounts: Arc<dyn AccountStore> = Arc::new(AccountRepository::new(db.pool().clone()));
    let refresh_tokens: Arc<dyn RefreshTokenStore> =
        Arc::new(RefreshTokenRepository::new(db.pool().clone()));

    // ── Auth components ──────────────────────────────────────────
    let signing_secret = match &config.auth.signing_secret {
        Some(secret) => secret.clone(),
        None => {
            tracing::warn!(
                "No signing secret configured; generated a random one. \
                 Access tokens will not survive a restart."
            );
            secret::generate_secret(64)
        }
    };

    let hasher = Arc::new(PasswordHasher::new());
    let codec = Arc::new(AccessTokenCodec::new(
        signing_secret.as_bytes(),
        config.auth.access_token_lifetime_seconds,
    ));
    let ids = IdGenerator::new();

    let sessions = Arc::new(SessionService::new(
        Arc::clone(&accounts),
        Arc::clone(&refresh_tokens),
        Arc::clone(&hasher),
        Arc::clone(&codec),
        ids,
        config.auth.refresh_token_lifetime_seconds,
    ));

    // ── Shutdown channel ─────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Background sweeper ───────────────────────────────────────
    let sweeper_handle = if config.sweeper.enabled {
        let sweeper = RefreshTokenSweeper::new(
            Arc::clone(&refresh_tokens),
            config.auth.refresh_token_lifetime_seconds,
            config.sweeper.interval_seconds,
        );
        let cancel = shutdown_rx.clone();
        Some(tokio::spawn(async move {
            sweeper.run(cancel).await;
        }))
    } else {
        tracing::info!("Refresh token sweeper disabled");
        None
    };

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = postbox_api::state::AppState {
        config: Arc::new(config.clone()),
        db: Arc::clone(&db),
        accounts,
        sessions,
        codec,
        hasher,
        ids,
    };

    let app = postbox_api::router::build_router(app_state);

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Postbox server listening on {addr}");

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Wait for background tasks ────────────────────────────────
    if let Some(handle) = sweeper_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(30), handle).await;
    }

    db.close().await;
    tracing::info!("Postbox server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

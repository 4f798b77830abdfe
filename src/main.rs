//! CostDeck Server — authentication and session lifecycle service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use costdeck_core::config::AppConfig;
use costdeck_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("COSTDECK_ENV").unwrap_or_else(|_| "development".to_string());

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
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CostDeck v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = costdeck_database::DatabasePool::connect(&config.database).await?;
    costdeck_database::run_migrations(db.pool()).await?;
    let db_pool = db.pool().clone();

    // ── Repositories ─────────────────────────────────────────────
    let user_repo = Arc::new(costdeck_database::repositories::UserRepository::new(
        db_pool.clone(),
    ));
    let session_repo = costdeck_database::repositories::SessionRepository::new(db_pool.clone());
    let audit_repo = costdeck_database::repositories::AuditRepository::new(db_pool.clone());

    // ── Auth system ──────────────────────────────────────────────
    tracing::info!("Initializing authentication system...");
    let password_hasher = Arc::new(costdeck_auth::PasswordHasher::new());
    let token_codec = costdeck_auth::TokenCodec::new(&config.auth);
    let lockout = costdeck_auth::LockoutPolicy::new(
        user_repo.as_ref().clone(),
        config.auth.max_login_attempts,
    );
    let session_store = Arc::new(costdeck_auth::SessionStore::new(
        session_repo.clone(),
        &config.session,
    ));
    let audit_log = Arc::new(costdeck_auth::AuditLog::new(audit_repo));
    let session_validator = Arc::new(costdeck_auth::SessionValidator::new(
        token_codec.clone(),
        session_repo.clone(),
        user_repo.as_ref().clone(),
        &config.session,
    ));
    let auth_service = Arc::new(costdeck_auth::AuthService::new(
        user_repo.as_ref().clone(),
        password_hasher.as_ref().clone(),
        token_codec,
        lockout,
        session_store.as_ref().clone(),
        audit_log.as_ref().clone(),
    ));

    // ── Shutdown channel + idle-session sweeper ──────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper_handle = spawn_idle_sweeper(session_repo.clone(), &config, shutdown_rx.clone());

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = costdeck_api::AppState {
        config: Arc::new(config.clone()),
        db: db.clone(),
        auth_service,
        session_validator,
        session_store,
        audit_log,
        password_hasher,
        user_repo,
    };

    let app = costdeck_api::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("CostDeck server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), sweeper_handle).await;
    db.close().await;

    tracing::info!("CostDeck server shut down gracefully");
    Ok(())
}

/// Periodically deactivate sessions idle past the timeout.
///
/// Validation already rejects idle sessions on access; the sweep makes the
/// stored state converge for sessions that never come back.
fn spawn_idle_sweeper(
    sessions: costdeck_database::repositories::SessionRepository,
    config: &AppConfig,
    mut shutdown: watch::Receiver<bool>,
) -> tokio::task::JoinHandle<()> {
    let sweep_interval = config.session.sweep_interval();
    let idle_timeout_minutes = config.session.idle_timeout_minutes;

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let cutoff = chrono::Utc::now() - chrono::Duration::minutes(idle_timeout_minutes);
                    match sessions.deactivate_idle_before(cutoff).await {
                        Ok(0) => {}
                        Ok(n) => tracing::info!(swept = n, "Deactivated idle sessions"),
                        Err(e) => tracing::error!("Idle session sweep failed: {e}"),
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    })
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

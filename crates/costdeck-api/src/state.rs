//! Application state shared across all handlers.

use std::sync::Arc;

use costdeck_auth::audit::AuditLog;
use costdeck_auth::password::PasswordHasher;
use costdeck_auth::service::AuthService;
use costdeck_auth::session::{SessionStore, SessionValidator};
use costdeck_core::config::AppConfig;
use costdeck_database::DatabasePool;
use costdeck_database::repositories::UserRepository;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool, used for health probes.
    pub db: DatabasePool,
    /// Login/logout orchestration.
    pub auth_service: Arc<AuthService>,
    /// Per-request session validation.
    pub session_validator: Arc<SessionValidator>,
    /// Session admission and revocation.
    pub session_store: Arc<SessionStore>,
    /// Login attempt audit log.
    pub audit_log: Arc<AuditLog>,
    /// Password hasher for admin-created credentials.
    pub password_hasher: Arc<PasswordHasher>,
    /// User repository for admin user management.
    pub user_repo: Arc<UserRepository>,
}

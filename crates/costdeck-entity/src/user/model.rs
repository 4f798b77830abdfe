use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserRole;

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    /// Argon2id hash of the password. Never serialized in API responses.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    /// False for accounts that are administratively disabled or locked
    /// out after repeated failed logins.
    pub enabled: bool,
    /// Consecutive failed login attempts since the last successful login.
    pub failed_login_attempts: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether this account has reached the lockout threshold.
    pub fn is_locked(&self, max_attempts: i32) -> bool {
        self.failed_login_attempts >= max_attempts
    }
}

/// Parameters for creating a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub enabled: bool,
}

//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use costdeck_entity::audit::LoginAttempt;
use costdeck_entity::session::Session;
use costdeck_entity::user::User;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub access_token: String,
    /// Always "bearer".
    pub token_type: String,
    /// The authenticated user.
    pub user: UserResponse,
}

/// User summary for responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub enabled: bool,
    pub failed_login_attempts: i32,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role.to_string(),
            enabled: user.enabled,
            failed_login_attempts: user.failed_login_attempts,
            created_at: user.created_at,
        }
    }
}

/// Session summary for responses. The token itself is never exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub ip_address: Option<String>,
    pub client_label: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            user_id: session.user_id,
            ip_address: session.ip_address,
            client_label: session.client_label,
            is_active: session.is_active,
            created_at: session.created_at,
            last_activity: session.last_activity,
        }
    }
}

/// Login attempt record for the admin history view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttemptResponse {
    pub id: Uuid,
    /// Null when the submitted username matched no account.
    pub user_id: Option<Uuid>,
    pub username: String,
    pub ip_address: Option<String>,
    pub client_label: String,
    pub success: bool,
    pub created_at: DateTime<Utc>,
}

impl From<LoginAttempt> for LoginAttemptResponse {
    fn from(attempt: LoginAttempt) -> Self {
        Self {
            id: attempt.id,
            user_id: attempt.user_id,
            username: attempt.username,
            ip_address: attempt.ip_address,
            client_label: attempt.client_label,
            success: attempt.success,
            created_at: attempt.created_at,
        }
    }
}

/// Count of sessions revoked by a bulk operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedResponse {
    pub revoked: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// Whether the database answered the connectivity probe.
    pub database: bool,
    pub version: String,
}

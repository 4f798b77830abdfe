//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use costdeck_entity::user::UserRole;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Username.
    #[validate(length(min = 3, max = 64))]
    pub username: String,
    /// Initial password.
    #[validate(length(min = 8))]
    pub password: String,
    /// Role; defaults to standard.
    #[serde(default)]
    pub role: Option<UserRole>,
}

/// Update user request (admin): enable/disable and role change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub enabled: Option<bool>,
    pub role: Option<UserRole>,
}

/// Password reset request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    /// New password.
    #[validate(length(min = 8))]
    pub new_password: String,
}

/// Query filter for the admin session list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionFilter {
    pub user_id: Option<Uuid>,
}

/// Query filter for login history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginHistoryFilter {
    pub user_id: Option<Uuid>,
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

fn default_history_limit() -> i64 {
    50
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An audit record of a single login attempt.
///
/// Append-only. `user_id` is `None` when the submitted username did not
/// match any account; the submitted username is still recorded verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LoginAttempt {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    /// The username as submitted, whether or not it resolved to an account.
    pub username: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub client_label: String,
    pub success: bool,
    pub created_at: DateTime<Utc>,
}

/// Parameters for recording a login attempt.
#[derive(Debug, Clone)]
pub struct CreateLoginAttempt {
    pub user_id: Option<Uuid>,
    pub username: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub client_label: String,
    pub success: bool,
}

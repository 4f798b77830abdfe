use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated session.
///
/// One row per issued access token. A session stops being usable when
/// `is_active` is flipped to false (logout, revocation, eviction or idle
/// timeout); the token itself stays valid until its expiry but is rejected
/// by the validator once the session row is inactive.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Uuid,
    /// The access token issued for this session.
    #[serde(skip_serializing)]
    pub token: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    /// Human-readable client name derived from the user agent.
    pub client_label: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Updated on every validated request (sliding inactivity window).
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Seconds since the last validated request.
    ///
    /// Second-granular on purpose: a minute-granular reading would truncate
    /// away up to 59 seconds of idleness at the timeout boundary.
    pub fn inactive_seconds(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_activity).num_seconds()
    }
}

/// Parameters for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: Uuid,
    pub token: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub client_label: String,
}

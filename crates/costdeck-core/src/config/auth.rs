//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for token signing (HMAC-SHA256).
    #[serde(default = "default_token_secret")]
    pub token_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Maximum consecutive failed login attempts before the account is locked.
    #[serde(default = "default_max_login_attempts")]
    pub max_login_attempts: i32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_ttl_minutes: default_token_ttl(),
            max_login_attempts: default_max_login_attempts(),
        }
    }
}

fn default_token_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    30
}

fn default_max_login_attempts() -> i32 {
    5
}

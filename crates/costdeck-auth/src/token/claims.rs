//! JWT claims embedded in access tokens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use costdeck_entity::user::UserRole;

/// Claims payload of an access token.
///
/// The token is self-contained; the session row, not the token, is the
/// source of truth for whether access is still allowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// Username at the time of issuance.
    pub username: String,
    /// Role at the time of issuance.
    pub role: UserRole,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Unique token ID.
    pub jti: Uuid,
}

//! Per-request session validation.

use chrono::Utc;
use costdeck_core::config::SessionConfig;
use costdeck_core::error::AppError;
use costdeck_core::result::AppResult;
use costdeck_database::repositories::{SessionRepository, UserRepository};
use costdeck_entity::session::Session;
use costdeck_entity::user::User;
use tracing::debug;

use crate::token::{Claims, TokenCodec};

/// The authenticated caller of a validated request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: User,
    pub session: Session,
    pub claims: Claims,
}

/// Validates a bearer token against the live session state.
///
/// A token alone proves nothing: the session row must still be active, the
/// sliding inactivity window must not have elapsed, and the account must
/// still be enabled. All three are re-checked on every request, so
/// revocation and disablement take effect immediately rather than at token
/// expiry.
#[derive(Debug, Clone)]
pub struct SessionValidator {
    codec: TokenCodec,
    sessions: SessionRepository,
    users: UserRepository,
    idle_timeout_seconds: i64,
}

impl SessionValidator {
    pub fn new(
        codec: TokenCodec,
        sessions: SessionRepository,
        users: UserRepository,
        config: &SessionConfig,
    ) -> Self {
        Self {
            codec,
            sessions,
            users,
            idle_timeout_seconds: config.idle_timeout_minutes * 60,
        }
    }

    /// Validate a bearer token and refresh the session's activity clock.
    pub async fn validate(&self, token: &str) -> AppResult<AuthContext> {
        let claims = self.codec.decode(token)?;

        let session = self
            .sessions
            .find_active_by_token(token)
            .await?
            .ok_or_else(|| AppError::session_revoked("Session has been revoked"))?;

        // Compared at second granularity, same as the background sweep.
        let now = Utc::now();
        if session.inactive_seconds(now) > self.idle_timeout_seconds {
            // The row is dead either way; mark it so before rejecting.
            self.sessions.deactivate(session.id).await?;
            debug!(session_id = %session.id, "Session timed out from inactivity");
            return Err(AppError::session_timed_out(
                "Session timed out due to inactivity",
            ));
        }

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::token_invalid("Invalid or expired token"))?;

        if !user.enabled {
            return Err(AppError::account_disabled("Account is disabled"));
        }

        // Last writer wins; an approximate clock is fine here.
        self.sessions.touch(session.id).await?;

        Ok(AuthContext {
            user,
            session,
            claims,
        })
    }
}

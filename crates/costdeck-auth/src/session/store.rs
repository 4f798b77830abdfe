//! Capped per-user session store.

use costdeck_core::config::SessionConfig;
use costdeck_core::error::AppError;
use costdeck_core::result::AppResult;
use costdeck_database::repositories::SessionRepository;
use costdeck_entity::session::{CreateSession, Session};
use tracing::info;
use uuid::Uuid;

use crate::client::client_label;
use crate::service::RequestMeta;

/// Session admission, listing and revocation.
///
/// Enforces the per-user concurrency cap: admitting a session that would
/// exceed it evicts the oldest active session (by creation time) for that
/// user. Admission is atomic at the store level, so concurrent logins for
/// one identity cannot overshoot the cap.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: SessionRepository,
    max_active: i64,
}

impl SessionStore {
    pub fn new(sessions: SessionRepository, config: &SessionConfig) -> Self {
        Self {
            sessions,
            max_active: config.max_active_sessions,
        }
    }

    /// Admit a freshly issued session, evicting the oldest if at the cap.
    pub async fn admit(
        &self,
        user_id: Uuid,
        token: &str,
        meta: &RequestMeta,
    ) -> AppResult<Session> {
        let session = self
            .sessions
            .admit(
                &CreateSession {
                    user_id,
                    token: token.to_string(),
                    ip_address: meta.ip_address.clone(),
                    user_agent: meta.user_agent.clone(),
                    client_label: client_label(meta.user_agent.as_deref()).to_string(),
                },
                self.max_active,
            )
            .await?;

        info!(%user_id, session_id = %session.id, "Session admitted");
        Ok(session)
    }

    /// Active sessions for one user, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Session>> {
        self.sessions.find_active_by_user(user_id).await
    }

    /// All active sessions across users (admin view).
    pub async fn list_all(&self) -> AppResult<Vec<Session>> {
        self.sessions.find_all_active().await
    }

    /// Revoke one session by ID.
    ///
    /// Unknown IDs are an error; revoking a session that exists but is
    /// already inactive succeeds (idempotent).
    pub async fn revoke(&self, session_id: Uuid) -> AppResult<bool> {
        self.sessions
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Session {session_id} not found")))?;

        let revoked = self.sessions.deactivate(session_id).await?;
        if revoked {
            info!(%session_id, "Session revoked");
        }
        Ok(revoked)
    }

    /// Revoke whichever session carries the given token. Idempotent: a
    /// token that matches no active session is not an error.
    pub async fn revoke_by_token(&self, token: &str) -> AppResult<bool> {
        self.sessions.deactivate_by_token(token).await
    }

    /// Revoke every active session for a user. Returns the count revoked.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let revoked = self.sessions.deactivate_all_by_user(user_id).await?;
        info!(%user_id, revoked, "All user sessions revoked");
        Ok(revoked)
    }
}

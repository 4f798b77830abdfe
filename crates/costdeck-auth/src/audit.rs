//! Append-only login audit log.

use costdeck_core::result::AppResult;
use costdeck_database::repositories::AuditRepository;
use costdeck_entity::audit::{CreateLoginAttempt, LoginAttempt};
use uuid::Uuid;

use crate::client::client_label;
use crate::service::RequestMeta;

/// Records every login attempt, successful or not.
///
/// Attempts against unknown usernames are recorded with no identity; the
/// submitted username is kept verbatim so probing is visible in history.
#[derive(Debug, Clone)]
pub struct AuditLog {
    repo: AuditRepository,
}

impl AuditLog {
    pub fn new(repo: AuditRepository) -> Self {
        Self { repo }
    }

    /// Append one attempt record.
    pub async fn record(
        &self,
        user_id: Option<Uuid>,
        username: &str,
        meta: &RequestMeta,
        success: bool,
    ) -> AppResult<LoginAttempt> {
        self.repo
            .record(&CreateLoginAttempt {
                user_id,
                username: username.to_string(),
                ip_address: meta.ip_address.clone(),
                user_agent: meta.user_agent.clone(),
                client_label: client_label(meta.user_agent.as_deref()).to_string(),
                success,
            })
            .await
    }

    /// Recent attempts, newest first, optionally filtered by user.
    pub async fn history(
        &self,
        user_id: Option<Uuid>,
        limit: i64,
    ) -> AppResult<Vec<LoginAttempt>> {
        self.repo.find_recent(user_id, limit).await
    }
}

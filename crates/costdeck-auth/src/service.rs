//! Login and logout orchestration.

use costdeck_core::error::AppError;
use costdeck_core::result::AppResult;
use costdeck_database::repositories::UserRepository;
use costdeck_entity::session::Session;
use costdeck_entity::user::User;
use tracing::{info, warn};

use crate::audit::AuditLog;
use crate::lockout::{FailureOutcome, LockoutPolicy};
use crate::password::PasswordHasher;
use crate::session::SessionStore;
use crate::token::TokenCodec;

/// Request metadata captured for sessions and the audit log.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
    pub session: Session,
}

/// Orchestrates a login end to end: credential check, lockout accounting,
/// token issuance, session admission and audit logging.
#[derive(Debug, Clone)]
pub struct AuthService {
    users: UserRepository,
    hasher: PasswordHasher,
    codec: TokenCodec,
    lockout: LockoutPolicy,
    store: SessionStore,
    audit: AuditLog,
}

impl AuthService {
    pub fn new(
        users: UserRepository,
        hasher: PasswordHasher,
        codec: TokenCodec,
        lockout: LockoutPolicy,
        store: SessionStore,
        audit: AuditLog,
    ) -> Self {
        Self {
            users,
            hasher,
            codec,
            lockout,
            store,
            audit,
        }
    }

    /// Attempt a login with submitted credentials.
    ///
    /// Every attempt lands in the audit log, including those against
    /// usernames that match no account. The response for an unknown
    /// username is indistinguishable from a wrong password.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        meta: &RequestMeta,
    ) -> AppResult<LoginOutcome> {
        let Some(user) = self.users.find_by_username(username).await? else {
            self.audit.record(None, username, meta, false).await?;
            return Err(AppError::invalid_credentials("Invalid username or password"));
        };

        if self.lockout.is_locked(&user) {
            self.audit.record(Some(user.id), username, meta, false).await?;
            return Err(AppError::account_locked(
                "Account locked due to too many failed login attempts",
            ));
        }

        if !user.enabled {
            self.audit.record(Some(user.id), username, meta, false).await?;
            return Err(AppError::account_disabled("Account is disabled"));
        }

        if !self.hasher.verify_password(password, &user.password_hash)? {
            let outcome = self.lockout.record_failure(user.id).await?;
            self.audit.record(Some(user.id), username, meta, false).await?;

            return Err(match outcome {
                FailureOutcome::Locked => {
                    warn!(user_id = %user.id, "Login failed; account now locked");
                    AppError::account_locked(
                        "Account locked due to too many failed login attempts",
                    )
                }
                FailureOutcome::AttemptsRemaining(remaining) => AppError::invalid_credentials(
                    format!("Invalid credentials. {remaining} attempts remaining."),
                ),
            });
        }

        self.lockout.record_success(user.id).await?;

        let (token, _claims) = self.codec.issue(&user)?;
        let session = self.store.admit(user.id, &token, meta).await?;
        self.audit.record(Some(user.id), username, meta, true).await?;

        info!(user_id = %user.id, session_id = %session.id, "Login successful");
        Ok(LoginOutcome {
            token,
            user,
            session,
        })
    }

    /// Log out by bearer token.
    ///
    /// Deliberately gateless: a token that is expired or already revoked
    /// still yields a successful logout, so the operation is idempotent.
    pub async fn logout(&self, token: &str) -> AppResult<()> {
        self.store.revoke_by_token(token).await?;
        Ok(())
    }
}

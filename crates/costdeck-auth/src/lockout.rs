//! Failed-login lockout policy.

use costdeck_core::result::AppResult;
use costdeck_database::repositories::UserRepository;
use costdeck_entity::user::User;
use tracing::warn;
use uuid::Uuid;

/// Outcome of recording a failed login against the lockout policy.
#[derive(Debug, Clone, Copy)]
pub enum FailureOutcome {
    /// Attempt recorded; this many attempts remain before lockout.
    AttemptsRemaining(i32),
    /// The threshold was reached and the account is now locked.
    Locked,
}

/// Counts consecutive failed logins and locks accounts at a threshold.
///
/// Locking is sticky: a locked account stays locked until an operator
/// re-enables it or resets the password. Time alone never unlocks it.
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    users: UserRepository,
    max_attempts: i32,
}

impl LockoutPolicy {
    pub fn new(users: UserRepository, max_attempts: i32) -> Self {
        Self {
            users,
            max_attempts,
        }
    }

    /// Whether the account has reached the lockout threshold.
    pub fn is_locked(&self, user: &User) -> bool {
        user.is_locked(self.max_attempts)
    }

    /// Record a failed login. Increment and conditional lock happen in a
    /// single statement, so concurrent failures cannot slip past the
    /// threshold.
    pub async fn record_failure(&self, user_id: Uuid) -> AppResult<FailureOutcome> {
        let outcome = self
            .users
            .record_failed_attempt(user_id, self.max_attempts)
            .await?;

        if outcome.failed_login_attempts >= self.max_attempts {
            warn!(
                %user_id,
                attempts = outcome.failed_login_attempts,
                "Account locked after repeated failed logins"
            );
            Ok(FailureOutcome::Locked)
        } else {
            Ok(FailureOutcome::AttemptsRemaining(
                self.max_attempts - outcome.failed_login_attempts,
            ))
        }
    }

    /// Clear the counter after a successful authentication.
    pub async fn record_success(&self, user_id: Uuid) -> AppResult<()> {
        self.users.reset_failed_attempts(user_id).await
    }
}

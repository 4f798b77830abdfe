//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use costdeck_core::error::{AppError, ErrorKind};
use costdeck_core::result::AppResult;
use costdeck_core::types::pagination::{PageRequest, PageResponse};
use costdeck_entity::user::{CreateUser, User, UserRole};

/// Outcome of recording a failed login attempt.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct FailedAttemptOutcome {
    /// Attempt count after the increment.
    pub failed_login_attempts: i32,
    /// Whether the account is still enabled after the increment.
    pub enabled: bool,
}

/// Repository for user account operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Find a user by username.
    pub async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    /// List users with pagination (admin view).
    pub async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<User>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count users", e))?;

        let users = sqlx::query_as::<_, User>(
            "SELECT * FROM users ORDER BY created_at ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))?;

        Ok(PageResponse::new(
            users,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password_hash, role, enabled) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.password_hash)
        .bind(data.role)
        .bind(data.enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::conflict(format!("Username '{}' is already taken", data.username))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create user", e)
            }
        })
    }

    /// Update a user's enabled flag and/or role (admin operation).
    ///
    /// Re-enabling a disabled account resets the failed attempt counter, so
    /// an unlocked user starts from a clean slate.
    pub async fn update(
        &self,
        id: Uuid,
        enabled: Option<bool>,
        role: Option<UserRole>,
    ) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET \
                 enabled = COALESCE($2, enabled), \
                 role = COALESCE($3, role), \
                 failed_login_attempts = CASE \
                     WHEN COALESCE($2, enabled) AND NOT enabled THEN 0 \
                     ELSE failed_login_attempts END, \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(enabled)
        .bind(role)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update user", e))?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Record a failed login attempt and lock the account if the threshold
    /// is reached.
    ///
    /// Single UPDATE so concurrent failures cannot lose increments or leave
    /// the account unlocked past the threshold.
    pub async fn record_failed_attempt(
        &self,
        id: Uuid,
        max_attempts: i32,
    ) -> AppResult<FailedAttemptOutcome> {
        sqlx::query_as::<_, FailedAttemptOutcome>(
            "UPDATE users SET \
                 failed_login_attempts = failed_login_attempts + 1, \
                 enabled = enabled AND (failed_login_attempts + 1 < $2), \
                 updated_at = NOW() \
             WHERE id = $1 \
             RETURNING failed_login_attempts, enabled",
        )
        .bind(id)
        .bind(max_attempts)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record login attempt", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Reset the failed attempt counter after a successful login.
    pub async fn reset_failed_attempts(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE users SET failed_login_attempts = 0, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to reset login attempts", e)
        })?;
        Ok(())
    }

    /// Reset a user's password (admin operation).
    ///
    /// In one transaction: store the new hash, zero the attempt counter,
    /// re-enable the account and revoke every active session. A credential
    /// change must leave no session alive under the old credential.
    pub async fn reset_password(&self, id: Uuid, new_password_hash: &str) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let updated = sqlx::query(
            "UPDATE users SET \
                 password_hash = $2, \
                 failed_login_attempts = 0, \
                 enabled = TRUE, \
                 updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(new_password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reset password", e))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {id} not found")));
        }

        let revoked = sqlx::query(
            "UPDATE sessions SET is_active = FALSE WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke user sessions", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(revoked.rows_affected())
    }
}

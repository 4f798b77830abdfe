//! Session repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use costdeck_core::error::{AppError, ErrorKind};
use costdeck_core::result::AppResult;
use costdeck_entity::session::{CreateSession, Session};

/// Repository for session lifecycle operations.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a session by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// Find the active session carrying the given token.
    pub async fn find_active_by_token(&self, token: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE token = $1 AND is_active = TRUE",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find session by token", e)
        })
    }

    /// Admit a new session for a user, evicting the oldest active sessions
    /// when the concurrency cap would be exceeded.
    ///
    /// Runs in a single transaction with a row lock on the user, so two
    /// concurrent logins for the same identity serialize and the cap holds.
    pub async fn admit(&self, data: &CreateSession, max_active: i64) -> AppResult<Session> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // Serializes concurrent admits for the same identity.
        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(data.user_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock user row", e))?
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.user_id)))?;

        let active: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sessions WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(data.user_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count active sessions", e)
        })?;

        let excess = active - (max_active - 1);
        if excess > 0 {
            sqlx::query(
                "UPDATE sessions SET is_active = FALSE WHERE id IN ( \
                     SELECT id FROM sessions WHERE user_id = $1 AND is_active = TRUE \
                     ORDER BY created_at ASC LIMIT $2)",
            )
            .bind(data.user_id)
            .bind(excess)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to evict oldest sessions", e)
            })?;
        }

        let session = sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (user_id, token, ip_address, user_agent, client_label) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.token)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .bind(&data.client_label)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create session", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(session)
    }

    /// List active sessions for one user, newest first.
    pub async fn find_active_by_user(&self, user_id: Uuid) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE user_id = $1 AND is_active = TRUE \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active sessions", e)
        })
    }

    /// List all active sessions across users (admin view).
    pub async fn find_all_active(&self) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE is_active = TRUE ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sessions", e))
    }

    /// Update the last activity timestamp. Last writer wins.
    pub async fn touch(&self, session_id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE sessions SET last_activity = NOW() WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update last activity", e)
            })?;
        Ok(())
    }

    /// Deactivate a session by ID. Idempotent: deactivating an already
    /// inactive session is not an error.
    pub async fn deactivate(&self, session_id: Uuid) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE sessions SET is_active = FALSE WHERE id = $1 AND is_active = TRUE")
                .bind(session_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to deactivate session", e)
                })?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate the session carrying the given token. Idempotent.
    pub async fn deactivate_by_token(&self, token: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE sessions SET is_active = FALSE WHERE token = $1 AND is_active = TRUE",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate session by token", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Deactivate every active session for a user. Returns the number of
    /// sessions deactivated.
    pub async fn deactivate_all_by_user(&self, user_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET is_active = FALSE WHERE user_id = $1 AND is_active = TRUE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate user sessions", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Deactivate active sessions whose last activity is before the cutoff.
    /// Used by the background idle-session sweep.
    pub async fn deactivate_idle_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET is_active = FALSE \
             WHERE is_active = TRUE AND last_activity < $1",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to sweep idle sessions", e)
        })?;
        Ok(result.rows_affected())
    }
}

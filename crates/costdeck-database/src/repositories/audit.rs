//! Login attempt audit repository.

use sqlx::PgPool;
use uuid::Uuid;

use costdeck_core::error::{AppError, ErrorKind};
use costdeck_core::result::AppResult;
use costdeck_entity::audit::{CreateLoginAttempt, LoginAttempt};

/// Repository for the append-only login attempt log.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Append a login attempt record.
    pub async fn record(&self, data: &CreateLoginAttempt) -> AppResult<LoginAttempt> {
        sqlx::query_as::<_, LoginAttempt>(
            "INSERT INTO login_attempts (user_id, username, ip_address, user_agent, client_label, success) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.username)
        .bind(&data.ip_address)
        .bind(&data.user_agent)
        .bind(&data.client_label)
        .bind(data.success)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record login attempt", e))
    }

    /// Recent login attempts, newest first, optionally filtered by user.
    pub async fn find_recent(
        &self,
        user_id: Option<Uuid>,
        limit: i64,
    ) -> AppResult<Vec<LoginAttempt>> {
        sqlx::query_as::<_, LoginAttempt>(
            "SELECT * FROM login_attempts \
             WHERE ($1::uuid IS NULL OR user_id = $1) \
             ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query login history", e)
        })
    }
}

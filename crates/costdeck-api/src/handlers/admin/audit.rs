//! Admin login history handler.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::LoginHistoryFilter;
use crate::dto::response::{ApiResponse, LoginAttemptResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::require_admin;
use crate::state::AppState;

/// Hard cap on login history page size.
const MAX_HISTORY_LIMIT: i64 = 500;

/// GET /api/admin/login-history
pub async fn login_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<LoginHistoryFilter>,
) -> Result<Json<ApiResponse<Vec<LoginAttemptResponse>>>, ApiError> {
    require_admin(&auth)?;

    let limit = filter.limit.clamp(1, MAX_HISTORY_LIMIT);
    let attempts = state.audit_log.history(filter.user_id, limit).await?;

    Ok(Json(ApiResponse::ok(
        attempts
            .into_iter()
            .map(LoginAttemptResponse::from)
            .collect(),
    )))
}

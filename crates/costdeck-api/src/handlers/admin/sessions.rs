//! Admin session management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::dto::request::SessionFilter;
use crate::dto::response::{ApiResponse, MessageResponse, RevokedResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::require_admin;
use crate::state::AppState;

/// GET /api/admin/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(filter): Query<SessionFilter>,
) -> Result<Json<ApiResponse<Vec<SessionResponse>>>, ApiError> {
    require_admin(&auth)?;

    let sessions = match filter.user_id {
        Some(user_id) => state.session_store.list_for_user(user_id).await?,
        None => state.session_store.list_all().await?,
    };
    Ok(Json(ApiResponse::ok(
        sessions.into_iter().map(SessionResponse::from).collect(),
    )))
}

/// POST /api/admin/sessions/{id}/revoke
///
/// Revoking an already-inactive session still succeeds; an ID that
/// matches no session at all is a 404.
pub async fn revoke_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_admin(&auth)?;

    state.session_store.revoke(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Session revoked".to_string(),
    })))
}

/// POST /api/admin/sessions/revoke-all/{user_id}
pub async fn revoke_all_sessions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ApiResponse<RevokedResponse>>, ApiError> {
    require_admin(&auth)?;

    let revoked = state.session_store.revoke_all_for_user(user_id).await?;
    Ok(Json(ApiResponse::ok(RevokedResponse { revoked })))
}

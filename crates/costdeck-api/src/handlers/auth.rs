//! Auth handlers — login, logout, me.

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use validator::Validate;

use costdeck_core::error::AppError;

use crate::dto::request::LoginRequest;
use crate::dto::response::{ApiResponse, LoginResponse, MessageResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, bearer_token, request_meta};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let meta = request_meta(&headers);
    let outcome = state
        .auth_service
        .login(&req.username, &req.password, &meta)
        .await?;

    Ok(Json(ApiResponse::ok(LoginResponse {
        access_token: outcome.token,
        token_type: "bearer".to_string(),
        user: UserResponse::from(outcome.user),
    })))
}

/// POST /api/auth/logout
///
/// Deliberately gateless: an expired or already-revoked token still logs
/// out successfully, and a missing token is a no-op that also succeeds.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    if let Some(token) = bearer_token(&headers) {
        state.auth_service.logout(&token).await?;
    }

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Logged out successfully".to_string(),
    })))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<ApiResponse<UserResponse>> {
    Json(ApiResponse::ok(UserResponse::from(auth.0.user)))
}

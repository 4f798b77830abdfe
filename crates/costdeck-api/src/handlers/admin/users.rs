//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;
use validator::Validate;

use costdeck_core::error::AppError;
use costdeck_core::types::pagination::{PageRequest, PageResponse};
use costdeck_entity::user::{CreateUser, UserRole};

use crate::dto::request::{CreateUserRequest, ResetPasswordRequest, UpdateUserRequest};
use crate::dto::response::{ApiResponse, RevokedResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::require_admin;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<Json<ApiResponse<PageResponse<UserResponse>>>, ApiError> {
    require_admin(&auth)?;

    let page = PageRequest::new(page.page, page.page_size);
    let users = state.user_repo.list(&page).await?;

    Ok(Json(ApiResponse::ok(PageResponse::new(
        users.items.into_iter().map(UserResponse::from).collect(),
        users.page,
        users.page_size,
        users.total_items,
    ))))
}

/// POST /api/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_admin(&auth)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let password_hash = state.password_hasher.hash_password(&req.password)?;
    let user = state
        .user_repo
        .create(&CreateUser {
            username: req.username,
            password_hash,
            role: req.role.unwrap_or(UserRole::Standard),
            enabled: true,
        })
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// PUT /api/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    require_admin(&auth)?;

    // Disabling a user must also end their live sessions.
    let user = state.user_repo.update(id, req.enabled, req.role).await?;
    if req.enabled == Some(false) {
        state.session_store.revoke_all_for_user(id).await?;
    }

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}

/// POST /api/admin/users/{id}/reset-password
///
/// Atomically stores the new hash, clears the lockout counter, re-enables
/// the account and revokes all of the user's sessions.
pub async fn reset_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<ApiResponse<RevokedResponse>>, ApiError> {
    require_admin(&auth)?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let new_hash = state.password_hasher.hash_password(&req.new_password)?;
    let revoked = state.user_repo.reset_password(id, &new_hash).await?;

    Ok(Json(ApiResponse::ok(RevokedResponse { revoked })))
}

//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use costdeck_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Newtype over [`AppError`] carrying the HTTP mapping.
///
/// Handlers return `Result<_, ApiError>`; the `?` operator converts from
/// `AppError` via `From`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::InvalidCredentials
            | ErrorKind::TokenInvalid
            | ErrorKind::SessionRevoked
            | ErrorKind::SessionTimedOut => StatusCode::UNAUTHORIZED,
            ErrorKind::AccountDisabled | ErrorKind::AccountLocked | ErrorKind::AdminRequired => {
                StatusCode::FORBIDDEN
            }
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Database | ErrorKind::Configuration | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "Internal server error");
        } else if err.kind.is_auth_decision() {
            // Expected traffic, not a server fault.
            tracing::debug!(code = %err.kind, message = %err.message, "Request rejected");
        }

        // Do not leak internals to clients.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            err.message.clone()
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

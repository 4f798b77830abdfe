//! `AuthUser` extractor — validates the bearer token against live session
//! state and injects the authenticated context.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;

use costdeck_auth::service::RequestMeta;
use costdeck_auth::session::AuthContext;
use costdeck_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller context available to handlers.
///
/// Extraction runs the full per-request gate: token decode, active-session
/// lookup, inactivity check, account check and activity refresh.
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthContext);

impl std::ops::Deref for AuthUser {
    type Target = AuthContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::token_invalid("Missing or malformed Authorization header"))?;

        let context = state.session_validator.validate(&token).await?;
        Ok(AuthUser(context))
    }
}

/// Extract the bearer token from the Authorization header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(String::from)
}

/// Capture caller IP and User-Agent for sessions and the audit log.
pub fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    RequestMeta {
        ip_address,
        user_agent,
    }
}

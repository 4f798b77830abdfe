//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
///
/// Probes the database; an unreachable store reports "degraded" rather
/// than failing the request.
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = state.db.health_check().await.unwrap_or(false);

    Json(ApiResponse::ok(HealthResponse {
        status: if database { "ok" } else { "degraded" }.to_string(),
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

//! Route definitions for the CostDeck HTTP API.
//!
//! All routes are mounted under `/api`. The router receives `AppState` and
//! passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Auth endpoints: login, logout, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
}

/// Admin-only endpoints
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(handlers::admin::users::list_users))
        .route("/admin/users", post(handlers::admin::users::create_user))
        .route(
            "/admin/users/{id}",
            put(handlers::admin::users::update_user),
        )
        .route(
            "/admin/users/{id}/reset-password",
            post(handlers::admin::users::reset_password),
        )
        .route(
            "/admin/sessions",
            get(handlers::admin::sessions::list_sessions),
        )
        .route(
            "/admin/sessions/{id}/revoke",
            post(handlers::admin::sessions::revoke_session),
        )
        .route(
            "/admin/sessions/revoke-all/{user_id}",
            post(handlers::admin::sessions::revoke_all_sessions),
        )
        .route(
            "/admin/login-history",
            get(handlers::admin::audit::login_history),
        )
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use axum::http::{HeaderValue, Method};
    use tower_http::cors::Any;

    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}

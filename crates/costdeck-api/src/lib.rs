//! # costdeck-api
//!
//! HTTP API layer for CostDeck built on Axum.
//!
//! Routes, DTOs, the `AuthUser` extractor, admin guard and the mapping of
//! domain errors to HTTP status codes.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;

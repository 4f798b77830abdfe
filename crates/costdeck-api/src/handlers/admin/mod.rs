//! Admin-only handlers.

pub mod audit;
pub mod sessions;
pub mod users;

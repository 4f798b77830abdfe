//! Database access layer: connection pool, migrations and repositories.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use migration::run_migrations;
pub use repositories::{AuditRepository, SessionRepository, UserRepository};

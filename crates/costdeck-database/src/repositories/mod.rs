//! Repository implementations for data access.

mod audit;
mod session;
mod user;

pub use audit::AuditRepository;
pub use session::SessionRepository;
pub use user::{FailedAttemptOutcome, UserRepository};

//! Authentication and session lifecycle services.
//!
//! Credential hashing, token issuance and validation, the lockout policy,
//! the capped session store, the per-request session validator, the login
//! audit log and the `AuthService` orchestrating a login end to end.

pub mod audit;
pub mod client;
pub mod lockout;
pub mod password;
pub mod service;
pub mod session;
pub mod token;

pub use audit::AuditLog;
pub use client::client_label;
pub use lockout::{FailureOutcome, LockoutPolicy};
pub use password::PasswordHasher;
pub use service::{AuthService, LoginOutcome, RequestMeta};
pub use session::{AuthContext, SessionStore, SessionValidator};
pub use token::{Claims, TokenCodec};

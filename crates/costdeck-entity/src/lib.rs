//! Domain entities for the CostDeck authentication subsystem.
//!
//! Plain data types shared between the database layer, the auth services
//! and the HTTP API. No business logic lives here.

pub mod audit;
pub mod session;
pub mod user;

pub use audit::{CreateLoginAttempt, LoginAttempt};
pub use session::{CreateSession, Session};
pub use user::{CreateUser, User, UserRole};

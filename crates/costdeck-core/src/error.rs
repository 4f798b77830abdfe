//! Unified application error types for CostDeck.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Authentication decisions carry their
//! own kinds so the HTTP layer can map them precisely and so persistent-store
//! failures are never confused with auth rejections.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// Username/password verification failed.
    InvalidCredentials,
    /// The account has been administratively disabled.
    AccountDisabled,
    /// The account was locked after too many failed login attempts.
    AccountLocked,
    /// The bearer token is malformed, unsigned, or expired.
    TokenInvalid,
    /// The session bound to the token is no longer active.
    SessionRevoked,
    /// The session exceeded the inactivity timeout.
    SessionTimedOut,
    /// The caller is not an administrator.
    AdminRequired,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl ErrorKind {
    /// Whether this kind represents an authentication/authorization decision
    /// (client must re-authenticate) rather than a server-side failure.
    pub fn is_auth_decision(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials
                | Self::AccountDisabled
                | Self::AccountLocked
                | Self::TokenInvalid
                | Self::SessionRevoked
                | Self::SessionTimedOut
                | Self::AdminRequired
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::AccountDisabled => write!(f, "ACCOUNT_DISABLED"),
            Self::AccountLocked => write!(f, "ACCOUNT_LOCKED"),
            Self::TokenInvalid => write!(f, "TOKEN_INVALID"),
            Self::SessionRevoked => write!(f, "SESSION_REVOKED"),
            Self::SessionTimedOut => write!(f, "SESSION_TIMED_OUT"),
            Self::AdminRequired => write!(f, "ADMIN_REQUIRED"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout CostDeck.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. This provides a single error type for
/// the entire application boundary.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create an account-disabled error.
    pub fn account_disabled(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountDisabled, message)
    }

    /// Create an account-locked error.
    pub fn account_locked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AccountLocked, message)
    }

    /// Create a token-invalid error.
    pub fn token_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TokenInvalid, message)
    }

    /// Create a session-revoked error.
    pub fn session_revoked(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SessionRevoked, message)
    }

    /// Create a session-timed-out error.
    pub fn session_timed_out(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SessionTimedOut, message)
    }

    /// Create an admin-required error.
    pub fn admin_required(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AdminRequired, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Internal,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

//! Authentication error types.

use std::time::Duration;
use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Account already exists for the email
    #[error("Account already exists")]
    AlreadyExists,

    /// Authentication failed. Covers both "no such account" and "wrong
    /// password" so callers cannot distinguish them (account enumeration
    /// resistance).
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Password hashing failed
    #[error("Password hashing failed")]
    Hashing,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JWT signing or verification error
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Session store error
    #[error("Session store error: {0}")]
    Session(#[from] redis::RedisError),

    /// Session store unreachable or misbehaving (non-Redis backends)
    #[error("Session store unavailable: {0}")]
    SessionUnavailable(String),

    /// The login transaction failed to commit after the session was
    /// written. Compensation has already run (best effort).
    #[error("Failed to commit login transaction: {0}")]
    Commit(#[source] sqlx::Error),

    /// Operation exceeded its deadline
    #[error("Operation canceled after {0:?}")]
    Canceled(Duration),
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database, token, and session-store errors are sanitized to prevent
    /// information disclosure about the internal system structure.
    pub fn client_message(&self) -> String {
        match self {
            // Sanitize database errors - don't expose SQL details
            AuthError::Database(_) | AuthError::Commit(_) => "Internal server error".to_string(),
            // Sanitize session store errors - don't expose backend details
            AuthError::Session(_) | AuthError::SessionUnavailable(_) => {
                "Internal server error".to_string()
            }
            // Sanitize JWT errors - don't expose token structure
            AuthError::Token(_) => "Authentication failed".to_string(),
            // All other errors are safe to expose
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

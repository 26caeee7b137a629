//! Custom error types for the mood journal
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Authentication failures
///
/// The store distinguishes an unknown user from a wrong secret. Front ends
/// are expected to present both the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential is stored for this username
    #[error("no such user: {0}")]
    NotFound(String),

    /// The username exists but the secret does not match
    #[error("secret does not match")]
    WrongSecret,
}

/// The main error type for mood journal operations
#[derive(Error, Debug)]
pub enum JournalError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected user input (blank or short credentials, bad ratings)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Registration attempted with a username already in the store
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Login failed
    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A persisted file could not be parsed
    #[error("Corrupt data in {}, line {line}: {reason}", path.display())]
    Corrupt {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// Secret hashing errors
    #[error("Hashing error: {0}")]
    Hash(String),

    /// File lock could not be acquired or released
    #[error("Lock error: {0}")]
    Lock(String),

    /// A staged change no longer matches what is on disk
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl JournalError {
    /// Create a "not found" error for a day's mood entry
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Mood entry",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is an authentication failure
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for JournalError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for JournalError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for mood journal operations
pub type JournalResult<T> = Result<T, JournalError>;

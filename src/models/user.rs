//! User identity models
//!
//! Usernames and the stored credential record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A username as typed at registration
///
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Wrap a username without applying any policy
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the username as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    /// Check the registration policy
    pub fn validate(&self, min_length: usize) -> Result<(), CredentialValidationError> {
        if self.0.is_empty() {
            return Err(CredentialValidationError::Blank);
        }
        if self.char_len() < min_length {
            return Err(CredentialValidationError::TooShort { min_length });
        }
        Ok(())
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Username {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Username {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A stored credential: username plus the transformed secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: Username,
    /// Output of the configured secret hasher, never the plaintext
    pub secret_hash: String,
}

impl Credential {
    pub fn new(username: Username, secret_hash: impl Into<String>) -> Self {
        Self {
            username,
            secret_hash: secret_hash.into(),
        }
    }
}

/// Check a plaintext secret against the registration policy
pub fn validate_secret(secret: &str, min_length: usize) -> Result<(), CredentialValidationError> {
    if secret.is_empty() {
        return Err(CredentialValidationError::Blank);
    }
    if secret.chars().count() < min_length {
        return Err(CredentialValidationError::TooShort { min_length });
    }
    Ok(())
}

/// Validation errors for usernames and secrets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    #[error("Fields cannot be blank.")]
    Blank,
    #[error("Username and password must be at least {min_length} characters.")]
    TooShort { min_length: usize },
}

impl From<CredentialValidationError> for crate::error::JournalError {
    fn from(err: CredentialValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

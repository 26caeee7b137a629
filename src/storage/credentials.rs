//! Credential repository for the shared credential file
//!
//! Manages loading and saving `username:secret` lines to user_data.txt

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::error::JournalError;
use crate::models::{Credential, Username};

use super::codec::{decode_credential, encode_credential};
use super::file_io::{read_text, write_text_atomic, FileLock};

/// Repository for credential persistence
pub struct CredentialRepository {
    path: PathBuf,
    data: RwLock<HashMap<Username, Credential>>,
}

impl CredentialRepository {
    /// Create a new credential repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Take the inter-process lock for a read-modify-write cycle
    pub fn lock(&self) -> Result<FileLock, JournalError> {
        FileLock::acquire(&self.path)
    }

    /// Load credentials from disk, replacing what is in memory
    ///
    /// A missing file leaves the store empty.
    pub fn load(&self) -> Result<(), JournalError> {
        let contents = read_text(&self.path)?.unwrap_or_default();

        let mut loaded = HashMap::new();
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let credential = decode_credential(line).map_err(|reason| JournalError::Corrupt {
                path: self.path.clone(),
                line: idx + 1,
                reason,
            })?;

            if loaded.contains_key(&credential.username) {
                warn!(
                    username = %credential.username,
                    line = idx + 1,
                    "duplicate credential line; keeping the first"
                );
                continue;
            }
            loaded.insert(credential.username.clone(), credential);
        }

        debug!(path = %self.path.display(), users = loaded.len(), "loaded credentials");

        let mut data = self.data.write().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = loaded;

        Ok(())
    }

    /// Rewrite the whole credential file
    pub fn save(&self) -> Result<(), JournalError> {
        let data = self.data.read().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut credentials: Vec<_> = data.values().collect();
        credentials.sort_by(|a, b| a.username.cmp(&b.username));

        let mut contents = String::new();
        for credential in credentials {
            contents.push_str(&encode_credential(credential));
            contents.push('\n');
        }

        write_text_atomic(&self.path, &contents)
    }

    /// Get a credential by username
    pub fn get(&self, username: &Username) -> Result<Option<Credential>, JournalError> {
        let data = self.data.read().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(username).cloned())
    }

    /// Check whether a username is present
    pub fn contains(&self, username: &Username) -> Result<bool, JournalError> {
        let data = self.data.read().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.contains_key(username))
    }

    /// Insert or update a credential in memory
    pub fn upsert(&self, credential: Credential) -> Result<(), JournalError> {
        let mut data = self.data.write().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(credential.username.clone(), credential);
        Ok(())
    }

    /// Remove a credential from memory, returning it
    pub fn remove(&self, username: &Username) -> Result<Option<Credential>, JournalError> {
        let mut data = self.data.write().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(username))
    }

    /// Count users
    pub fn count(&self) -> Result<usize, JournalError> {
        let data = self.data.read().map_err(|e| {
            JournalError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

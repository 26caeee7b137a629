//! Storage layer for the mood journal
//!
//! Line-oriented text files with atomic writes, file locking, and
//! automatic directory creation.

pub mod codec;
pub mod credentials;
pub mod file_io;
pub mod moods;

pub use credentials::CredentialRepository;
pub use file_io::{read_text, write_json_atomic, write_text_atomic, FileLock};
pub use moods::MoodLogRepository;

use crate::config::paths::JournalPaths;
use crate::error::JournalError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: JournalPaths,
    pub credentials: CredentialRepository,
    pub moods: MoodLogRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: JournalPaths) -> Result<Self, JournalError> {
        paths.ensure_directories()?;

        Ok(Self {
            credentials: CredentialRepository::new(paths.credentials_file()),
            moods: MoodLogRepository::new(paths.clone()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &JournalPaths {
        &self.paths
    }

    /// Load the credential store; mood logs are read per operation
    pub fn load_all(&self) -> Result<(), JournalError> {
        self.credentials.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        storage.load_all().unwrap();
        assert_eq!(storage.credentials.count().unwrap(), 0);
    }
}

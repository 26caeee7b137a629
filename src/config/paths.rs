//! Path management for the mood journal
//!
//! Provides XDG-compliant path resolution for settings and journal data.
//!
//! ## Path Resolution Order
//!
//! 1. `MOOD_JOURNAL_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/mood-journal` or `~/.config/mood-journal`
//! 3. Windows: `%APPDATA%\mood-journal`

use std::path::PathBuf;

use crate::error::JournalError;
use crate::models::Username;

/// Name of the shared credential file
pub const CREDENTIALS_FILE_NAME: &str = "user_data.txt";

/// Suffix appended to the encoded username to form a mood log file name
pub const MOOD_FILE_SUFFIX: &str = "_mood.txt";

/// Manages all paths used by the mood journal
#[derive(Debug, Clone)]
pub struct JournalPaths {
    /// Base directory for all journal data
    base_dir: PathBuf,
}

impl JournalPaths {
    /// Create a new JournalPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, JournalError> {
        let base_dir = if let Ok(custom) = std::env::var("MOOD_JOURNAL_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create JournalPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/mood-journal/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/mood-journal/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the shared credential file
    pub fn credentials_file(&self) -> PathBuf {
        self.data_dir().join(CREDENTIALS_FILE_NAME)
    }

    /// Get the path to a user's mood log
    pub fn mood_file(&self, username: &Username) -> PathBuf {
        self.data_dir()
            .join(format!("{}{}", encode_file_stem(username.as_str()), MOOD_FILE_SUFFIX))
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), JournalError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| JournalError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| JournalError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

/// Encode a username into a file-name-safe stem
///
/// Bytes in `[a-z0-9._-]` pass through, everything else becomes `%XX`.
/// Uppercase letters are escaped too, so usernames differing only in case
/// stay distinct on case-insensitive filesystems.
pub fn encode_file_stem(username: &str) -> String {
    let mut out = String::with_capacity(username.len());
    for byte in username.bytes() {
        match byte {
            b'a'..=b'z' | b'0'..=b'9' | b'.' | b'_' | b'-' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    // "." and ".." would resolve to directories
    if out.chars().all(|c| c == '.') {
        out = out.replace('.', "%2E");
    }
    out
}

/// Resolve the default data directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, JournalError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                JournalError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("mood-journal"))
}

/// Resolve the default data directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, JournalError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| JournalError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("mood-journal"))
}

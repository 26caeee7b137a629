//! User settings for the mood journal
//!
//! Manages preferences including the credential policy, the secret hashing
//! scheme, history ordering and the same-day overwrite policy.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::JournalPaths;
use crate::crypto::HasherKind;
use crate::error::JournalError;
use crate::models::HistoryOrder;
use crate::services::OverwritePolicy;
use crate::storage::file_io::write_json_atomic;

/// Minimum length (in characters) of usernames and secrets
pub const DEFAULT_MIN_CREDENTIAL_LENGTH: usize = 5;

/// Names accepted by [`Settings::set`]
pub const SETTING_KEYS: &[&str] = &[
    "min_credential_length",
    "secret_hasher",
    "history_order",
    "overwrite_policy",
    "date_format",
];

/// User settings for the mood journal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Minimum username and secret length at registration
    #[serde(default = "default_min_credential_length")]
    pub min_credential_length: usize,

    /// Transform applied to secrets before they are stored
    #[serde(default)]
    pub secret_hasher: HasherKind,

    /// Order in which history is listed
    #[serde(default)]
    pub history_order: HistoryOrder,

    /// What to do when a mood is submitted for a day that already has one
    #[serde(default)]
    pub overwrite_policy: OverwritePolicy,

    /// Date format preference for display (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_min_credential_length() -> usize {
    DEFAULT_MIN_CREDENTIAL_LENGTH
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            min_credential_length: default_min_credential_length(),
            secret_hasher: HasherKind::default(),
            history_order: HistoryOrder::default(),
            overwrite_policy: OverwritePolicy::default(),
            date_format: default_date_format(),
        }
    }
}

/// Reject strftime patterns chrono cannot render
fn validate_date_format(format: &str) -> Result<(), JournalError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(JournalError::Config(format!(
            "Invalid date_format '{}'",
            format
        )));
    }
    Ok(())
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    ///
    /// Nothing is written; `save` persists the settings once something changes.
    pub fn load_or_default(paths: &JournalPaths) -> Result<Self, JournalError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                JournalError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                JournalError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if settings.min_credential_length == 0 {
                return Err(JournalError::Config(
                    "min_credential_length must be at least 1".into(),
                ));
            }
            validate_date_format(&settings.date_format)?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Change one setting by name, validating the new value
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), JournalError> {
        let invalid = |reason: String| {
            JournalError::Config(format!("Invalid value '{}' for {}: {}", value, key, reason))
        };

        match key {
            "min_credential_length" => {
                let length: usize = value.parse().map_err(|e| invalid(format!("{}", e)))?;
                if length == 0 {
                    return Err(invalid("must be at least 1".into()));
                }
                self.min_credential_length = length;
            }
            "secret_hasher" => self.secret_hasher = value.parse().map_err(invalid)?,
            "history_order" => self.history_order = value.parse().map_err(invalid)?,
            "overwrite_policy" => self.overwrite_policy = value.parse().map_err(invalid)?,
            "date_format" => {
                validate_date_format(value)?;
                self.date_format = value.to_string();
            }
            other => {
                return Err(JournalError::Config(format!(
                    "Unknown setting '{}'. Expected one of: {}",
                    other,
                    SETTING_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &JournalPaths) -> Result<(), JournalError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.min_credential_length, 5);
        assert_eq!(settings.secret_hasher, HasherKind::Argon2);
        assert_eq!(settings.history_order, HistoryOrder::Insertion);
        assert_eq!(settings.overwrite_policy, OverwritePolicy::Ask);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.history_order = HistoryOrder::Chronological;
        settings.secret_hasher = HasherKind::Checksum;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.history_order, HistoryOrder::Chronological);
        assert_eq!(loaded.secret_hasher, HasherKind::Checksum);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"overwrite_policy": "always"}"#).unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.overwrite_policy, OverwritePolicy::Always);
        assert_eq!(loaded.min_credential_length, 5);
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        assert!(Settings::load_or_default(&paths).is_err());
    }

    #[test]
    fn test_zero_min_length_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = JournalPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"min_credential_length": 0}"#).unwrap();

        assert!(Settings::load_or_default(&paths).is_err());
    }

    #[test]
    fn test_set_by_name() {
        let mut settings = Settings::default();

        settings.set("history_order", "chronological").unwrap();
        settings.set("secret_hasher", "checksum").unwrap();
        settings.set("overwrite_policy", "never").unwrap();
        settings.set("min_credential_length", "8").unwrap();
        settings.set("date_format", "%d/%m/%Y").unwrap();

        assert_eq!(settings.history_order, HistoryOrder::Chronological);
        assert_eq!(settings.secret_hasher, HasherKind::Checksum);
        assert_eq!(settings.overwrite_policy, OverwritePolicy::Never);
        assert_eq!(settings.min_credential_length, 8);
        assert_eq!(settings.date_format, "%d/%m/%Y");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();

        assert!(settings.set("history_order", "random").is_err());
        assert!(settings.set("secret_hasher", "md5").is_err());
        assert!(settings.set("min_credential_length", "0").is_err());
        assert!(settings.set("min_credential_length", "five").is_err());
        assert!(settings.set("date_format", "%Q").is_err());
        assert!(settings.set("colour", "blue").is_err());

        assert_eq!(settings.min_credential_length, 5);
        assert_eq!(settings.history_order, HistoryOrder::Insertion);
    }
}

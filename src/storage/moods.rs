//! Mood log repository
//!
//! One text file per user, one line per entry. Logs are read and rewritten
//! whole on every operation; nothing is cached between calls.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::paths::JournalPaths;
use crate::error::JournalError;
use crate::models::{MoodEntry, Username};

use super::codec::{decode_mood, encode_mood, is_mood_record};
use super::file_io::{read_text, write_text_atomic, FileLock};

/// Repository for per-user mood logs
pub struct MoodLogRepository {
    paths: JournalPaths,
}

impl MoodLogRepository {
    pub fn new(paths: JournalPaths) -> Self {
        Self { paths }
    }

    /// Path of a user's log
    pub fn path_for(&self, username: &Username) -> PathBuf {
        self.paths.mood_file(username)
    }

    /// Take the inter-process lock on a user's log
    pub fn lock(&self, username: &Username) -> Result<FileLock, JournalError> {
        FileLock::acquire(self.path_for(username))
    }

    /// Check whether a user's log file exists
    pub fn exists(&self, username: &Username) -> bool {
        self.path_for(username).exists()
    }

    /// Load a user's entries in file order; `None` if there is no log
    pub fn load(&self, username: &Username) -> Result<Option<Vec<MoodEntry>>, JournalError> {
        let path = self.path_for(username);
        let Some(contents) = read_text(&path)? else {
            debug!(user = %username, "no mood log");
            return Ok(None);
        };

        let entries = parse_mood_log(&contents, &path)?;
        debug!(user = %username, entries = entries.len(), "loaded mood log");
        Ok(Some(entries))
    }

    /// Replace a user's log with exactly these entries
    pub fn save(&self, username: &Username, entries: &[MoodEntry]) -> Result<(), JournalError> {
        write_text_atomic(self.path_for(username), &render_mood_log(entries))
    }

    /// Create an empty log unless one already exists
    pub fn create_empty(&self, username: &Username) -> Result<(), JournalError> {
        if self.exists(username) {
            return Ok(());
        }
        write_text_atomic(self.path_for(username), "")
    }
}

/// Render entries as log file contents
pub fn render_mood_log(entries: &[MoodEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&encode_mood(entry));
        out.push('\n');
    }
    out
}

/// Parse log file contents
///
/// Blank lines before the first record and at the end of the file are
/// ignored. Any other line that does not start a record continues the
/// previous record's reason, which is how unescaped multi-line reasons
/// were stored by older writers.
pub fn parse_mood_log(contents: &str, path: &Path) -> Result<Vec<MoodEntry>, JournalError> {
    let mut entries: Vec<MoodEntry> = Vec::new();
    let lines: Vec<&str> = contents.lines().collect();
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map_or(0, |i| i + 1);

    for (idx, line) in lines[..end].iter().enumerate() {
        if is_mood_record(line) {
            let entry = decode_mood(line).map_err(|reason| JournalError::Corrupt {
                path: path.to_path_buf(),
                line: idx + 1,
                reason,
            })?;
            entries.push(entry);
            continue;
        }

        match entries.last_mut() {
            Some(previous) => {
                warn!(path = %path.display(), line = idx + 1, "joining legacy continuation line");
                previous.reason.push('\n');
                previous.reason.push_str(line);
            }
            None if line.trim().is_empty() => continue,
            None => {
                return Err(JournalError::Corrupt {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    reason: "text before the first mood record".into(),
                })
            }
        }
    }

    Ok(entries)
}

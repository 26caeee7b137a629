//! File I/O utilities with atomic writes and file locking
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::JournalError;

/// Append a suffix to the full file name (`a.txt` -> `a.txt.tmp`)
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Read a whole text file, returning `None` if it doesn't exist
pub fn read_text<P: AsRef<Path>>(path: P) -> Result<Option<String>, JournalError> {
    let path = path.as_ref();

    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(JournalError::Storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<(), JournalError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            JournalError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = sibling_path(path, ".tmp");

    let result = (|| {
        let file = File::create(&temp_path)
            .map_err(|e| JournalError::Storage(format!("Failed to create temp file: {}", e)))?;

        let mut writer = BufWriter::new(file);
        writer
            .write_all(contents)
            .map_err(|e| JournalError::Storage(format!("Failed to write data: {}", e)))?;
        writer
            .flush()
            .map_err(|e| JournalError::Storage(format!("Failed to flush data: {}", e)))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| JournalError::Storage(format!("Failed to sync data: {}", e)))?;

        fs::rename(&temp_path, path)
            .map_err(|e| JournalError::Storage(format!("Failed to rename temp file: {}", e)))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    }

    result
}

/// Write text to a file atomically
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), JournalError> {
    write_atomic(path, contents.as_bytes())
}

/// Write pretty JSON to a file atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), JournalError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let json = serde_json::to_vec_pretty(data)
        .map_err(|e| JournalError::Storage(format!("Failed to serialize data: {}", e)))?;
    write_atomic(path, &json)
}

/// Exclusive inter-process lock on a `<file>.lock` sidecar
///
/// Held for one load-mutate-persist cycle; released when dropped.
#[derive(Debug)]
pub struct FileLock {
    file: File,
    path: PathBuf,
}

impl FileLock {
    /// Block until the lock guarding `target` is acquired
    pub fn acquire<P: AsRef<Path>>(target: P) -> Result<Self, JournalError> {
        let path = sibling_path(target.as_ref(), ".lock");

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                JournalError::Lock(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|e| JournalError::Lock(format!("Failed to open {}: {}", path.display(), e)))?;

        if FileExt::try_lock_exclusive(&file).is_err() {
            warn!(path = %path.display(), "waiting for lock held by another process");
            FileExt::lock_exclusive(&file).map_err(|e| {
                JournalError::Lock(format!("Failed to lock {}: {}", path.display(), e))
            })?;
        }

        Ok(Self { file, path })
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

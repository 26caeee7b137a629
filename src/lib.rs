//! Mood Journal - daily mood tracking backed by plain text files
//!
//! Users register with a username and password, submit one mood rating
//! (1-10) with a free-text reason per day, and review their history.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Usernames, credentials, ratings, mood entries
//! - `crypto`: Pluggable secret hashing
//! - `storage`: Line-oriented text file storage
//! - `services`: Registration, login, and the one-entry-per-day mood log
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `mood` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use mood_journal::config::JournalPaths;
//! use mood_journal::crypto::Argon2Hasher;
//! use mood_journal::services::{AccountService, MoodService, OverwritePolicy, SystemClock};
//! use mood_journal::storage::Storage;
//!
//! let storage = Storage::new(JournalPaths::new()?)?;
//! storage.load_all()?;
//!
//! let accounts = AccountService::new(&storage, &Argon2Hasher);
//! accounts.register("alice123", "secret1")?;
//! let user = accounts.authenticate("alice123", "secret1")?;
//!
//! let moods = MoodService::new(&storage, &SystemClock);
//! let rating = "7".parse()?;
//! moods.submit_today(&user, rating, "tired", &mut OverwritePolicy::Always)?;
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{AuthError, JournalError, JournalResult};

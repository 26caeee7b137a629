//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod config;
pub mod mood;
pub mod prompt;

pub use account::{handle_account_command, AccountCommands};
pub use config::{handle_config_command, ConfigCommands};
pub use mood::{handle_mood_command, MoodCommands};

/// Shown for every failed login, whatever the reason
pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";

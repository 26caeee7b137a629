//! Account CLI commands
//!
//! Registration, login checks and password changes.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::crypto::SecretHasher;
use crate::error::JournalResult;
use crate::services::{AccountService, AuthenticatedUser};
use crate::storage::Storage;

use super::prompt::{read_new_secret, read_secret, NEW_SECRET_ENV, SECRET_ENV};

/// Account subcommands
#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Register {
        /// Username (at least 5 characters by default)
        username: String,
    },
    /// Check a username and password
    Login {
        /// Username
        username: String,
    },
    /// Change your password
    #[command(alias = "change-password")]
    Passwd {
        /// Username
        username: String,
    },
}

/// Handle an account command
pub fn handle_account_command(
    storage: &Storage,
    settings: &Settings,
    hasher: &dyn SecretHasher,
    cmd: AccountCommands,
) -> JournalResult<()> {
    let service =
        AccountService::new(storage, hasher).with_min_length(settings.min_credential_length);

    match cmd {
        AccountCommands::Register { username } => {
            let secret = read_new_secret(SECRET_ENV)?;
            service.register(&username, &secret)?;
            println!("Account created successfully!");
        }

        AccountCommands::Login { username } => {
            login(&service, &username)?;
            println!("Login successful!");
        }

        AccountCommands::Passwd { username } => {
            let current = read_secret("Current password: ", SECRET_ENV)?;
            let new_secret = read_new_secret(NEW_SECRET_ENV)?;
            service.change_secret(&username, &current, &new_secret)?;
            println!("Password changed.");
        }
    }

    Ok(())
}

/// Resolve the acting user by asking for their password
pub fn login(service: &AccountService<'_>, username: &str) -> JournalResult<AuthenticatedUser> {
    let secret = read_secret("Password: ", SECRET_ENV)?;
    service.authenticate(username, &secret)
}

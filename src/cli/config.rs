//! Config CLI commands

use clap::Subcommand;

use crate::config::{paths::JournalPaths, settings::Settings};
use crate::error::JournalResult;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show paths and settings (the default)
    Show,
    /// Change a setting and save it to config.json
    Set {
        /// Setting name, e.g. history_order
        key: String,
        /// New value
        value: String,
    },
}

/// Handle a config command
pub fn handle_config_command(
    paths: &JournalPaths,
    settings: &mut Settings,
    cmd: Option<ConfigCommands>,
) -> JournalResult<()> {
    match cmd.unwrap_or(ConfigCommands::Show) {
        ConfigCommands::Show => {
            println!("Mood Journal Configuration");
            println!("==========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Credential file:  {}", paths.credentials_file().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  min_credential_length: {}", settings.min_credential_length);
            println!("  secret_hasher:         {:?}", settings.secret_hasher);
            println!("  history_order:         {:?}", settings.history_order);
            println!("  overwrite_policy:      {:?}", settings.overwrite_policy);
            println!("  date_format:           {}", settings.date_format);
        }

        ConfigCommands::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(paths)?;
            println!("Set {} = {}", key, value);
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mood_journal::cli::{
    handle_account_command, handle_config_command, handle_mood_command, AccountCommands,
    ConfigCommands, MoodCommands, INVALID_CREDENTIALS,
};
use mood_journal::config::{paths::JournalPaths, settings::Settings};
use mood_journal::services::SystemClock;
use mood_journal::storage::Storage;
use mood_journal::JournalError;

#[derive(Parser)]
#[command(
    name = "mood",
    version,
    about = "Daily mood journal",
    long_about = "Record how you feel each day with a 1-10 rating and a short reason, \
                  and look back over your history. One entry per day; submitting again \
                  for the same day replaces the earlier entry after confirmation."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Account(AccountCommands),

    /// Mood entry commands
    #[command(subcommand)]
    Mood(MoodCommands),

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("MOOD_JOURNAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Err(JournalError::Auth(_)) => {
            eprintln!("{}", INVALID_CREDENTIALS);
            std::process::exit(1);
        }
        result => Ok(result?),
    }
}

fn run(cli: Cli) -> Result<(), JournalError> {
    let paths = JournalPaths::new()?;
    let mut settings = Settings::load_or_default(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    let hasher = settings.secret_hasher.build();
    let clock = SystemClock;

    match cli.command {
        Some(Commands::Account(cmd)) => {
            handle_account_command(&storage, &settings, hasher.as_ref(), cmd)?;
        }
        Some(Commands::Mood(cmd)) => {
            handle_mood_command(&storage, &settings, hasher.as_ref(), &clock, cmd)?;
        }
        Some(Commands::Config { action }) => {
            handle_config_command(&paths, &mut settings, action)?;
        }
        None => {
            println!("Mood Journal - record how you feel, one day at a time");
            println!();
            println!("Run 'mood --help' for usage information.");
            println!("Run 'mood register <username>' to get started.");
        }
    }

    Ok(())
}

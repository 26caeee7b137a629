//! Mood CLI commands
//!
//! Submitting today's mood and reviewing history.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::crypto::SecretHasher;
use crate::display::{format_mood_details, format_mood_history};
use crate::error::{JournalError, JournalResult};
use crate::models::{HistoryOrder, MoodEntry, Rating};
use crate::services::{
    AccountService, Clock, ConfirmOverwrite, MoodService, OverwritePolicy, UpsertOutcome,
};
use crate::storage::Storage;

use super::account::login;
use super::prompt::StdinConfirm;

/// Mood subcommands
#[derive(Subcommand)]
pub enum MoodCommands {
    /// Record how you feel today
    Submit {
        /// Username
        #[arg(short, long, env = "MOOD_JOURNAL_USER")]
        user: String,
        /// Rating from 1 to 10
        #[arg(allow_negative_numbers = true)]
        rating: String,
        /// Why you feel this way
        #[arg(short, long, default_value = "")]
        reason: String,
        /// Date of the entry (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Overwrite an existing entry for the day without asking
        #[arg(short, long, conflicts_with = "keep")]
        yes: bool,
        /// Never overwrite an existing entry for the day
        #[arg(long)]
        keep: bool,
    },
    /// Show your mood history
    History {
        /// Username
        #[arg(short, long, env = "MOOD_JOURNAL_USER")]
        user: String,
        /// Listing order: insertion or chronological
        #[arg(short, long)]
        order: Option<HistoryOrder>,
    },
    /// Show the entry for one day
    Show {
        /// Username
        #[arg(short, long, env = "MOOD_JOURNAL_USER")]
        user: String,
        /// Date of the entry (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a mood command
pub fn handle_mood_command(
    storage: &Storage,
    settings: &Settings,
    hasher: &dyn SecretHasher,
    clock: &dyn Clock,
    cmd: MoodCommands,
) -> JournalResult<()> {
    let accounts =
        AccountService::new(storage, hasher).with_min_length(settings.min_credential_length);
    let service = MoodService::new(storage, clock);

    match cmd {
        MoodCommands::Submit {
            user,
            rating,
            reason,
            date,
            yes,
            keep,
        } => {
            // Validate before asking for a password
            let rating: Rating = rating.parse()?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => clock.today(),
            };

            let user = login(&accounts, &user)?;

            let policy = if yes {
                OverwritePolicy::Always
            } else if keep {
                OverwritePolicy::Never
            } else {
                settings.overwrite_policy
            };
            let mut stdin_confirm = StdinConfirm;
            let mut fixed = policy;
            let confirm: &mut dyn ConfirmOverwrite = match policy {
                OverwritePolicy::Ask => &mut stdin_confirm,
                _ => &mut fixed,
            };

            let entry = MoodEntry::new(date, rating, reason);
            match service.append_or_replace(&user, entry, confirm)? {
                UpsertOutcome::Appended => {
                    println!("Mood recorded for {}.", date);
                }
                UpsertOutcome::Replaced { previous } => {
                    println!(
                        "Mood for {} updated (was {}/10).",
                        date, previous.rating
                    );
                }
                UpsertOutcome::Cancelled { .. } => {
                    println!("Mood will not be submitted!");
                }
            }
        }

        MoodCommands::History { user, order } => {
            let user = login(&accounts, &user)?;
            let history = service.read_all(&user)?;
            let order = order.unwrap_or(settings.history_order);

            print!(
                "{}",
                format_mood_history(history.ordered(order), &settings.date_format)
            );
        }

        MoodCommands::Show { user, date } => {
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => clock.today(),
            };
            let user = login(&accounts, &user)?;
            let entry = service.entry_on(&user, date)?;

            print!("{}", format_mood_details(&entry, &settings.date_format));
        }
    }

    Ok(())
}

fn parse_date(s: &str) -> JournalResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        JournalError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD.", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!(parse_date("01/01/2024").unwrap_err().is_validation());
        assert!(parse_date("2024-02-30").is_err());
    }
}

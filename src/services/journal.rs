//! Mood journal service
//!
//! Keeps at most one entry per user per calendar day. Submitting for a day
//! that already has an entry replaces it, but only after the caller's
//! confirmation hook agrees; a declined overwrite touches nothing on disk.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::info;

use crate::error::{JournalError, JournalResult};
use crate::models::{MoodEntry, MoodHistory, Rating, Username};
use crate::storage::Storage;

use super::account::AuthenticatedUser;
use super::clock::Clock;

/// Result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No entry existed for the day; the new one was added
    Appended,
    /// The day's previous entry was replaced
    Replaced { previous: MoodEntry },
    /// The overwrite was declined and the log left untouched
    Cancelled { existing: MoodEntry },
}

impl UpsertOutcome {
    /// Whether the log was written
    pub fn is_written(&self) -> bool {
        !matches!(self, Self::Cancelled { .. })
    }
}

/// Decides whether an existing same-day entry may be replaced
pub trait ConfirmOverwrite {
    fn confirm_overwrite(&mut self, existing: &MoodEntry, replacement: &MoodEntry) -> bool;
}

impl<F> ConfirmOverwrite for F
where
    F: FnMut(&MoodEntry, &MoodEntry) -> bool,
{
    fn confirm_overwrite(&mut self, existing: &MoodEntry, replacement: &MoodEntry) -> bool {
        self(existing, replacement)
    }
}

/// Overwrite policy from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverwritePolicy {
    /// Ask the user each time
    #[default]
    Ask,
    /// Replace without asking
    Always,
    /// Never replace
    Never,
}

impl OverwritePolicy {
    /// The fixed answer, or `None` when the user has to be asked
    pub fn fixed_answer(self) -> Option<bool> {
        match self {
            Self::Ask => None,
            Self::Always => Some(true),
            Self::Never => Some(false),
        }
    }
}

impl ConfirmOverwrite for OverwritePolicy {
    /// `Ask` has nobody to ask here and declines
    fn confirm_overwrite(&mut self, _existing: &MoodEntry, _replacement: &MoodEntry) -> bool {
        self.fixed_answer().unwrap_or(false)
    }
}

impl FromStr for OverwritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ask" => Ok(Self::Ask),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            other => Err(format!("unknown overwrite policy '{}'", other)),
        }
    }
}

/// A submission checked against the log but not yet written
///
/// Lets an event-driven front end show its confirmation without holding
/// the log open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedSubmission {
    username: Username,
    entry: MoodEntry,
    existing: Option<MoodEntry>,
}

impl StagedSubmission {
    /// The entry that would be written
    pub fn entry(&self) -> &MoodEntry {
        &self.entry
    }

    /// The same-day entry it would replace
    pub fn existing(&self) -> Option<&MoodEntry> {
        self.existing.as_ref()
    }

    /// Whether committing needs the user's approval
    pub fn needs_confirmation(&self) -> bool {
        self.existing.is_some()
    }
}

/// Service for mood submissions and history
pub struct MoodService<'a> {
    storage: &'a Storage,
    clock: &'a dyn Clock,
}

impl<'a> MoodService<'a> {
    /// Create a new mood service
    pub fn new(storage: &'a Storage, clock: &'a dyn Clock) -> Self {
        Self { storage, clock }
    }

    /// Build an entry dated today
    pub fn entry_for_today(&self, rating: Rating, reason: impl Into<String>) -> MoodEntry {
        MoodEntry::new(self.clock.today(), rating, reason)
    }

    /// Add an entry, replacing that day's entry if the hook approves
    ///
    /// The log is locked for the whole cycle, including the confirmation.
    pub fn append_or_replace(
        &self,
        user: &AuthenticatedUser,
        entry: MoodEntry,
        confirm: &mut dyn ConfirmOverwrite,
    ) -> JournalResult<UpsertOutcome> {
        let username = user.username();
        let _lock = self.storage.moods.lock(username)?;

        let entries = self.storage.moods.load(username)?.unwrap_or_default();
        let (same_day, other_days) = partition_by_date(entries, entry.date);

        let outcome = match same_day.into_iter().last() {
            Some(existing) => {
                if !confirm.confirm_overwrite(&existing, &entry) {
                    info!(user = %username, date = %entry.date, "overwrite declined");
                    return Ok(UpsertOutcome::Cancelled { existing });
                }
                UpsertOutcome::Replaced { previous: existing }
            }
            None => UpsertOutcome::Appended,
        };

        self.write(username, other_days, entry, &outcome)?;
        Ok(outcome)
    }

    /// Record today's mood
    pub fn submit_today(
        &self,
        user: &AuthenticatedUser,
        rating: Rating,
        reason: impl Into<String>,
        confirm: &mut dyn ConfirmOverwrite,
    ) -> JournalResult<UpsertOutcome> {
        let entry = self.entry_for_today(rating, reason);
        self.append_or_replace(user, entry, confirm)
    }

    /// Check a submission against the log without writing
    pub fn stage(
        &self,
        user: &AuthenticatedUser,
        entry: MoodEntry,
    ) -> JournalResult<StagedSubmission> {
        let history = self.read_all(user)?;
        let existing = history.iter().filter(|e| e.is_on(entry.date)).last().cloned();

        Ok(StagedSubmission {
            username: user.username().clone(),
            entry,
            existing,
        })
    }

    /// Write a staged submission
    ///
    /// Declining a replacement returns `Cancelled` without touching the log.
    /// Fails with `Conflict` if that day's entry changed since staging.
    pub fn commit(
        &self,
        staged: StagedSubmission,
        approved: bool,
    ) -> JournalResult<UpsertOutcome> {
        let StagedSubmission {
            username,
            entry,
            existing,
        } = staged;

        if let Some(existing) = &existing {
            if !approved {
                info!(user = %username, date = %entry.date, "overwrite declined");
                return Ok(UpsertOutcome::Cancelled {
                    existing: existing.clone(),
                });
            }
        }

        let _lock = self.storage.moods.lock(&username)?;
        let entries = self.storage.moods.load(&username)?.unwrap_or_default();
        let (same_day, other_days) = partition_by_date(entries, entry.date);

        let current = same_day.into_iter().last();
        if current != existing {
            return Err(JournalError::Conflict(format!(
                "the entry for {} changed since it was checked",
                entry.date
            )));
        }

        let outcome = match current {
            Some(previous) => UpsertOutcome::Replaced { previous },
            None => UpsertOutcome::Appended,
        };

        self.write(&username, other_days, entry, &outcome)?;
        Ok(outcome)
    }

    /// A user's entries in file order; empty if they have no log
    pub fn read_all(&self, user: &AuthenticatedUser) -> JournalResult<MoodHistory> {
        let entries = self
            .storage
            .moods
            .load(user.username())?
            .unwrap_or_default();
        Ok(MoodHistory::new(entries))
    }

    /// The entry for one day
    pub fn entry_on(&self, user: &AuthenticatedUser, date: NaiveDate) -> JournalResult<MoodEntry> {
        self.read_all(user)?
            .on(date)
            .cloned()
            .ok_or_else(|| JournalError::entry_not_found(date.to_string()))
    }

    fn write(
        &self,
        username: &Username,
        mut other_days: Vec<MoodEntry>,
        entry: MoodEntry,
        outcome: &UpsertOutcome,
    ) -> JournalResult<()> {
        let date = entry.date;
        let rating = entry.rating;
        other_days.push(entry);
        self.storage.moods.save(username, &other_days)?;

        match outcome {
            UpsertOutcome::Replaced { .. } => {
                info!(user = %username, %date, %rating, "replaced mood entry")
            }
            _ => info!(user = %username, %date, %rating, "recorded mood entry"),
        }
        Ok(())
    }
}

/// Split entries into those on `date` and the rest, keeping file order
fn partition_by_date(entries: Vec<MoodEntry>, date: NaiveDate) -> (Vec<MoodEntry>, Vec<MoodEntry>) {
    entries.into_iter().partition(|e| e.is_on(date))
}

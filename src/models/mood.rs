//! Mood entry model
//!
//! A daily mood rating with a free-text reason, and the per-user history
//! those entries form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted rating
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating
pub const MAX_RATING: u8 = 10;

/// A mood rating between 1 and 10 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Create a rating, rejecting values outside 1..=10
    pub fn new(value: i64) -> Result<Self, RatingError> {
        if value < MIN_RATING as i64 || value > MAX_RATING as i64 {
            return Err(RatingError::OutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    /// Get the numeric value
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl FromStr for Rating {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| RatingError::NotANumber(s.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rating validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RatingError {
    #[error("Please enter a valid number (got '{0}').")]
    NotANumber(String),
    #[error("Please enter a number between 1 and 10 (got {0}).")]
    OutOfRange(i64),
}

impl From<RatingError> for crate::error::JournalError {
    fn from(err: RatingError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// One day's mood for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub date: NaiveDate,
    pub rating: Rating,
    /// Free text; may be empty or span several lines
    pub reason: String,
}

impl MoodEntry {
    /// Create a new entry
    pub fn new(date: NaiveDate, rating: Rating, reason: impl Into<String>) -> Self {
        Self {
            date,
            rating,
            reason: reason.into(),
        }
    }

    /// Check whether this entry is for the given day
    pub fn is_on(&self, date: NaiveDate) -> bool {
        self.date == date
    }
}

/// Order in which a history is listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryOrder {
    /// File order: the order entries were written, replaced days last
    #[default]
    Insertion,
    /// Oldest date first
    Chronological,
}

impl FromStr for HistoryOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "insertion" | "file" => Ok(Self::Insertion),
            "chronological" | "date" => Ok(Self::Chronological),
            other => Err(format!("unknown history order '{}'", other)),
        }
    }
}

/// A user's mood entries in file order
///
/// Iterating borrows the history, so it can be walked any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodHistory {
    entries: Vec<MoodEntry>,
}

impl MoodHistory {
    pub fn new(entries: Vec<MoodEntry>) -> Self {
        Self { entries }
    }

    /// Iterate in insertion (file) order
    pub fn iter(&self) -> std::slice::Iter<'_, MoodEntry> {
        self.entries.iter()
    }

    /// Entries sorted by date, oldest first; ties keep file order
    pub fn chronological(&self) -> Vec<&MoodEntry> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by_key(|e| e.date);
        sorted
    }

    /// Entries in the requested order
    pub fn ordered(&self, order: HistoryOrder) -> Vec<&MoodEntry> {
        match order {
            HistoryOrder::Insertion => self.entries.iter().collect(),
            HistoryOrder::Chronological => self.chronological(),
        }
    }

    /// The entry recorded for a given day, if any
    pub fn on(&self, date: NaiveDate) -> Option<&MoodEntry> {
        self.entries.iter().find(|e| e.is_on(date))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// An empty history is how a missing log is reported
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for MoodHistory {
    type Item = MoodEntry;
    type IntoIter = std::vec::IntoIter<MoodEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoodHistory {
    type Item = &'a MoodEntry;
    type IntoIter = std::slice::Iter<'a, MoodEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

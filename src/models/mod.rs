//! Core data models for the mood journal
//!
//! Users and their credentials, and the daily mood entries that make up
//! each user's history.

pub mod mood;
pub mod user;

pub use mood::{HistoryOrder, MoodEntry, MoodHistory, Rating, RatingError, MAX_RATING, MIN_RATING};
pub use user::{validate_secret, Credential, CredentialValidationError, Username};

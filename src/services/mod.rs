//! Business logic layer for the mood journal
//!
//! Services take a borrowed [`Storage`](crate::storage::Storage) and the
//! collaborators they need (secret hasher, clock, confirmation hook).

pub mod account;
pub mod clock;
pub mod journal;

pub use account::{AccountService, AuthenticatedUser};
pub use clock::{Clock, FixedClock, SystemClock};
pub use journal::{ConfirmOverwrite, MoodService, OverwritePolicy, StagedSubmission, UpsertOutcome};

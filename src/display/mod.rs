//! Display formatting for terminal output

pub mod mood;

pub use mood::{format_mood_details, format_mood_history, format_mood_row};

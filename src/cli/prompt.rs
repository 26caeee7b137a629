//! Terminal prompts for secrets and confirmations

use std::io::{self, BufRead, Write};

use crate::crypto::SecretString;
use crate::error::{JournalError, JournalResult};
use crate::models::MoodEntry;
use crate::services::ConfirmOverwrite;

/// Environment variable holding the current secret for non-interactive use
pub const SECRET_ENV: &str = "MOOD_JOURNAL_SECRET";
/// Environment variable holding the replacement secret for `passwd`
pub const NEW_SECRET_ENV: &str = "MOOD_JOURNAL_NEW_SECRET";

/// Read a secret from `env_var`, or prompt for it without echo
pub fn read_secret(prompt: &str, env_var: &str) -> JournalResult<SecretString> {
    if let Ok(value) = std::env::var(env_var) {
        return Ok(SecretString::new(value));
    }

    rpassword::prompt_password(prompt)
        .map(SecretString::new)
        .map_err(|e| JournalError::Io(format!("Failed to read password: {}", e)))
}

/// Prompt for a new secret twice, unless `env_var` supplies it
pub fn read_new_secret(env_var: &str) -> JournalResult<SecretString> {
    if let Ok(value) = std::env::var(env_var) {
        return Ok(SecretString::new(value));
    }

    let first = read_secret("Enter a password: ", env_var)?;
    let second = read_secret("Confirm password: ", env_var)?;
    if first.as_str() != second.as_str() {
        return Err(JournalError::Validation("Passwords do not match.".into()));
    }
    Ok(first)
}

/// Ask a yes/no question on the terminal; anything but "y"/"yes" is no
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> bool {
    let _ = write!(output, "{} [y/N] ", question);
    let _ = output.flush();

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Asks on stdin before replacing a day's entry
pub struct StdinConfirm;

impl ConfirmOverwrite for StdinConfirm {
    fn confirm_overwrite(&mut self, existing: &MoodEntry, _replacement: &MoodEntry) -> bool {
        let question = format!(
            "You've already submitted a mood for {} ({}/10). \
             Submitting a new mood will overwrite the previous one. Continue?",
            existing.date, existing.rating
        );
        let stdin = io::stdin();
        let mut input = stdin.lock();
        confirm(&mut input, &mut io::stdout(), &question)
    }
}

//! Line formats for the credential file and mood logs
//!
//! Credential lines are `username:secret`. Mood lines are
//! `Date: <YYYY-MM-DD>, Mood: <n>, Reason: <reason>`.
//!
//! Free text is escaped with backslashes so a record always occupies exactly
//! one line: `\\`, `\n` and `\r` everywhere, plus `\:` inside credential
//! fields. Unknown escape sequences are kept verbatim so files written
//! without escaping still load.

use chrono::NaiveDate;

use crate::models::{Credential, MoodEntry, Rating, Username};

const DATE_PREFIX: &str = "Date: ";
const MOOD_SEPARATOR: &str = ", Mood: ";
const REASON_SEPARATOR: &str = ", Reason: ";

/// Escape a field, additionally escaping `delimiter` if given
pub fn escape(field: &str, delimiter: Option<char>) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c if Some(c) == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Reverse [`escape`]
pub fn unescape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(':') => out.push(':'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Split on the first occurrence of `delimiter` not preceded by an escape
pub fn split_unescaped(line: &str, delimiter: char) -> Option<(&str, &str)> {
    let mut escaped = false;
    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == delimiter {
            return Some((&line[..idx], &line[idx + c.len_utf8()..]));
        }
    }
    None
}

/// Encode a credential as one line (without the newline)
pub fn encode_credential(credential: &Credential) -> String {
    format!(
        "{}:{}",
        escape(credential.username.as_str(), Some(':')),
        escape(&credential.secret_hash, Some(':'))
    )
}

/// Decode one credential line
pub fn decode_credential(line: &str) -> Result<Credential, String> {
    let (user, secret) =
        split_unescaped(line, ':').ok_or_else(|| "missing ':' separator".to_string())?;

    let username = unescape(user);
    if username.is_empty() {
        return Err("empty username".to_string());
    }

    Ok(Credential::new(Username::new(username), unescape(secret)))
}

/// Encode a mood entry as one line (without the newline)
pub fn encode_mood(entry: &MoodEntry) -> String {
    format!(
        "{}{}{}{}{}{}",
        DATE_PREFIX,
        entry.date.format("%Y-%m-%d"),
        MOOD_SEPARATOR,
        entry.rating,
        REASON_SEPARATOR,
        escape(&entry.reason, None)
    )
}

/// Check whether a line starts a mood record
pub fn is_mood_record(line: &str) -> bool {
    line.starts_with(DATE_PREFIX)
}

/// Decode one mood line
pub fn decode_mood(line: &str) -> Result<MoodEntry, String> {
    let rest = line
        .strip_prefix(DATE_PREFIX)
        .ok_or_else(|| format!("line does not start with '{}'", DATE_PREFIX))?;

    let (date, rest) = rest
        .split_once(MOOD_SEPARATOR)
        .ok_or_else(|| "missing mood rating".to_string())?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{}': {}", date, e))?;

    // Older logs have no reason separator when the reason was empty
    let (rating, reason) = match rest.split_once(REASON_SEPARATOR) {
        Some((rating, reason)) => (rating, reason),
        None => (rest.strip_suffix(", Reason:").unwrap_or(rest), ""),
    };
    let rating: Rating = rating.parse().map_err(|e| format!("{}", e))?;

    Ok(MoodEntry::new(date, rating, unescape(reason)))
}

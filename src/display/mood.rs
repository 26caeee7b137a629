//! Mood history display formatting
//!
//! Formats mood entries for terminal output.

use crate::models::MoodEntry;

/// Format a single entry as one history row
///
/// Multi-line reasons continue on indented lines under the first.
pub fn format_mood_row(entry: &MoodEntry, date_format: &str) -> String {
    let mut lines = entry.reason.lines();
    let first = lines.next().unwrap_or("");

    let mut row = format!(
        "{:10}  {:>5}  {}",
        entry.date.format(date_format).to_string(),
        format!("{}/10", entry.rating),
        first
    );
    for line in lines {
        row.push('\n');
        row.push_str(&format!("{:19}{}", "", line));
    }
    row
}

/// Format entries as a history listing
pub fn format_mood_history<'a, I>(entries: I, date_format: &str) -> String
where
    I: IntoIterator<Item = &'a MoodEntry>,
{
    let mut body = String::new();
    let mut count = 0;
    for entry in entries {
        body.push_str(&format_mood_row(entry, date_format));
        body.push('\n');
        count += 1;
    }

    if count == 0 {
        return "No mood history found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:10}  {:>5}  {}\n", "Date", "Mood", "Reason"));
    output.push_str(&"-".repeat(50));
    output.push('\n');
    output.push_str(&body);
    output.push_str(&format!("\nTotal: {} entries\n", count));
    output
}

/// Format one entry in detail
pub fn format_mood_details(entry: &MoodEntry, date_format: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Date:   {}\n", entry.date.format(date_format)));
    output.push_str(&format!("Mood:   {}/10\n", entry.rating));
    if entry.reason.is_empty() {
        output.push_str("Reason: (none)\n");
    } else {
        output.push_str(&format!("Reason: {}\n", entry.reason));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;
    use chrono::NaiveDate;

    fn entry(reason: &str) -> MoodEntry {
        MoodEntry::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Rating::new(7).unwrap(),
            reason,
        )
    }

    #[test]
    fn test_row() {
        let row = format_mood_row(&entry("tired"), "%Y-%m-%d");
        assert_eq!(row, "2024-01-01   7/10  tired");
    }

    #[test]
    fn test_multiline_row_is_indented() {
        let row = format_mood_row(&entry("tired\ncranky"), "%Y-%m-%d");
        let lines: Vec<_> = row.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], format!("{:19}cranky", ""));
    }

    #[test]
    fn test_empty_history() {
        let entries: Vec<MoodEntry> = Vec::new();
        assert_eq!(
            format_mood_history(&entries, "%Y-%m-%d"),
            "No mood history found.\n"
        );
    }

    #[test]
    fn test_history_listing() {
        let entries = vec![entry("tired")];
        let output = format_mood_history(&entries, "%Y-%m-%d");
        assert!(output.contains("Date"));
        assert!(output.contains("2024-01-01"));
        assert!(output.contains("Total: 1 entries"));
    }

    #[test]
    fn test_details() {
        let output = format_mood_details(&entry(""), "%d/%m/%Y");
        assert!(output.contains("Date:   01/01/2024"));
        assert!(output.contains("Reason: (none)"));
    }
}

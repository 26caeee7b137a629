use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A data directory using the fast checksum hasher
fn setup() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"secret_hasher":"checksum"}"#,
    )
    .unwrap();
    dir
}

fn mood(dir: &Path, secret: &str) -> Command {
    let mut cmd = Command::cargo_bin("mood").unwrap();
    cmd.env("MOOD_JOURNAL_DATA_DIR", dir)
        .env("MOOD_JOURNAL_SECRET", secret)
        .env_remove("MOOD_JOURNAL_USER")
        .env_remove("MOOD_JOURNAL_NEW_SECRET")
        .env_remove("MOOD_JOURNAL_LOG");
    cmd
}

fn register(dir: &Path, username: &str, secret: &str) {
    mood(dir, secret)
        .args(["register", username])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account created successfully!"));
}

fn mood_file(dir: &Path, username: &str) -> String {
    fs::read_to_string(dir.join("data").join(format!("{}_mood.txt", username))).unwrap()
}

#[test]
fn test_register_creates_account_and_empty_log() {
    let dir = setup();
    register(dir.path(), "alice123", "secret1");

    let credentials = fs::read_to_string(dir.path().join("data/user_data.txt")).unwrap();
    assert!(credentials.starts_with("alice123:"));
    assert!(!credentials.contains("secret1"));
    assert_eq!(mood_file(dir.path(), "alice123"), "");
}

#[test]
fn test_register_duplicate_fails() {
    let dir = setup();
    register(dir.path(), "alice123", "secret1");

    mood(dir.path(), "other22")
        .args(["register", "alice123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username already taken"));
}

#[test]
fn test_register_short_credentials_fail() {
    let dir = setup();

    mood(dir.path(), "secret1")
        .args(["register", "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 5"));

    mood(dir.path(), "abc")
        .args(["register", "bobby99"])
        .assert()
        .failure();
}

#[test]
fn test_login_does_not_reveal_which_part_was_wrong() {
    let dir = setup();
    register(dir.path(), "alice123", "secret1");

    mood(dir.path(), "secret1")
        .args(["login", "alice123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login successful!"));

    mood(dir.path(), "wrong")
        .args(["login", "alice123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password."));

    mood(dir.path(), "secret1")
        .args(["login", "nobody99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password."));
}

#[test]
fn test_submit_and_history() {
    let dir = setup();
    register(dir.path(), "alice123", "secret1");

    mood(dir.path(), "secret1")
        .args(["mood", "submit", "-u", "alice123", "7", "-r", "tired", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mood recorded for 2024-01-01."));

    assert_eq!(
        mood_file(dir.path(), "alice123"),
        "Date: 2024-01-01, Mood: 7, Reason: tired\n"
    );

    mood(dir.path(), "secret1")
        .args(["mood", "history", "-u", "alice123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-01-01   7/10  tired"))
        .stdout(predicate::str::contains("Total: 1 entries"));
}

#[test]
fn test_resubmit_same_day_asks_before_overwriting() {
    let dir = setup();
    register(dir.path(), "alice123", "secret1");

    mood(dir.path(), "secret1")
        .args(["mood", "submit", "-u", "alice123", "7", "-r", "tired", "--date", "2024-01-01"])
        .assert()
        .success();

    mood(dir.path(), "secret1")
        .args(["mood", "submit", "-u", "alice123", "3", "-r", "worse", "--date", "2024-01-01"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mood will not be submitted!"));
    assert_eq!(
        mood_file(dir.path(), "alice123"),
        "Date: 2024-01-01, Mood: 7, Reason: tired\n"
    );

    mood(dir.path(), "secret1")
        .args(["mood", "submit", "-u", "alice123", "9", "-r", "great", "--date", "2024-01-01"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("updated (was 7/10)"));
    assert_eq!(
        mood_file(dir.path(), "alice123"),
        "Date: 2024-01-01, Mood: 9, Reason: great\n"
    );
}

#[test]
fn test_resubmit_with_yes_skips_prompt() {
    let dir = setup();
    register(dir.path(), "alice123", "secret1");

    for (rating, day) in [("5", "2024-01-01"), ("6", "2024-01-02"), ("8", "2024-01-01")] {
        mood(dir.path(), "secret1")
            .args(["mood", "submit", "-u", "alice123", rating, "--date", day, "--yes"])
            .assert()
            .success();
    }

    assert_eq!(
        mood_file(dir.path(), "alice123"),
        "Date: 2024-01-02, Mood: 6, Reason: \nDate: 2024-01-01, Mood: 8, Reason: \n"
    );

    mood(dir.path(), "secret1")
        .args(["mood", "show", "-u", "alice123", "--date", "2024-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8/10"));
}

#[test]
fn test_submit_rejects_bad_ratings() {
    let dir = setup();
    register(dir.path(), "alice123", "secret1");

    for rating in ["0", "11", "abc", "-3"] {
        mood(dir.path(), "secret1")
            .args(["mood", "submit", "-u", "alice123", rating, "--date", "2024-01-01"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Validation error"));
    }

    assert_eq!(mood_file(dir.path(), "alice123"), "");
}

#[test]
fn test_history_empty() {
    let dir = setup();
    register(dir.path(), "alice123", "secret1");

    mood(dir.path(), "secret1")
        .args(["mood", "history", "-u", "alice123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No mood history found."));
}

#[test]
fn test_passwd_changes_secret() {
    let dir = setup();
    register(dir.path(), "alice123", "secret1");

    mood(dir.path(), "secret1")
        .env("MOOD_JOURNAL_NEW_SECRET", "newsecret")
        .args(["passwd", "alice123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password changed."));

    mood(dir.path(), "secret1")
        .args(["login", "alice123"])
        .assert()
        .failure();
    mood(dir.path(), "newsecret")
        .args(["login", "alice123"])
        .assert()
        .success();
}

#[test]
fn test_login_with_plaintext_credential_file() {
    let dir = setup();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/user_data.txt"), "alice123:secret1\n").unwrap();

    mood(dir.path(), "wrong")
        .args(["login", "alice123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid username or password."));

    mood(dir.path(), "secret1")
        .args(["login", "alice123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Login successful!"));

    let credentials = fs::read_to_string(dir.path().join("data/user_data.txt")).unwrap();
    assert!(!credentials.contains("secret1"));

    mood(dir.path(), "secret1")
        .args(["login", "alice123"])
        .assert()
        .success();
}

#[test]
fn test_config_set_persists() {
    let dir = setup();

    mood(dir.path(), "")
        .args(["config", "set", "history_order", "chronological"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set history_order = chronological"));

    let saved = fs::read_to_string(dir.path().join("config.json")).unwrap();
    assert!(saved.contains(r#""history_order": "chronological""#));
    assert!(saved.contains(r#""secret_hasher": "checksum""#));

    mood(dir.path(), "")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chronological"));

    mood(dir.path(), "")
        .args(["config", "set", "history_order", "random"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value 'random'"));
}

#[test]
fn test_history_order_from_config() {
    let dir = setup();
    register(dir.path(), "alice123", "secret1");

    for day in ["2024-01-02", "2024-01-01"] {
        mood(dir.path(), "secret1")
            .args(["mood", "submit", "-u", "alice123", "5", "--date", day])
            .assert()
            .success();
    }
    mood(dir.path(), "")
        .args(["config", "set", "history_order", "chronological"])
        .assert()
        .success();

    let output = mood(dir.path(), "secret1")
        .args(["mood", "history", "-u", "alice123"])
        .output()
        .unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let first = stdout.find("2024-01-01").unwrap();
    let second = stdout.find("2024-01-02").unwrap();
    assert!(first < second);
}

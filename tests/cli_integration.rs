//! Binary-level checks: startup failures and a short piped session.
//!
//! Ctrl-C needs a terminal and cannot be sent through piped stdin; the
//! interrupt exit code and its shutdown are covered by the controller's unit
//! tests instead.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

mod common;

#[test]
fn test_missing_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("lingobot").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("nowhere.toml"))
        .write_stdin(":q\n");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unable to open config file"));
}

#[test]
fn test_unknown_channel_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config_path = common::temp_config_file(&dir);
    let mut cmd = Command::cargo_bin("lingobot").unwrap();
    cmd.arg("--config")
        .arg(config_path)
        .arg("--channel")
        .arg("web")
        .write_stdin(":q\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognised channel input value: web"));
}

#[test]
fn test_missing_model_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config_path = common::temp_config_file(&dir);
    std::fs::remove_dir_all(dir.path().join("projects").join("current_fr")).unwrap();

    let mut cmd = Command::cargo_bin("lingobot").unwrap();
    cmd.arg("--config").arg(config_path).write_stdin(":q\n");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error with creating classifier for fr"));
}

#[test]
fn test_piped_session_answers_and_saves_profiles() {
    let dir = TempDir::new().unwrap();
    let config_path = common::temp_config_file(&dir);

    let mut cmd = Command::cargo_bin("lingobot").unwrap();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--loglvl")
        .arg("warn")
        .write_stdin("the ancient empire and its history\n:q\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("I am configured to handle: English, French"))
        .stdout(predicate::str::contains("Handling History"))
        .stdout(predicate::str::contains("Goodbye!"));

    let saved = std::fs::read_to_string(dir.path().join("data").join("profiles.json")).unwrap();
    let profiles: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(profiles["1234"]["input_counter"], 1);
}

#[test]
fn test_end_of_input_exits_cleanly() {
    let dir = TempDir::new().unwrap();
    let config_path = common::temp_config_file(&dir);

    let mut cmd = Command::cargo_bin("lingobot").unwrap();
    cmd.arg("--config").arg(config_path).write_stdin("");

    cmd.assert().success();
    assert!(dir.path().join("data").join("profiles.json").exists());
}

#[test]
fn test_unrecognised_log_level_still_starts() {
    let dir = TempDir::new().unwrap();
    let config_path = common::temp_config_file(&dir);

    let mut cmd = Command::cargo_bin("lingobot").unwrap();
    cmd.arg("--config")
        .arg(config_path)
        .arg("--loglvl")
        .arg("chatty")
        .write_stdin(":q\n");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Unrecognised log level value: chatty"));
}

#[test]
fn test_clear_screen_command_keeps_session_running() {
    let dir = TempDir::new().unwrap();
    let config_path = common::temp_config_file(&dir);

    let mut cmd = Command::cargo_bin("lingobot").unwrap();
    cmd.arg("--config")
        .arg(config_path)
        .write_stdin(":c\nthe ancient empire and its history\n:q\n");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Handling History"))
        .stdout(predicate::str::contains("Goodbye!"));
}

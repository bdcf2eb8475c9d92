//! Basic CLI E2E tests.
//!
//! Tests invoke the built `quickfit` binary against a temporary config
//! directory and verify outputs.

mod common;

use common::{assert_contains, run_cli_failure, run_cli_success};

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["--help"]);
    assert_contains(&stdout, "run");
    assert_contains(&stdout, "repl");
    assert_contains(&stdout, "config");
}

#[test]
fn test_config_path_uses_override_dir() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["config", "path"]);
    assert_eq!(stdout.trim(), dir.path().join("config.toml").display().to_string());
}

#[test]
fn test_config_list_creates_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["config", "list"]);
    assert_contains(&stdout, "timer.countdown_default_secs = 300");
    assert_contains(&stdout, "hold.delay_ms = 1000");
    assert!(dir.path().join("config.toml").exists());
}

#[test]
fn test_config_set_then_get() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["config", "set", "hold.repeat_interval_ms", "150"]);
    let stdout = run_cli_success(dir.path(), &["config", "get", "hold.repeat_interval_ms"]);
    assert_eq!(stdout.trim(), "150");
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["config", "set", "timer.color", "red"]);
    assert_contains(&stderr, "error:");
    run_cli_failure(dir.path(), &["config", "get", "timer.color"]);
}

#[test]
fn test_config_reset() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["config", "set", "timer.countdown_default_secs", "60"]);
    run_cli_success(dir.path(), &["config", "reset"]);
    let stdout = run_cli_success(dir.path(), &["config", "get", "timer.countdown_default_secs"]);
    assert_eq!(stdout.trim(), "300");
}

#[test]
fn test_run_short_countdown_logs_one_session() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["run", "--seconds", "1", "--no-sound", "--json"]);
    let sessions: serde_json::Value = serde_json::from_str(&stdout).expect("JSON session log");
    let sessions = sessions.as_array().expect("array");
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["duration_label"], "00:01");
    assert_eq!(sessions[0]["mode"], "countdown");
}

#[test]
fn test_run_rejects_unknown_mode() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_failure(dir.path(), &["run", "--mode", "sideways"]);
}

#[test]
fn test_completions() {
    let dir = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(dir.path(), &["completions", "bash"]);
    assert_contains(&stdout, "quickfit");
}

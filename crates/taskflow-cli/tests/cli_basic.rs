//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

/// Run a CLI command against `home` and return (stdout, stderr, code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_taskflow"))
        .env("TASKFLOW_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_cli_success(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command {args:?} failed: {stderr}");
    stdout
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .map(|line| serde_json::from_str(line).expect("Failed to parse JSON line"))
        .collect()
}

#[test]
fn test_timer_durations_default() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["timer", "durations"]);
    assert!(stdout.contains("Focus"));
    assert!(stdout.contains("25:00"));
    assert!(stdout.contains("05:00"));
    assert!(stdout.contains("15:00"));
}

#[test]
fn test_timer_status_json() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["type"], "state_snapshot");
    assert_eq!(snapshot["mode"], "focus");
    assert_eq!(snapshot["seconds_remaining"], 1500);
    assert_eq!(snapshot["is_active"], false);
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "timer.focus_duration_min", "1"]);
    let stdout = run_cli_success(home.path(), &["config", "get", "timer.focus_duration_min"]);
    assert_eq!(stdout.trim(), "1");
    let stdout = run_cli_success(home.path(), &["timer", "durations"]);
    assert!(stdout.contains("01:00"));
}

#[test]
fn test_config_rejects_zero_duration() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "timer.focus_duration_min", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_get_unknown_key() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "get", "timer.volume"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_timer_run_instant_grows_tree() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(home.path(), &["config", "set", "timer.focus_duration_min", "1"]);
    let stdout = run_cli_success(
        home.path(),
        &["timer", "run", "--instant", "--focus-sessions", "1"],
    );
    let events = json_lines(&stdout);
    let types: Vec<&str> = events.iter().map(|e| e["type"].as_str().unwrap()).collect();
    assert_eq!(
        types,
        vec!["timer_started", "interval_completed", "stage_advanced", "state_snapshot"]
    );
    assert_eq!(events[1]["next"], "short_break");
    assert_eq!(events[1]["sessions_completed"], 1);
    assert_eq!(events[3]["mode"], "short_break");
    assert_eq!(events[3]["seconds_remaining"], 300);
}

#[test]
fn test_tree_grow_blooms_and_persists() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["tree", "grow", "--sessions", "56"]);
    let events = json_lines(&stdout);
    assert_eq!(events.len(), 57);
    assert_eq!(events[55]["type"], "tree_bloomed");
    assert_eq!(events[55]["completed_cycles"], 1);
    assert_eq!(events[56]["session_count"], 0);

    let stdout = run_cli_success(home.path(), &["tree", "status", "--json"]);
    let status: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(status["completed_cycles"], 1);

    run_cli_success(home.path(), &["tree", "reset-cycles"]);
    let stdout = run_cli_success(home.path(), &["tree", "status"]);
    assert!(stdout.contains("0 completed cycles"));
}

#[test]
fn test_tree_status_marks_current_stage() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["tree", "status", "--sessions", "5"]);
    let current: Vec<&str> = stdout.lines().filter(|l| l.contains("<- current")).collect();
    assert_eq!(current.len(), 1);
    assert!(current[0].contains("Leaf"));
    assert!(current[0].contains("1 / 7"));
}

#[test]
fn test_config_get_stages_defaults_to_garden() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["config", "get", "growth.stages"]);
    let stages: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    let keys: Vec<&str> = stages
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["seed", "roots", "leaf", "tree", "bloom"]);
    assert_eq!(stages[4]["required_sessions"], 30);
}

#[test]
fn test_config_path_and_list() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(home.path(), &["config", "path"]);
    assert!(stdout.trim().ends_with("config.toml"));
    assert!(stdout.contains(home.path().to_str().unwrap()));

    let stdout = run_cli_success(home.path(), &["config", "list"]);
    let config: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(config["timer"]["focus_duration_min"], 25);
    assert_eq!(config["growth"]["stages"].as_array().unwrap().len(), 5);
}

use std::ffi::OsStr;
use std::process::{Command, Output};

use serde_json::Value;

fn run_matchday<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_matchday"))
        .args(args)
        .output()
        .unwrap_or_else(|err| panic!("failed to execute matchday binary: {err}"))
}

fn run_json<I, S>(args: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let output = run_matchday(args);
    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "matchday command failed (status={}):\nstdout:\n{}\nstderr:\n{}",
            output.status, stdout, stderr
        );
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    serde_json::from_str(&stdout)
        .unwrap_or_else(|err| panic!("stdout is not valid JSON: {err}\nstdout:\n{stdout}"))
}

fn as_array(value: &Value) -> &Vec<Value> {
    match value.as_array() {
        Some(array) => array,
        None => panic!("expected a JSON array, got {value}"),
    }
}

fn as_str<'a>(value: &'a Value, key: &str) -> &'a str {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_else(|| panic!("missing string field `{key}` in payload: {value}"))
}

#[test]
fn matches_list_prints_the_three_fixtures_in_order() {
    let value = run_json(["--seed", "7", "matches", "list"]);
    let matches = as_array(&value);

    let ids = matches.iter().map(|entry| as_str(entry, "id")).collect::<Vec<_>>();
    assert_eq!(ids, vec!["match-1", "match-2", "match-3"]);
    assert_eq!(as_str(&matches[0]["home_team"], "name"), "Manchester United");
}

const FIXTURE_NOW: &str = "2024-01-15T12:00:00Z";

#[test]
fn seeded_runs_produce_identical_catalogs() {
    let args = ["--seed", "7", "--now", FIXTURE_NOW, "notifications", "list"];
    let first = run_json(args);
    let second = run_json(args);
    assert_eq!(first, second);
}

#[test]
fn notification_listing_filters_by_type() {
    let value = run_json(["--seed", "7", "notifications", "list", "--type", "goal"]);
    for entry in as_array(&value) {
        assert_eq!(as_str(entry, "type"), "goal");
    }
}

#[test]
fn non_positive_limit_falls_back_to_the_default() {
    let baseline = run_json(["--seed", "7", "--now", FIXTURE_NOW, "notifications", "list"]);
    let zero_limit = run_json([
        "--seed",
        "7",
        "--now",
        FIXTURE_NOW,
        "notifications",
        "list",
        "--limit",
        "0",
    ]);
    assert_eq!(zero_limit, baseline);
}

#[test]
fn important_listing_is_truncated_and_flagged() {
    let value = run_json(["--seed", "7", "notifications", "important", "--limit", "2"]);
    let entries = as_array(&value);
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert_eq!(entry.get("is_important").and_then(Value::as_bool), Some(true));
    }
}

#[test]
fn match_notification_listing_round_trips_by_id() {
    let value = run_json(["--seed", "7", "matches", "notifications", "--id", "match-2"]);
    let entries = as_array(&value);
    assert!(!entries.is_empty());
    for entry in entries {
        assert_eq!(as_str(entry, "match_id"), "match-2");
    }
}

#[test]
fn unknown_ids_exit_nonzero_with_a_not_found_error() {
    let output = run_matchday(["--seed", "7", "matches", "get", "--id", "nonexistent"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Match with ID nonexistent was not found"), "stderr: {stderr}");

    let output = run_matchday(["--seed", "7", "notifications", "get", "--id", "nonexistent"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Notification with ID nonexistent was not found"),
        "stderr: {stderr}"
    );
}

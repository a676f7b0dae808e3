// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end tests of the `lockset` binary: exit codes and report output.

use std::process::{Command, Output};

use tempfile::TempDir;

fn lockset(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_lockset"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run lockset binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_read_mostly_scenario_succeeds() {
    let output = lockset(&[
        "coarse", "4", "1000", "99.9", "0.05", "0.05", "1000", "100000", "42",
    ]);
    assert_eq!(output.status.code(), Some(0));

    let text = stdout(&output);
    assert!(text.contains("=== Multithreaded linked list (coarse) ==="));
    assert!(text.contains("Threads: 4, Ops per thread: 1000 (Total: 4000)"));
    assert!(text.contains("Init N: 1000, KeyMax: 100000, Seed: 42"));
    assert!(text.contains("Total time: "));
    assert!(text.contains("Results: Member "));
}

#[test]
fn test_every_strategy_runs() {
    for strategy in ["coarse", "fine", "rw"] {
        let output = lockset(&[strategy, "2", "500", "80", "10", "10", "100", "1000", "7"]);
        assert_eq!(output.status.code(), Some(0), "{strategy}");
        assert!(stdout(&output).contains(&format!("({strategy})")));
    }
}

#[test]
fn test_wrong_argument_count_exits_1() {
    let output = lockset(&["coarse", "4", "1000"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());

    let output = lockset(&[
        "coarse", "4", "1000", "80", "10", "10", "1000", "100000", "42", "extra",
    ]);
    assert_eq!(output.status.code(), Some(1));

    let output = lockset(&[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unparseable_number_exits_1() {
    let output = lockset(&["fine", "four", "1000", "80", "10", "10", "1000", "100000", "42"]);
    assert_eq!(output.status.code(), Some(1));

    let output = lockset(&["fine", "0", "1000", "80", "10", "10", "1000", "100000", "42"]);
    assert_eq!(output.status.code(), Some(1));

    let output = lockset(&["fine", "2", "1000", "80", "10", "10", "1000", "-5", "42"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_bad_percentages_exit_2() {
    let output = lockset(&["coarse", "4", "1000", "80", "10", "9", "1000", "100000", "42"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());

    let output = lockset(&["coarse", "4", "1000", "110", "-10", "0", "1000", "100000", "42"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_unknown_strategy_exits_3() {
    let output = lockset(&["bogus", "4", "1000", "80", "10", "10", "1000", "100000", "42"]);
    assert_eq!(output.status.code(), Some(3));

    let text = stdout(&output);
    assert!(!text.contains("Total time"));
    assert!(!text.contains("Results"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("bogus"));
}

#[test]
fn test_help_exits_0() {
    let output = lockset(&["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("strategy"));
}

#[test]
fn test_json_report_written() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("report.json");
    let path_arg = path.to_string_lossy().into_owned();

    let output = lockset(&[
        "rw", "2", "100", "80", "10", "10", "50", "1000", "3", "--json", &path_arg,
    ]);
    assert_eq!(output.status.code(), Some(0));

    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["config"]["strategy"], "rw");
    let counters = &json["counters"];
    let attempted = counters["member"]["attempted"].as_u64().unwrap()
        + counters["insert"]["attempted"].as_u64().unwrap()
        + counters["delete"]["attempted"].as_u64().unwrap();
    assert_eq!(attempted, 200);
}

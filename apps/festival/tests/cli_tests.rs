//! Integration tests for the `festival` binary.
//!
//! Runs the built executable against temporary files and piped stdin.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use std::io::Write;
use std::process::{Command, Output, Stdio};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// A command for the binary with a clean environment.
fn festival() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_festival"));
    cmd.env_remove("RUST_LOG")
        .env_remove("FESTIVAL_CONFIG")
        .env_remove("FESTIVAL_LOG_FORMAT");
    cmd
}

/// Run the binary with `input` piped to stdin.
fn run_with_stdin(args: &[&str], input: &str) -> Output {
    let mut child = festival()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn festival");

    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");

    child.wait_with_output().expect("wait for festival")
}

fn temp_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const LINEUP: &str = "\
# name start end
ShowA 1 3
ShowB 2 5
ShowC 4 6
ShowD 5 7
";

const LINEUP_REPORT: &str = "\
Total stages required: 3

Assignments in input order:
  ShowA: 1 - 3  --> Stage 1
  ShowB: 2 - 5  --> Stage 2
  ShowC: 4 - 6  --> Stage 1
  ShowD: 5 - 7  --> Stage 3

Per-stage timelines:
Stage 1:
  ShowA: 1 - 3
  ShowC: 4 - 6

Stage 2:
  ShowB: 2 - 5

Stage 3:
  ShowD: 5 - 7

";

// =============================================================================
// SCHEDULE
// =============================================================================

#[test]
fn schedules_from_file_argument() {
    let file = temp_file(LINEUP);
    let output = festival().arg(file.path()).output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), LINEUP_REPORT);
}

#[test]
fn schedules_from_stdin() {
    let output = run_with_stdin(&[], LINEUP);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), LINEUP_REPORT);
}

#[test]
fn schedule_subcommand_matches_default() {
    let file = temp_file(LINEUP);
    let output = festival()
        .arg("schedule")
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), LINEUP_REPORT);
}

#[test]
fn empty_input_reports_zero_stages() {
    let output = run_with_stdin(&[], "\n# nothing scheduled\n");

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Total stages required: 0\n\nPer-stage timelines:\n"
    );
}

#[test]
fn json_output_is_parseable() {
    let output = run_with_stdin(&["--json"], "X 1 5\nY 5 8\n");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["stage_count"], 2);
    assert_eq!(json["assignments"][1]["name"], "Y");
    assert_eq!(json["assignments"][1]["stage"], 2);
    assert_eq!(json["timelines"].as_array().map(Vec::len), Some(2));
}

#[test]
fn verify_flag_accepts_allocation() {
    let output = run_with_stdin(&["--verify"], LINEUP);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), LINEUP_REPORT);
}

// =============================================================================
// INPUT ERRORS
// =============================================================================

#[test]
fn malformed_line_fails_with_line_number() {
    let output = run_with_stdin(&[], "ShowA 1 3\nShowB 2\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty(), "no partial schedule expected");
    assert!(stderr(&output).contains("line 2: expected 3 tokens"));
    assert!(stderr(&output).contains("ShowB 2"));
}

#[test]
fn non_integer_time_fails() {
    let output = run_with_stdin(&[], "ShowA one 3\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("line 1: start/end must be integers"));
}

#[test]
fn reversed_interval_fails() {
    let output = run_with_stdin(&[], "ShowA 1 3\n\nShowB 9 4\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("line 3: end < start"));
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = festival()
        .arg(dir.path().join("missing.txt"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid file path"));
}

// =============================================================================
// CONFIGURATION
// =============================================================================

#[test]
fn policy_flag_changes_identifiers() {
    let input = "A 1 4\nB 2 3\nC 10 11\n";

    let lowest = run_with_stdin(&[], input);
    assert!(stdout(&lowest).contains("  C: 10 - 11  --> Stage 1"));

    let released = run_with_stdin(&["--policy", "earliest-released"], input);
    assert!(released.status.success());
    assert!(stdout(&released).contains("  C: 10 - 11  --> Stage 2"));
}

#[test]
fn unknown_policy_is_a_usage_error() {
    let file = temp_file(LINEUP);
    let output = festival()
        .args(["--policy", "random"])
        .arg(file.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
}

#[test]
fn comment_flag_changes_marker() {
    let input = "; headline act first\nShowA 1 3\n# not a comment now\n";

    let rejected = run_with_stdin(&[], input);
    assert_eq!(rejected.status.code(), Some(1));
    assert!(stderr(&rejected).contains("line 1: expected 3 tokens"));

    let output = run_with_stdin(&["--comment", ";", "check"], "; headline act\nShowA 1 3\n");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "OK: 1 shows\n");

    let hash_kept = run_with_stdin(&["--comment", ";"], input);
    assert_eq!(hash_kept.status.code(), Some(1));
    assert!(stderr(&hash_kept).contains("line 3: expected 3 tokens"));
}

#[test]
fn config_file_is_applied() {
    let config = temp_file("comment_marker = \"//\"\noutput = \"json\"\n");
    let input = temp_file("// lineup\nShowA 1 3\n");

    let output = festival()
        .arg("--config")
        .arg(config.path())
        .arg(input.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["stage_count"], 1);
}

#[test]
fn config_from_environment_variable() {
    let config = temp_file("reuse_policy = \"earliest-released\"\n");
    let input = temp_file("A 1 4\nB 2 3\nC 10 11\n");

    let output = festival()
        .env("FESTIVAL_CONFIG", config.path())
        .arg(input.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("  C: 10 - 11  --> Stage 2"));
}

#[test]
fn invalid_config_fails() {
    let config = temp_file("stages = 3\n");
    let output = festival()
        .arg("check")
        .arg("--config")
        .arg(config.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
}

// =============================================================================
// CHECK & STATS
// =============================================================================

#[test]
fn check_reports_show_count() {
    let file = temp_file(LINEUP);
    let output = festival().arg("check").arg(file.path()).output().unwrap();

    assert!(output.status.success());
    assert_eq!(stdout(&output), "OK: 4 shows\n");
}

#[test]
fn check_rejects_invalid_input() {
    let output = run_with_stdin(&["check"], "ShowA 3 1\n");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn stats_reports_metrics() {
    let output = run_with_stdin(&["stats"], LINEUP);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Shows:         4"));
    assert!(text.contains("Stages:        3"));
    assert!(text.contains("Overlap Depth: 3"));
    assert!(text.contains("Period:        1 - 7 (7 units)"));
    assert!(text.contains("Busiest Stage: 1 (2 shows)"));
}

#[test]
fn global_flags_before_subcommand() {
    let file = temp_file(LINEUP);
    let output = festival()
        .args(["--json", "check"])
        .arg(file.path())
        .output()
        .unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["valid"], true);
    assert_eq!(json["show_count"], 4);

    let stats = run_with_stdin(&["--verify", "stats"], LINEUP);
    assert!(stats.status.success(), "stderr: {}", stderr(&stats));
    assert!(stdout(&stats).contains("Stages:        3"));
}

#[test]
fn stats_period_without_span_at_time_limits() {
    let output = run_with_stdin(
        &["stats"],
        "Forever -9223372036854775808 9223372036854775807\n",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("Period:        -9223372036854775808 - 9223372036854775807\n"));
    assert!(!text.contains("units"));
}

#[test]
fn stats_json() {
    let output = run_with_stdin(&["stats", "--json"], "X 1 5\nY 5 8\n");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["stage_count"], 2);
    assert_eq!(json["overlap_depth"], 2);
    assert_eq!(json["busiest_stage"], 1);
}

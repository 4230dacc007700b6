// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! End-to-end tests running the tapwatch binary


use test_utils::{TempTestDir, run_tapwatch, sample_tap};

#[test]
fn test_text_summary_from_stdin() {
    let output = run_tapwatch(&["-q"], sample_tap());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1), "a failure should exit 1");
    assert!(stdout.contains("Prologue\n  | # suite\n"));
    assert!(stdout.contains("pass: parses\n"));
    assert!(stdout.contains("fail: renders\n"));
    assert!(stdout.contains("  diagnostic: {\"message\":\"wrong width\"}\n"));
    assert!(stdout.contains("skip: skipped\n  reason: later\n"));
    assert!(stdout.contains("Epilogue\n  | # done\n"));
    assert!(stdout.contains("] 3/3\n"));
}

#[test]
fn test_json_summary_from_file() {
    let temp = TempTestDir::new("json_summary");
    let path = temp.create_file("run.tap", "1..2\nok 1 - a\nok 2 - b\n");

    let output = run_tapwatch(
        &["-q", "--format", "json", path.to_str().expect("utf8 path")],
        "",
    );
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["plan"], 2);
    assert_eq!(json["statistics"]["pass"], 2);
    assert_eq!(json["results"][1]["description"], "b");
    assert_eq!(json["done"], true);
}

#[test]
fn test_tiny_chunks_match_default_chunks() {
    let default = run_tapwatch(&["-q", "--format", "json"], sample_tap());
    let tiny = run_tapwatch(&["-q", "--format", "json", "--chunk-size", "1"], sample_tap());

    assert_eq!(default.stdout, tiny.stdout);
}

#[test]
fn test_progress_goes_to_stderr() {
    let output = run_tapwatch(&["-q", "--progress"], sample_tap());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains('\r'));
    assert!(stderr.contains("] 3/3\n"));
}

#[test]
fn test_missing_input_exits_with_error() {
    let output = run_tapwatch(&["/nonexistent/path/12345.tap"], "");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Input file not found"));
}

#[test]
fn test_incomplete_plan_exits_one() {
    let output = run_tapwatch(&["-q"], "1..5\nok 1\n");
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("incomplete: 1 of 5 planned results"));
}

#[test]
fn test_oversized_chunk_exits_with_error() {
    let output = run_tapwatch(&["--chunk-size", "18446744073709551615"], "ok 1\n");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds the maximum"));
}

#[test]
fn test_json_with_non_string_diagnostic_keys() {
    let output = run_tapwatch(
        &["-q", "--format", "json"],
        "1..1\nok 1\n  ---\n  ~: x\n  true: y\n  ...\n",
    );
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["results"][0]["diagnostic"]["value"]["null"], "x");
}

#[test]
fn test_crlf_input() {
    let output = run_tapwatch(
        &["-q", "--format", "json"],
        "TAP version 13\r\n1..1\r\nok 1 - a\r\n",
    );
    assert_eq!(output.status.code(), Some(0));

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["version"], 13);
    assert_eq!(json["plan"], 1);
    assert_eq!(json["prologue"], serde_json::json!([]));
}

// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI tests for the --verbose / -v and --quiet / -q flags
//!
//! These tests verify the logging level configuration behavior,
//! including flag interactions and level determination.


use clap::Parser;
use tapwatch::config::Config;
use test_utils::{run_tapwatch, sample_tap};
use tracing::Level;

// ============================================================================
// --verbose flag tests
// ============================================================================

#[test]
fn test_verbose_short_flag_v() {
    let config = Config::try_parse_from(["tapwatch", "-v"]).expect("parse should succeed");
    assert!(config.verbose);
    assert!(!config.quiet);
}

#[test]
fn test_verbose_long_flag() {
    let config = Config::try_parse_from(["tapwatch", "--verbose"]).expect("parse should succeed");
    assert!(config.verbose);
}

#[test]
fn test_verbose_sets_debug_log_level() {
    let config = Config {
        verbose: true,
        quiet: false,
        ..Default::default()
    };
    assert_eq!(config.log_level(), Level::DEBUG);
}

// ============================================================================
// --quiet flag tests
// ============================================================================

#[test]
fn test_quiet_short_flag_q() {
    let config = Config::try_parse_from(["tapwatch", "-q"]).expect("parse should succeed");
    assert!(config.quiet);
    assert!(!config.verbose);
}

#[test]
fn test_quiet_long_flag() {
    let config = Config::try_parse_from(["tapwatch", "--quiet"]).expect("parse should succeed");
    assert!(config.quiet);
}

#[test]
fn test_quiet_sets_warn_log_level() {
    let config = Config {
        verbose: false,
        quiet: true,
        ..Default::default()
    };
    assert_eq!(config.log_level(), Level::WARN);
}

// ============================================================================
// Default behavior tests
// ============================================================================

#[test]
fn test_no_flags_means_info_level() {
    let config = Config::try_parse_from(["tapwatch"]).expect("parse should succeed");
    assert!(!config.verbose);
    assert!(!config.quiet);
    assert_eq!(config.log_level(), Level::INFO);
}

// ============================================================================
// Flag interaction tests
// ============================================================================

#[test]
fn test_verbose_and_quiet_flags_both_parse() {
    // clap allows both flags to be set
    let config = Config::try_parse_from(["tapwatch", "-v", "-q"]).expect("parse should succeed");
    assert!(config.verbose);
    assert!(config.quiet);
    // Verbose wins
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_quiet_then_verbose_verbose_wins() {
    let config = Config::try_parse_from(["tapwatch", "-q", "-v"]).expect("parse should succeed");
    assert_eq!(config.log_level(), Level::DEBUG);
}

#[test]
fn test_logging_flags_with_input_and_progress() {
    let config = Config::try_parse_from(["tapwatch", "-q", "--progress", "results.tap"])
        .expect("parse should succeed");

    assert!(config.quiet);
    assert!(config.progress);
    assert_eq!(
        config.input.as_deref(),
        Some(std::path::Path::new("results.tap"))
    );
    assert_eq!(config.log_level(), Level::WARN);
}

// ============================================================================
// Log output from the binary
// ============================================================================

#[test]
fn test_verbose_logs_each_classified_line() {
    let output = run_tapwatch(&["-v"], sample_tap());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("DEBUG"), "missing debug logs: {stderr}");
    assert!(stderr.contains("TAP version"));
    assert!(stderr.contains("TAP plan"));
    assert!(stderr.contains("TAP result"));
}

#[test]
fn test_default_logs_completion_only() {
    let output = run_tapwatch(&[], sample_tap());
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("TAP stream complete"));
    assert!(!stderr.contains("DEBUG"));
}

#[test]
fn test_quiet_keeps_warnings() {
    let output = run_tapwatch(&["-q"], "ok 1\n  ---\n  key: [oops\n  ...\n");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stderr.contains("Failed to parse diagnostic block"));
    assert!(!stderr.contains("TAP stream complete"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let output = run_tapwatch(&["-v", "--format", "json"], sample_tap());
    let json: Result<serde_json::Value, _> = serde_json::from_slice(&output.stdout);
    assert!(json.is_ok(), "stdout should only carry the summary");
}

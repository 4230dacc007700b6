// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Summary rendering
//!
//! Text output mirrors the panel layout of a TAP viewer: the prologue, one
//! panel per result labelled `status: description`, the epilogue, and a
//! progress bar split into pass/skip/xfail/xpass/fail segments.

use std::fmt::Write as _;

use tapwatch_core::{Diagnostic, SessionSummary, Statistics, Status, StringKeys, TapResult};

/// Width of the progress bar, in cells
pub const PROGRESS_WIDTH: usize = 40;

fn segment_char(status: Status) -> char {
    match status {
        Status::Pass => '#',
        Status::Skip => 's',
        Status::XFail => 'x',
        Status::XPass => 'X',
        Status::Fail => 'F',
    }
}

/// Render a five-segment progress bar against the plan
///
/// Results beyond the plan stretch the scale so the bar never overflows.
#[must_use]
pub fn progress_bar(stats: &Statistics, plan: Option<u64>, width: usize) -> String {
    let planned = plan.map_or(0, |p| usize::try_from(p).unwrap_or(usize::MAX));
    let scale = planned.max(stats.total());

    let mut bar = String::with_capacity(width + 16);
    bar.push('[');

    let mut drawn = 0;
    if scale > 0 {
        let mut cumulative = 0;
        for status in Status::ALL {
            cumulative += stats.get(status);
            let end = cumulative.saturating_mul(width) / scale;
            bar.extend(std::iter::repeat_n(segment_char(status), end - drawn));
            drawn = end;
        }
    }
    bar.extend(std::iter::repeat_n(' ', width - drawn));
    bar.push(']');

    match plan {
        Some(plan) => format!("{bar} {}/{plan}", stats.total()),
        None => format!("{bar} {}", stats.total()),
    }
}

fn push_block(out: &mut String, lines: &[String]) {
    for line in lines {
        let _ = writeln!(out, "  | {line}");
    }
}

fn push_result(out: &mut String, result: &TapResult) {
    let _ = writeln!(out, "{}", result.label());
    if let Some(reason) = &result.reason {
        let _ = writeln!(out, "  reason: {reason}");
    }
    push_block(out, &result.comments);

    match &result.diagnostic {
        Some(Diagnostic::Present(value)) => {
            let rendered =
                serde_json::to_string(&StringKeys(value)).unwrap_or_else(|e| e.to_string());
            let _ = writeln!(out, "  diagnostic: {rendered}");
        }
        Some(Diagnostic::Failed { message }) => {
            let _ = writeln!(out, "  diagnostic (unparsed): {message}");
        }
        Some(Diagnostic::Absent) | None => {}
    }
}

/// Render the summary as human-readable text
#[must_use]
pub fn render_text(summary: &SessionSummary) -> String {
    let mut out = String::new();

    if !summary.prologue.is_empty() {
        out.push_str("Prologue\n");
        push_block(&mut out, &summary.prologue);
    }

    for result in &summary.results {
        push_result(&mut out, result);
    }

    if !summary.epilogue.is_empty() {
        out.push_str("Epilogue\n");
        push_block(&mut out, &summary.epilogue);
    }

    let stats = &summary.statistics;
    let _ = writeln!(
        out,
        "{}",
        progress_bar(stats, summary.plan, PROGRESS_WIDTH)
    );

    let counts: Vec<String> = Status::ALL
        .iter()
        .map(|&status| {
            let pct = stats.fraction(status, summary.plan) * 100.0;
            format!("{status} {} ({pct:.0}%)", stats.get(status))
        })
        .collect();
    let _ = writeln!(out, "{}", counts.join("  "));

    if summary.is_incomplete() {
        let _ = writeln!(
            out,
            "incomplete: {} of {} planned results",
            summary.results.len(),
            summary.plan.unwrap_or_default()
        );
    }

    out
}

/// Render the summary as pretty-printed JSON
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(summary: &SessionSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}

// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! TAP line grammar
//!
//! Stateless recognizers for the structural line kinds of a TAP stream:
//!
//! | Kind    | Pattern                                               |
//! |---------|-------------------------------------------------------|
//! | Version | `TAP version <int>`                                   |
//! | Plan    | `1..<int>[ # <text>]`                                 |
//! | Result  | `(not )?ok <int>[ - ]<desc>[ # (SKIP\|TODO) <reason>]` |
//!
//! Anything else is [`Line::Other`]: commentary or diagnostic material.
//! The grammar never rejects a line. Each pattern is compiled once per
//! process and shared by every session.

use std::sync::OnceLock;

use regex::Regex;

use crate::result::Directive;

/// Classification of a single line (without its terminator)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// `TAP version <n>`
    Version(u64),
    /// `1..<n>`, the declared number of results
    Plan(u64),
    /// A test point
    Result(ResultLine),
    /// Commentary or diagnostic continuation
    Other,
}

/// Fields captured from a result line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultLine {
    /// `true` for `ok`, `false` for `not ok`
    pub ok: bool,
    /// Ordinal exactly as declared
    pub number: u64,
    /// Description with directive syntax removed
    pub description: String,
    /// `# SKIP` / `# TODO` annotation
    pub directive: Directive,
    /// Text following the directive keyword, if any
    pub reason: Option<String>,
}

fn re_version() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^TAP version (\d+)$")
            .expect("re_version: pattern is valid and should always compile")
    })
}

fn re_plan() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^1\.\.(\d+)(?: # .*)?$")
            .expect("re_plan: pattern is valid and should always compile")
    })
}

fn re_result() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(not )?ok (\d+)(?:\s+(?:- )?([^#]*?))?(?:\s+# ((?i:SKIP|TODO))\b\s*(.*))?\s*$",
        )
        .expect("re_result: pattern is valid and should always compile")
    })
}

/// Classify a line, trying Version, Plan and Result in that order
///
/// Lines whose integer does not fit in a `u64` are treated as commentary.
#[must_use]
pub fn classify(line: &str) -> Line {
    if let Some(caps) = re_version().captures(line) {
        if let Ok(version) = caps[1].parse() {
            return Line::Version(version);
        }
        return Line::Other;
    }

    if let Some(caps) = re_plan().captures(line) {
        if let Ok(plan) = caps[1].parse() {
            return Line::Plan(plan);
        }
        return Line::Other;
    }

    if let Some(caps) = re_result().captures(line) {
        let Ok(number) = caps[2].parse() else {
            return Line::Other;
        };
        let directive = caps
            .get(4)
            .map(|m| Directive::from_keyword(m.as_str()))
            .unwrap_or(Directive::None);
        let reason = caps
            .get(5)
            .map(|m| m.as_str().trim())
            .filter(|r| !r.is_empty() && directive != Directive::None)
            .map(str::to_string);

        return Line::Result(ResultLine {
            ok: caps.get(1).is_none(),
            number,
            description: caps
                .get(3)
                .map(|m| m.as_str().trim_end().to_string())
                .unwrap_or_default(),
            directive,
            reason,
        });
    }

    Line::Other
}

/// `  ---` opens a diagnostic block
#[must_use]
pub fn is_block_open(line: &str) -> bool {
    line == "  ---"
}

/// `  ...` closes a diagnostic block
#[must_use]
pub fn is_block_close(line: &str) -> bool {
    line == "  ..."
}

/// Lines indented by at least two spaces continue an open block
#[must_use]
pub fn is_block_continuation(line: &str) -> bool {
    line.starts_with("  ")
}

//! Test result types

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;
use crate::grammar::ResultLine;

/// Directive annotating a result line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directive {
    /// No directive
    #[default]
    None,
    /// `# SKIP`
    Skip,
    /// `# TODO`
    Todo,
}

impl Directive {
    /// Map a directive keyword (case-insensitive) to a directive
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        if keyword.eq_ignore_ascii_case("skip") {
            Self::Skip
        } else if keyword.eq_ignore_ascii_case("todo") {
            Self::Todo
        } else {
            Self::None
        }
    }
}

/// Classified outcome of a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// `ok` without a directive
    Pass,
    /// Any result carrying `# SKIP`
    Skip,
    /// `not ok` without a directive
    Fail,
    /// `ok` marked `# TODO`: unexpectedly passing
    XPass,
    /// `not ok` marked `# TODO`: expected failure
    XFail,
}

impl Status {
    /// All statuses, in progress-bar order
    pub const ALL: [Status; 5] = [
        Status::Pass,
        Status::Skip,
        Status::XFail,
        Status::XPass,
        Status::Fail,
    ];

    /// Classify an `ok` marker and directive
    #[must_use]
    pub fn classify(ok: bool, directive: Directive) -> Self {
        match (directive, ok) {
            (Directive::Skip, _) => Self::Skip,
            (Directive::Todo, true) => Self::XPass,
            (Directive::Todo, false) => Self::XFail,
            (Directive::None, true) => Self::Pass,
            (Directive::None, false) => Self::Fail,
        }
    }

    /// Lowercase name, as used in labels and JSON
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Skip => "skip",
            Self::Fail => "fail",
            Self::XPass => "xpass",
            Self::XFail => "xfail",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single test point from a TAP stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapResult {
    /// `ok` / `not ok` marker
    pub ok: bool,
    /// Ordinal as declared on the line
    pub number: u64,
    /// Test description
    pub description: String,
    /// SKIP/TODO directive
    pub directive: Directive,
    /// Directive reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Diagnostic block; `None` until the result is finalized
    pub diagnostic: Option<Diagnostic>,
    /// Commentary collected before this result's line
    pub comments: Vec<String>,
    status: Status,
}

impl TapResult {
    /// Build a result from a parsed line, taking ownership of its comments
    #[must_use]
    pub fn new(line: ResultLine, comments: Vec<String>) -> Self {
        let status = Status::classify(line.ok, line.directive);
        Self {
            ok: line.ok,
            number: line.number,
            description: line.description,
            directive: line.directive,
            reason: line.reason,
            diagnostic: None,
            comments,
            status,
        }
    }

    /// Status, fixed at construction
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Attach the diagnostic, once; later attachments are ignored
    ///
    /// Returns `true` if the diagnostic was attached.
    pub fn attach_diagnostic(&mut self, diagnostic: Diagnostic) -> bool {
        if self.diagnostic.is_some() {
            return false;
        }
        self.diagnostic = Some(diagnostic);
        true
    }

    /// Whether the diagnostic slot has been settled
    #[must_use]
    pub fn is_finalized(&self) -> bool {
        self.diagnostic.is_some()
    }

    /// Check if the result counts as passing
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == Status::Pass
    }

    /// Check if the result counts as failing
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == Status::Fail
    }

    /// Panel label: `"<status>: <description>"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}: {}", self.status, self.description)
    }
}

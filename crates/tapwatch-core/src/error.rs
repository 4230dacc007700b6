// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for tapwatch-core

use thiserror::Error;

/// Errors that can occur while driving a TAP session
#[derive(Debug, Error)]
pub enum TapError {
    /// The session was already finished when an operation was attempted
    #[error("TAP session already finished: cannot {operation}")]
    AlreadyFinished {
        /// Name of the rejected operation (`ingest` or `finish`)
        operation: &'static str,
    },

    /// A diagnostic block could not be parsed as YAML
    #[error("Diagnostic parse error: {0}")]
    Diagnostic(#[from] serde_yaml_ng::Error),

    /// Error reading the TAP stream
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TapError {
    /// Whether this error reports use of a finished session
    #[must_use]
    pub fn is_already_finished(&self) -> bool {
        matches!(self, Self::AlreadyFinished { .. })
    }
}

// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Commentary routing
//!
//! Plain lines go to the prologue until the first plan or result line, then
//! into a pending buffer that the next result takes over, and finally to
//! the epilogue once the number of results reaches the plan.

use serde::{Deserialize, Serialize};

/// Where commentary is currently routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Before any plan or result line
    Prologue,
    /// Collecting comments for the next result
    Collecting,
    /// The plan has been satisfied
    Epilogue,
}

/// Destination for a line the router did not keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Append to the session prologue
    Prologue,
    /// Kept in the router's pending buffer
    Pending,
    /// Append to the session epilogue
    Epilogue,
}

/// Tracks the commentary phase and owns the pending comment buffer
#[derive(Debug, Clone)]
pub struct CommentRouter {
    phase: Phase,
    pending: Vec<String>,
}

impl Default for CommentRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommentRouter {
    /// Start in the prologue phase
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Prologue,
            pending: Vec::new(),
        }
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Lines waiting for the next result
    #[must_use]
    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    /// Route a plain line, keeping it when collecting
    pub fn route(&mut self, line: &str) -> Destination {
        match self.phase {
            Phase::Prologue => Destination::Prologue,
            Phase::Collecting => {
                self.pending.push(line.to_string());
                Destination::Pending
            }
            Phase::Epilogue => Destination::Epilogue,
        }
    }

    /// Hand the pending buffer to a new result, leaving a fresh one behind
    pub fn take_comments(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }

    /// Advance the phase after a plan or result line
    ///
    /// Returns lines that must move to the epilogue because the plan was
    /// reached while they were pending.
    pub fn after_structure(&mut self, results: usize, plan: Option<u64>) -> Vec<String> {
        if self.phase == Phase::Epilogue {
            return Vec::new();
        }

        if plan.is_some_and(|plan| results as u64 == plan) {
            self.phase = Phase::Epilogue;
            std::mem::take(&mut self.pending)
        } else {
            self.phase = Phase::Collecting;
            Vec::new()
        }
    }

    /// Release lines no result claimed before the stream ended
    pub fn finish(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending)
    }
}

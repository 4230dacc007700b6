// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Aggregate result counters

use serde::{Deserialize, Serialize};

use crate::result::Status;

/// Per-status result counts, updated once per result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// `ok`
    pub pass: usize,
    /// `ok # SKIP` / `not ok # SKIP`
    pub skip: usize,
    /// `not ok`
    pub fail: usize,
    /// `ok # TODO`
    pub xpass: usize,
    /// `not ok # TODO`
    pub xfail: usize,
}

impl Statistics {
    /// Count one more result with the given status
    pub fn record(&mut self, status: Status) {
        *self.counter_mut(status) += 1;
    }

    /// Count for a single status
    #[must_use]
    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Pass => self.pass,
            Status::Skip => self.skip,
            Status::Fail => self.fail,
            Status::XPass => self.xpass,
            Status::XFail => self.xfail,
        }
    }

    fn counter_mut(&mut self, status: Status) -> &mut usize {
        match status {
            Status::Pass => &mut self.pass,
            Status::Skip => &mut self.skip,
            Status::Fail => &mut self.fail,
            Status::XPass => &mut self.xpass,
            Status::XFail => &mut self.xfail,
        }
    }

    /// Total results counted
    #[must_use]
    pub fn total(&self) -> usize {
        self.pass + self.skip + self.fail + self.xpass + self.xfail
    }

    /// Check if nothing failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.fail == 0
    }

    /// Share of the planned total taken by one status, in `0.0..=1.0`
    ///
    /// Without a plan (or with a zero plan) the counted total is used.
    #[must_use]
    pub fn fraction(&self, status: Status, plan: Option<u64>) -> f64 {
        let denominator = match plan {
            Some(plan) if plan > 0 => plan as f64,
            _ => self.total() as f64,
        };
        if denominator == 0.0 {
            return 0.0;
        }
        (self.get(status) as f64 / denominator).min(1.0)
    }
}

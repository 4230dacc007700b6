// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! tapwatch library
//!
//! This module exports the CLI building blocks (configuration, the stream
//! driver and summary rendering) for use in integration tests and as a
//! library.

pub mod config;
pub mod driver;
pub mod report;

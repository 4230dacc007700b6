// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the TAP line grammar
//!
//! Classification must never panic on any single line.

#![no_main]

use libfuzzer_sys::fuzz_target;

use tapwatch_core::grammar;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let _ = grammar::classify(line);
        let _ = grammar::is_block_continuation(line);
    }
});

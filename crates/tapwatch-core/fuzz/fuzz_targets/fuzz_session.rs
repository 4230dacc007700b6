// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the TAP session
//!
//! Feeds arbitrary bytes through a session in arbitrary chunk sizes and
//! checks the result against one-shot ingestion.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use tapwatch_core::Session;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    data: &'a [u8],
    chunk_size: u8,
}

fuzz_target!(|input: Input<'_>| {
    let mut one_shot = Session::new();
    one_shot
        .ingest(&String::from_utf8_lossy(input.data))
        .expect("fresh session accepts input");
    one_shot.finish().expect("first finish succeeds");

    // Chunked reading should never panic and never change the outcome
    let mut chunked = Session::new();
    chunked
        .ingest_reader(input.data, usize::from(input.chunk_size))
        .expect("reading from a slice cannot fail");
    chunked.finish().expect("first finish succeeds");

    assert_eq!(one_shot.summary(), chunked.summary());
    assert_eq!(
        chunked.statistics().total(),
        chunked.results().len(),
        "statistics must match results"
    );
});

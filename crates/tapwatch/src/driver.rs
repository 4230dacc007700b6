// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Stream driver
//!
//! Pipes a byte stream (a file or standard input) into a TAP session chunk
//! by chunk, optionally drawing live progress, and returns the final
//! summary once the stream ends.
//!
//! # Example
//!
//! ```no_run
//! use tapwatch::config::Config;
//! use tapwatch::driver;
//!
//! let config = Config::default();
//! let summary = driver::run(&config).expect("run");
//! println!("{} results", summary.results.len());
//! ```

use std::fs::File;
use std::io::{Read, Write};

use anyhow::Context;
use tapwatch_core::{Changes, Field, Session, SessionSummary, TapError};
use tracing::{debug, info};

use crate::config::Config;
use crate::report;

/// Exit status when every result passed
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status when a result failed or planned results are missing
pub const EXIT_FAILURES: u8 = 1;
/// Exit status when the stream could not be read
pub const EXIT_ERROR: u8 = 2;

/// Build a listener that redraws the progress bar on `out`
///
/// The bar is redrawn in place whenever the plan, statistics or done flag
/// change; the final draw ends the line.
pub fn progress_listener<W>(mut out: W, width: usize) -> impl FnMut(&Changes, &Session) + 'static
where
    W: Write + 'static,
{
    move |changes, session| {
        if !changes.intersects(&[Field::Plan, Field::Statistics, Field::Done]) {
            return;
        }

        let bar = report::progress_bar(session.statistics(), session.plan(), width);
        let end = if changes.contains(Field::Done) { "\n" } else { "" };
        if let Err(e) = write!(out, "\r{bar}{end}").and_then(|()| out.flush()) {
            debug!(error = %e, "Failed to draw progress");
        }
    }
}

/// Read a whole TAP stream and summarise it
///
/// # Errors
///
/// Returns `TapError::Io` if the reader fails.
pub fn watch<R: Read>(
    reader: R,
    chunk_size: usize,
    progress: Option<Box<dyn Write>>,
) -> Result<SessionSummary, TapError> {
    let mut session = Session::new();
    if let Some(out) = progress {
        let _subscription = session.subscribe(progress_listener(out, report::PROGRESS_WIDTH));
    }

    let bytes = session.ingest_reader(reader, chunk_size)?;
    session.finish()?;

    let stats = session.statistics();
    info!(
        bytes,
        results = session.results().len(),
        pass = stats.pass,
        fail = stats.fail,
        "TAP stream complete"
    );
    Ok(session.summary())
}

/// Run the driver for a configuration
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the input cannot be
/// opened, or reading fails.
pub fn run(config: &Config) -> anyhow::Result<SessionSummary> {
    config.validate()?;

    let progress: Option<Box<dyn Write>> = if config.progress {
        Some(Box::new(std::io::stderr()))
    } else {
        None
    };

    let summary = match config.input_path() {
        Some(path) => {
            info!(path = %path.display(), "Reading TAP stream");
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            watch(file, config.chunk_size, progress)
        }
        None => {
            info!("Reading TAP stream from stdin");
            watch(std::io::stdin().lock(), config.chunk_size, progress)
        }
    }
    .context("Failed to read TAP stream")?;

    Ok(summary)
}

/// Exit status for a finished summary
#[must_use]
pub fn exit_status(summary: &SessionSummary) -> u8 {
    if summary.statistics.all_passed() && !summary.is_incomplete() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURES
    }
}

// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! TAP session state machine
//!
//! A [`Session`] consumes a TAP stream in arbitrary chunks and keeps the
//! parsed state up to date: version, plan, results, statistics and the
//! commentary before and after the results.
//!
//! # Example
//!
//! ```
//! use tapwatch_core::session::Session;
//! use tapwatch_core::notify::Field;
//!
//! let mut session = Session::new();
//! let _subscription = session.subscribe(|changes, session| {
//!     if changes.contains(Field::Statistics) {
//!         println!("{} results so far", session.results().len());
//!     }
//! });
//!
//! session.ingest("TAP version 13\n1..2\nok 1 - fir").unwrap();
//! session.ingest("st\nnot ok 2 - second\n").unwrap();
//! session.finish().unwrap();
//!
//! assert_eq!(session.statistics().pass, 1);
//! assert_eq!(session.statistics().fail, 1);
//! assert!(session.ingest("ok 3\n").is_err());
//! ```

use std::fmt;
use std::io::{ErrorKind, Read};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::diagnostic::{Diagnostic, DiagnosticBlock, DiagnosticParser, YamlDiagnostics};
use crate::error::TapError;
use crate::grammar::{self, Line, ResultLine};
use crate::lines::{LineSplitter, Utf8Carry};
use crate::notify::{Changes, Field, Notifier, Subscription};
use crate::result::TapResult;
use crate::router::{CommentRouter, Destination, Phase};
use crate::stats::Statistics;

/// Largest read buffer [`Session::ingest_reader`] allocates, in bytes
pub const MAX_CHUNK_SIZE: usize = 1 << 20;

/// Incrementally parsed TAP stream
pub struct Session {
    version: Option<u64>,
    plan: Option<u64>,
    results: Vec<TapResult>,
    prologue: Vec<String>,
    epilogue: Vec<String>,
    statistics: Statistics,
    done: bool,

    splitter: LineSplitter,
    router: CommentRouter,
    /// Index of the result still waiting for its diagnostic
    pending: Option<usize>,
    block: Option<DiagnosticBlock>,
    parser: Box<dyn DiagnosticParser>,
    notifier: Notifier,
}

/// Serialisable snapshot of a session's observable state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// `TAP version`, if declared
    pub version: Option<u64>,
    /// Declared result count, if declared
    pub plan: Option<u64>,
    /// Results in arrival order
    pub results: Vec<TapResult>,
    /// Per-status counts
    pub statistics: Statistics,
    /// Commentary before the first plan or result line
    pub prologue: Vec<String>,
    /// Commentary after the plan was reached
    pub epilogue: Vec<String>,
    /// Whether the stream has ended
    pub done: bool,
}

impl SessionSummary {
    /// Failing results
    #[must_use]
    pub fn failing_results(&self) -> Vec<&TapResult> {
        self.results.iter().filter(|r| r.failed()).collect()
    }

    /// Whether fewer results arrived than were planned
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.plan
            .is_some_and(|plan| (self.results.len() as u64) < plan)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session that parses diagnostic blocks as YAML
    #[must_use]
    pub fn new() -> Self {
        Self::with_parser(YamlDiagnostics)
    }

    /// Create a session with a custom diagnostic parser
    #[must_use]
    pub fn with_parser(parser: impl DiagnosticParser + 'static) -> Self {
        Self {
            version: None,
            plan: None,
            results: Vec::new(),
            prologue: Vec::new(),
            epilogue: Vec::new(),
            statistics: Statistics::default(),
            done: false,
            splitter: LineSplitter::new(),
            router: CommentRouter::new(),
            pending: None,
            block: None,
            parser: Box::new(parser),
            notifier: Notifier::default(),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Declared TAP version
    #[must_use]
    pub fn version(&self) -> Option<u64> {
        self.version
    }

    /// Declared number of results
    #[must_use]
    pub fn plan(&self) -> Option<u64> {
        self.plan
    }

    /// Results in arrival order
    #[must_use]
    pub fn results(&self) -> &[TapResult] {
        &self.results
    }

    /// Per-status counts
    #[must_use]
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Commentary before the first plan or result line
    #[must_use]
    pub fn prologue(&self) -> &[String] {
        &self.prologue
    }

    /// Commentary after the plan was reached
    #[must_use]
    pub fn epilogue(&self) -> &[String] {
        &self.epilogue
    }

    /// Whether [`Session::finish`] has been called
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Current commentary phase
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.router.phase()
    }

    /// Snapshot of all observable fields
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            version: self.version,
            plan: self.plan,
            results: self.results.clone(),
            statistics: self.statistics,
            prologue: self.prologue.clone(),
            epilogue: self.epilogue.clone(),
            done: self.done,
        }
    }

    // ------------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------------

    /// Register a listener for batched change notifications
    ///
    /// The listener runs synchronously at the end of every `ingest` or
    /// `finish` call that changed something.
    pub fn subscribe<F>(&mut self, listener: F) -> Subscription
    where
        F: FnMut(&Changes, &Session) + 'static,
    {
        self.notifier.subscribe(Box::new(listener))
    }

    /// Remove a listener; returns `false` if it was not registered
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.notifier.unsubscribe(subscription)
    }

    // ------------------------------------------------------------------------
    // Ingestion
    // ------------------------------------------------------------------------

    /// Feed a chunk of the stream
    ///
    /// # Errors
    ///
    /// Returns `TapError::AlreadyFinished` if the session was finished.
    pub fn ingest(&mut self, chunk: &str) -> Result<(), TapError> {
        self.ensure_active("ingest")?;
        trace!(bytes = chunk.len(), "Ingesting chunk");

        for line in self.splitter.push(chunk) {
            self.feed_line(&line);
        }

        self.emit_pending_changes();
        Ok(())
    }

    /// Feed everything a reader yields, `chunk_size` bytes at a time
    ///
    /// Bytes are decoded as UTF-8; invalid sequences become U+FFFD. The
    /// session is not finished. Returns the number of bytes read.
    ///
    /// `chunk_size` is clamped to `1..=MAX_CHUNK_SIZE`.
    ///
    /// # Errors
    ///
    /// Returns `TapError::Io` if reading fails and
    /// `TapError::AlreadyFinished` if the session was finished.
    pub fn ingest_reader<R: Read>(
        &mut self,
        mut reader: R,
        chunk_size: usize,
    ) -> Result<usize, TapError> {
        self.ensure_active("ingest")?;

        let mut buf = vec![0u8; chunk_size.clamp(1, MAX_CHUNK_SIZE)];
        let mut decoder = Utf8Carry::new();
        let mut total = 0;

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            total += n;

            let text = decoder.decode(&buf[..n]);
            if !text.is_empty() {
                self.ingest(&text)?;
            }
        }

        if let Some(rest) = decoder.finish() {
            self.ingest(&rest)?;
        }

        debug!(bytes = total, "Reader exhausted");
        Ok(total)
    }

    /// End the stream
    ///
    /// Flushes an unterminated last line, closes any open diagnostic block,
    /// finalizes the pending result and moves unclaimed commentary to the
    /// epilogue.
    ///
    /// # Errors
    ///
    /// Returns `TapError::AlreadyFinished` if called twice.
    pub fn finish(&mut self) -> Result<(), TapError> {
        self.ensure_active("finish")?;

        if let Some(line) = self.splitter.finish() {
            self.feed_line(&line);
        }
        self.finalize_pending();

        let unclaimed = self.router.finish();
        self.append_epilogue(unclaimed);

        self.done = true;
        self.notifier.mark(Field::Done);
        debug!(
            results = self.results.len(),
            plan = ?self.plan,
            "TAP stream finished"
        );

        self.emit_pending_changes();
        Ok(())
    }

    fn ensure_active(&self, operation: &'static str) -> Result<(), TapError> {
        if self.done {
            return Err(TapError::AlreadyFinished { operation });
        }
        Ok(())
    }

    fn feed_line(&mut self, line: &str) {
        if self.absorb_diagnostic(line) {
            return;
        }

        match grammar::classify(line) {
            Line::Version(version) if self.version.is_none() => self.version_line(version),
            Line::Plan(plan) if self.plan.is_none() => self.plan_line(plan),
            Line::Result(result) => self.result_line(result),
            _ => self.comment_line(line),
        }
    }

    /// Offer a line to the pending result's diagnostic block
    ///
    /// Returns `true` if the line was consumed. Any other line finalizes the
    /// pending result before ordinary dispatch.
    fn absorb_diagnostic(&mut self, line: &str) -> bool {
        if self.pending.is_none() {
            return false;
        }

        if self.block.is_some() && grammar::is_block_continuation(line) {
            if grammar::is_block_close(line) {
                self.finalize_pending();
            } else if let Some(block) = self.block.as_mut() {
                block.push(line);
            }
            return true;
        }

        if self.block.is_none() && grammar::is_block_open(line) {
            self.block = Some(DiagnosticBlock::new());
            return true;
        }

        self.finalize_pending();
        false
    }

    fn finalize_pending(&mut self) {
        let Some(index) = self.pending.take() else {
            return;
        };

        let diagnostic = match self.block.take() {
            Some(block) => block.close(self.parser.as_ref()),
            None => Diagnostic::Absent,
        };

        if let Some(result) = self.results.get_mut(index) {
            if result.attach_diagnostic(diagnostic) {
                trace!(number = result.number, "Result finalized");
                self.notifier.mark(Field::Results);
            }
        }
    }

    fn version_line(&mut self, version: u64) {
        debug!(version, "TAP version");
        self.version = Some(version);
        self.notifier.mark(Field::Version);
    }

    fn plan_line(&mut self, plan: u64) {
        debug!(plan, "TAP plan");
        self.plan = Some(plan);
        self.notifier.mark(Field::Plan);

        let flushed = self.router.after_structure(self.results.len(), self.plan);
        self.append_epilogue(flushed);
    }

    fn result_line(&mut self, line: ResultLine) {
        let result = TapResult::new(line, self.router.take_comments());
        let status = result.status();
        debug!(
            number = result.number,
            status = %status,
            description = %result.description,
            "TAP result"
        );

        self.statistics.record(status);
        self.results.push(result);
        self.pending = Some(self.results.len() - 1);
        self.notifier.mark(Field::Results);
        self.notifier.mark(Field::Statistics);

        let flushed = self.router.after_structure(self.results.len(), self.plan);
        self.append_epilogue(flushed);
    }

    fn comment_line(&mut self, line: &str) {
        match self.router.route(line) {
            Destination::Prologue => {
                self.prologue.push(line.to_string());
                self.notifier.mark(Field::Prologue);
            }
            Destination::Pending => {}
            Destination::Epilogue => {
                self.epilogue.push(line.to_string());
                self.notifier.mark(Field::Epilogue);
            }
        }
    }

    fn append_epilogue(&mut self, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        self.epilogue.extend(lines);
        self.notifier.mark(Field::Epilogue);
    }

    fn emit_pending_changes(&mut self) {
        let changes = self.notifier.take_pending();
        if changes.is_empty() {
            return;
        }
        trace!(%changes, "Notifying listeners");

        let mut listeners = self.notifier.take_listeners();
        for (_, listener) in &mut listeners {
            listener(&changes, self);
        }
        self.notifier.restore_listeners(listeners);
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("version", &self.version)
            .field("plan", &self.plan)
            .field("results", &self.results.len())
            .field("statistics", &self.statistics)
            .field("phase", &self.router.phase())
            .field("done", &self.done)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

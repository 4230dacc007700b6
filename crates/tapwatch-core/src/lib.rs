// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! tapwatch-core: Incremental Test Anything Protocol parsing
//!
//! This library crate turns a TAP stream, delivered in chunks of any size,
//! into structured state that grows as the stream arrives: version, plan,
//! results with their diagnostics, statistics, and surrounding commentary.
//! Observers subscribe to one batched notification per ingestion call.
//!
//! # Example
//!
//! ```no_run
//! use tapwatch_core::Session;
//!
//! let mut session = Session::new();
//! session.ingest("TAP version 13\n1..1\n").unwrap();
//! session.ingest("ok 1 - it works\n").unwrap();
//! session.finish().unwrap();
//!
//! let summary = session.summary();
//! println!("{} passed", summary.statistics.pass);
//! ```

pub mod diagnostic;
pub mod error;
pub mod grammar;
pub mod lines;
pub mod notify;
pub mod result;
pub mod router;
pub mod session;
pub mod stats;

pub use diagnostic::{Diagnostic, DiagnosticParser, StringKeys, YamlDiagnostics};
pub use error::TapError;
pub use notify::{Changes, Field, Subscription};
pub use result::{Directive, Status, TapResult};
pub use router::Phase;
pub use session::{MAX_CHUNK_SIZE, Session, SessionSummary};
pub use stats::Statistics;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::TapError;
    pub use crate::notify::{Changes, Field};
    pub use crate::result::{Status, TapResult};
    pub use crate::session::{Session, SessionSummary};
    pub use crate::stats::Statistics;
}

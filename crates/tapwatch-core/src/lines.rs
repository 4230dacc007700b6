// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line splitting for arbitrarily chunked input
//!
//! TAP is line oriented, but the stream feeding a session may be cut at any
//! byte. [`LineSplitter`] carries the unterminated tail of one chunk over to
//! the next so that the lines it yields do not depend on where the cuts fall.
//! [`Utf8Carry`] does the same one level down, for byte streams whose reads
//! may split a multi-byte character.

/// Splits chunked text into complete `\n`-terminated lines
///
/// A `\r` directly before the `\n` is part of the terminator, so CRLF
/// streams yield the same lines as LF streams.
#[derive(Debug, Default, Clone)]
pub struct LineSplitter {
    partial: String,
}

impl LineSplitter {
    /// Create a splitter with an empty carry-over buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return every line it completes, in order
    ///
    /// Returned lines do not include their `\n` or `\r\n` terminator.
    /// Text after the last terminator is kept for the next call.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        let mut lines = Vec::new();
        let mut rest = chunk;

        while let Some(end) = rest.find('\n') {
            let mut line = std::mem::take(&mut self.partial);
            line.push_str(&rest[..end]);
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
            rest = &rest[end + 1..];
        }

        self.partial.push_str(rest);
        lines
    }

    /// Flush the unterminated remainder, if any
    pub fn finish(&mut self) -> Option<String> {
        if self.partial.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.partial))
        }
    }

    /// Whether text is waiting for a line terminator
    #[must_use]
    pub fn has_partial(&self) -> bool {
        !self.partial.is_empty()
    }
}

/// Incremental UTF-8 decoder for byte chunks
///
/// Incomplete sequences at the end of a chunk are held back until the next
/// one; invalid bytes become U+FFFD.
#[derive(Debug, Default, Clone)]
pub struct Utf8Carry {
    pending: Vec<u8>,
}

impl Utf8Carry {
    /// Create a decoder with nothing held back
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, holding back a trailing incomplete sequence
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let mut out = String::with_capacity(self.pending.len());
        let mut start = 0;
        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    start = self.pending.len();
                    break;
                }
                Err(e) => {
                    let valid_end = start + e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[start..valid_end]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            start = valid_end + len;
                        }
                        None => {
                            start = valid_end;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        out
    }

    /// Flush bytes still held back at end of stream
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let rest = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Some(rest)
    }
}

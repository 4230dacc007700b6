// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Diagnostic blocks
//!
//! A result line may be followed by an indented YAML block:
//!
//! ```text
//! not ok 2 - second
//!   ---
//!   message: expected 7, got 8
//!   ...
//! ```
//!
//! [`DiagnosticBlock`] collects the lines between the markers and turns them
//! into a [`Diagnostic`] through a [`DiagnosticParser`].

use serde::{Deserialize, Serialize, Serializer};
use serde_yaml_ng::Value;
use tracing::warn;

use crate::error::TapError;

/// Diagnostic attached to a finalized result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum Diagnostic {
    /// The result had no diagnostic block
    Absent,
    /// The block parsed to a value
    ///
    /// Serialized through [`StringKeys`], so mapping keys always come out
    /// as strings.
    Present(#[serde(serialize_with = "serialize_string_keys")] Value),
    /// The block could not be parsed
    Failed {
        /// Parser error message
        message: String,
    },
}

impl Diagnostic {
    /// Parsed value, if present
    #[must_use]
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }

    /// Check if the block failed to parse
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Serializes a YAML value with every mapping key rendered as a string
///
/// YAML allows keys such as `~`, `true`, `3` or `[a]`; formats like JSON
/// only accept string keys. Scalars keep their plain YAML spelling
/// (`null`, `true`, `3`) and collection keys use their YAML text. Tagged
/// values are written as a single `"!tag"` key.
#[derive(Debug, Clone, Copy)]
pub struct StringKeys<'a>(pub &'a Value);

impl Serialize for StringKeys<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Sequence(items) => serializer.collect_seq(items.iter().map(StringKeys)),
            Value::Mapping(map) => {
                serializer.collect_map(map.iter().map(|(k, v)| (key_string(k), StringKeys(v))))
            }
            Value::Tagged(tagged) => serializer.collect_map(std::iter::once((
                tagged.tag.to_string(),
                StringKeys(&tagged.value),
            ))),
            scalar => scalar.serialize(serializer),
        }
    }
}

fn key_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => serde_yaml_ng::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn serialize_string_keys<S: Serializer>(value: &Value, serializer: S) -> Result<S::Ok, S::Error> {
    StringKeys(value).serialize(serializer)
}

/// Turns the text of a diagnostic block into a value
pub trait DiagnosticParser {
    /// Parse the joined block text
    ///
    /// # Errors
    ///
    /// Returns an error when the text is not a valid document. The session
    /// records the failure on the result and carries on.
    fn parse(&self, text: &str) -> Result<Value, TapError>;
}

/// YAML diagnostics, the TAP 13 convention
#[derive(Debug, Default, Clone, Copy)]
pub struct YamlDiagnostics;

impl DiagnosticParser for YamlDiagnostics {
    fn parse(&self, text: &str) -> Result<Value, TapError> {
        serde_yaml_ng::from_str(text).map_err(TapError::from)
    }
}

/// Lines collected between `  ---` and `  ...`
#[derive(Debug, Default, Clone)]
pub struct DiagnosticBlock {
    lines: Vec<String>,
}

impl DiagnosticBlock {
    /// Open an empty block
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a continuation line verbatim, indentation included
    pub fn push(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    /// Number of collected lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if no lines were collected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Block text: collected lines joined with `\n`
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Close the block and parse what was collected
    #[must_use]
    pub fn close(self, parser: &dyn DiagnosticParser) -> Diagnostic {
        match parser.parse(&self.text()) {
            Ok(value) => Diagnostic::Present(value),
            Err(e) => {
                warn!(lines = self.lines.len(), error = %e, "Failed to parse diagnostic block");
                Diagnostic::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

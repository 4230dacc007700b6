// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Batched change notification
//!
//! Every mutation of a session marks a [`Field`]. At the end of an `ingest`
//! or `finish` call the marked fields are delivered to subscribers as one
//! [`Changes`] value, then cleared.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::session::Session;

/// Top-level session fields observers can watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// `TAP version`
    Version,
    /// Declared plan
    Plan,
    /// Result list, including diagnostics attached to results
    Results,
    /// Per-status counters
    Statistics,
    /// Commentary before the first structural line
    Prologue,
    /// Commentary after the plan was reached
    Epilogue,
    /// End of stream
    Done,
}

impl Field {
    /// Stable field name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::Plan => "plan",
            Self::Results => "results",
            Self::Statistics => "statistics",
            Self::Prologue => "prologue",
            Self::Epilogue => "epilogue",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of fields changed during one call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Changes {
    fields: BTreeSet<Field>,
}

impl Changes {
    /// Mark a field as changed
    pub fn insert(&mut self, field: Field) {
        self.fields.insert(field);
    }

    /// Check if a field changed
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    /// Check if any of the given fields changed
    #[must_use]
    pub fn intersects(&self, fields: &[Field]) -> bool {
        fields.iter().any(|f| self.fields.contains(f))
    }

    /// Changed fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().copied()
    }

    /// Number of distinct changed fields
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if nothing changed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<Field> for Changes {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Changes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(Field::as_str).collect();
        f.write_str(&names.join(", "))
    }
}

/// Callback receiving each batch together with the updated session
pub type Listener = Box<dyn FnMut(&Changes, &Session)>;

/// Handle identifying a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "dropping the handle makes the listener impossible to unsubscribe"]
pub struct Subscription(u64);

/// Pending changes and registered listeners
#[derive(Default)]
pub(crate) struct Notifier {
    pending: Changes,
    listeners: Vec<(Subscription, Listener)>,
    next_id: u64,
}

impl Notifier {
    pub(crate) fn mark(&mut self, field: Field) {
        self.pending.insert(field);
    }

    pub(crate) fn subscribe(&mut self, listener: Listener) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.listeners.push((subscription, listener));
        subscription
    }

    pub(crate) fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    #[cfg(test)]
    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Take the batch accumulated so far, leaving an empty one
    pub(crate) fn take_pending(&mut self) -> Changes {
        std::mem::take(&mut self.pending)
    }

    /// Move the listeners out for delivery
    pub(crate) fn take_listeners(&mut self) -> Vec<(Subscription, Listener)> {
        std::mem::take(&mut self.listeners)
    }

    pub(crate) fn restore_listeners(&mut self, listeners: Vec<(Subscription, Listener)>) {
        self.listeners = listeners;
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("pending", &self.pending)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

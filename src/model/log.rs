use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::generate_id;
use crate::Id;

/// The four kinds of state transition the log records (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActionKind {
    Placement,
    Retrieval,
    Rearrangement,
    Disposal,
}

/// A single append-only log entry (spec.md §3).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogEntry {
    id: Id,
    timestamp: DateTime<Utc>,
    user_id: Id,
    action: ActionKind,
    item_id: Id,
    detail: String,
}

impl LogEntry {
    pub fn new(
        timestamp: DateTime<Utc>,
        user_id: impl Into<Id>,
        action: ActionKind,
        item_id: impl Into<Id>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_id(),
            timestamp,
            user_id: user_id.into(),
            action,
            item_id: item_id.into(),
            detail: detail.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn action(&self) -> ActionKind {
        self.action
    }

    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

/// Append-only record of every state transition emitted by placement,
/// retrieval, waste, and simulation (spec.md §4.F).
///
/// Keyed by `(timestamp, insertion_sequence)` rather than the teacher's
/// `Schedule`'s single `BTreeMap<F64Key, _>`: log entries are not intervals
/// that can overlap or need removing, only ever appended and queried by
/// ascending timestamp, so the extra sequence component just breaks ties
/// between same-instant entries without needing `Schedule`'s conflict
/// machinery.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    entries: BTreeMap<(DateTime<Utc>, u64), LogEntry>,
    next_seq: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends `entry`. Entries are never mutated or removed afterward.
    pub fn append(&mut self, entry: LogEntry) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert((entry.timestamp, seq), entry);
    }

    /// Query by `[start, end]` timestamp window and optional item/user/action
    /// filters (spec.md §4.F), in ascending timestamp order.
    pub fn query(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        item_id: Option<&str>,
        user_id: Option<&str>,
        action: Option<ActionKind>,
    ) -> Vec<&LogEntry> {
        self.entries
            .range((start, 0)..=(end, u64::MAX))
            .map(|(_, entry)| entry)
            .filter(|entry| item_id.map_or(true, |id| entry.item_id == id))
            .filter(|entry| user_id.map_or(true, |id| entry.user_id == id))
            .filter(|entry| action.map_or(true, |a| entry.action == a))
            .collect()
    }
}

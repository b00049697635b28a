//! Transition history tracking.
//!
//! Immutable record of the state changes a session has gone through.
//! Rejected events never appear here; they leave no mark beyond the effect
//! handed back to the caller.

use super::event::SessionEvent;
use super::state::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single state change.
///
/// Records are immutable values: a move from one state to another, the
/// event that caused it, and when it happened.
///
/// # Example
///
/// ```rust
/// use vendo::core::{SessionEvent, SessionState, TransitionRecord};
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     from: SessionState::AwaitingInput,
///     to: SessionState::AwaitingSelection,
///     event: SessionEvent::InsertToken,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.event, SessionEvent::InsertToken);
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The state being transitioned from.
    pub from: SessionState,
    /// The state being transitioned to.
    pub to: SessionState,
    /// The event that caused the change.
    pub event: SessionEvent,
    /// When the change occurred.
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of state changes.
///
/// History is immutable: [`record`](Self::record) returns a new history
/// with the entry appended and leaves the original untouched, so histories
/// can be captured, compared, and replayed freely.
///
/// # Example
///
/// ```rust
/// use vendo::core::{SessionEvent, SessionHistory, SessionState, TransitionRecord};
/// use chrono::Utc;
///
/// let history = SessionHistory::new();
/// let history = history.record(TransitionRecord {
///     from: SessionState::AwaitingInput,
///     to: SessionState::AwaitingSelection,
///     event: SessionEvent::InsertToken,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.len(), 1);
/// assert_eq!(
///     history.path(),
///     vec![SessionState::AwaitingInput, SessionState::AwaitingSelection],
/// );
/// ```
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SessionHistory {
    records: Vec<TransitionRecord>,
}

impl Default for SessionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionHistory {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a state change, returning a new history.
    ///
    /// Pure: the existing history is not mutated.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// Get the path of states traversed.
    ///
    /// The first entry is the state the earliest record started from,
    /// followed by the destination of every record. An empty history yields
    /// an empty path.
    pub fn path(&self) -> Vec<SessionState> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        for record in &self.records {
            path.push(record.to);
        }
        path
    }

    /// Calculate the span from the first to the last recorded change.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all records in order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// Number of recorded state changes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

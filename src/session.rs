//! Vending session shell that applies pure transitions.
//!
//! [`SessionMachine`] owns the mutable session state and drives the
//! pure [`transition`](crate::core::transition) function: the core decides
//! what happens, the shell applies it, records it, and logs it.

use crate::core::{transition, Effect, SessionEvent, SessionHistory, SessionState, TransitionRecord};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;
use uuid::Uuid;

/// Unique identifier for a vending session.
///
/// Wraps a v4 UUID and serializes as one, so identifiers survive
/// snapshots unchanged.
///
/// # Example
///
/// ```rust
/// use vendo::SessionId;
///
/// let id = SessionId::new();
/// assert_ne!(id, SessionId::new());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new unique session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A vending session: current state plus the history of how it got there.
///
/// Sessions start in [`SessionState::AwaitingInput`] and move through the
/// cycle insert token, press select, dispense output, back to the start.
/// Every event is answered with an [`Effect`]; events the current state
/// does not accept come back as [`Effect::Rejected`] and leave the session
/// where it was.
///
/// The machine is deliberately neither `Clone` nor `Copy`: a session is a
/// single ongoing interaction, not a value to duplicate. Use
/// [`Snapshot`](crate::snapshot::Snapshot) to capture a point-in-time copy.
///
/// # Example
///
/// ```rust
/// use vendo::{Effect, SessionMachine, SessionState};
///
/// let mut session = SessionMachine::new();
/// assert_eq!(session.state(), SessionState::AwaitingInput);
///
/// assert_eq!(session.insert_token(), Effect::TokenAccepted);
/// assert_eq!(session.press_select(), Effect::SelectionAccepted);
/// assert_eq!(session.dispense_output(), Effect::OutputDispensed);
///
/// // Back at the start, ready for the next customer.
/// assert_eq!(session.state(), SessionState::AwaitingInput);
/// ```
#[derive(Debug)]
pub struct SessionMachine {
    id: SessionId,
    current: SessionState,
    history: SessionHistory,
}

impl SessionMachine {
    /// Create a new session awaiting its first token.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            current: SessionState::AwaitingInput,
            history: SessionHistory::new(),
        }
    }

    /// Rebuild a session from previously captured parts.
    pub(crate) fn from_parts(
        id: SessionId,
        current: SessionState,
        history: SessionHistory,
    ) -> Self {
        Self {
            id,
            current,
            history,
        }
    }

    /// Get the session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Get the current state (pure).
    pub fn state(&self) -> SessionState {
        self.current
    }

    /// Get the history of state changes (pure).
    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Apply an event and return its effect.
    ///
    /// Looks up the pure transition for the current state, applies it, and
    /// records the change when the state moved. Rejections leave both the
    /// state and the history untouched.
    pub fn handle(&mut self, event: SessionEvent) -> Effect {
        let step = transition(self.current, event);
        trace!(
            session = %self.id,
            state = self.current.name(),
            event = event.name(),
            effect = %step.effect,
            "session event"
        );

        if step.next != self.current {
            let record = TransitionRecord {
                from: self.current,
                to: step.next,
                event,
                timestamp: Utc::now(),
            };
            self.history = self.history.record(record);
            self.current = step.next;
        }

        step.effect
    }

    /// A token is inserted into the machine.
    pub fn insert_token(&mut self) -> Effect {
        self.handle(SessionEvent::InsertToken)
    }

    /// The customer asks for their token back.
    pub fn eject_token(&mut self) -> Effect {
        self.handle(SessionEvent::EjectToken)
    }

    /// The customer presses a selection button.
    pub fn press_select(&mut self) -> Effect {
        self.handle(SessionEvent::PressSelect)
    }

    /// The machine finishes dispensing the selected output.
    pub fn dispense_output(&mut self) -> Effect {
        self.handle(SessionEvent::DispenseOutput)
    }
}

impl Default for SessionMachine {
    fn default() -> Self {
        Self::new()
    }
}

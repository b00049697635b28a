//! Session states.
//!
//! A session is always in exactly one of three states. The set is closed:
//! there is no error state and no terminal state, because the cycle is
//! restartable indefinitely.

use serde::{Deserialize, Serialize};

/// The three positions of the vending cycle.
///
/// A fresh session starts in [`AwaitingInput`](Self::AwaitingInput) and
/// returns there after every refund or completed dispense. All methods are
/// pure; the state is an immutable tag with no behavior of its own. How a
/// state responds to an event is defined in one place, the
/// [`transition`](crate::core::transition) table.
///
/// # Example
///
/// ```rust
/// use vendo::core::SessionState;
///
/// let state = SessionState::AwaitingInput;
/// assert_eq!(state.name(), "AwaitingInput");
/// assert!(state.is_initial());
/// assert!(!SessionState::Dispensing.is_initial());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SessionState {
    /// No token held; the session is idle and will take one.
    AwaitingInput,
    /// A token is held; the session waits for a selection.
    AwaitingSelection,
    /// A selection was accepted; the session is emitting output.
    Dispensing,
}

impl SessionState {
    /// Every state, in cycle order. Useful for exhaustive table checks.
    pub const ALL: [SessionState; 3] = [
        SessionState::AwaitingInput,
        SessionState::AwaitingSelection,
        SessionState::Dispensing,
    ];

    /// Get the state's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AwaitingInput => "AwaitingInput",
            Self::AwaitingSelection => "AwaitingSelection",
            Self::Dispensing => "Dispensing",
        }
    }

    /// Check whether this is the state every session starts in and
    /// returns to at the end of each cycle.
    pub fn is_initial(&self) -> bool {
        matches!(self, Self::AwaitingInput)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

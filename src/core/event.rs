//! Session events.
//!
//! The four external stimuli a session accepts. Every event is accepted in
//! every state; what differs is the outcome, which the
//! [`transition`](crate::core::transition) table defines exhaustively.

use serde::{Deserialize, Serialize};

/// An external event delivered to a session.
///
/// Events carry no payload. They are commands in the loosest sense: the
/// session may honor one (changing state) or reject it (staying put), but
/// it never faults on one.
///
/// # Example
///
/// ```rust
/// use vendo::core::SessionEvent;
///
/// assert_eq!(SessionEvent::InsertToken.name(), "InsertToken");
/// assert_eq!(SessionEvent::ALL.len(), 4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A token was put into the machine.
    InsertToken,
    /// The caller asked for the held token back.
    EjectToken,
    /// The caller made a selection.
    PressSelect,
    /// The machine was told to finish emitting output.
    DispenseOutput,
}

impl SessionEvent {
    /// Every event. Useful for exhaustive table checks.
    pub const ALL: [SessionEvent; 4] = [
        SessionEvent::InsertToken,
        SessionEvent::EjectToken,
        SessionEvent::PressSelect,
        SessionEvent::DispenseOutput,
    ];

    /// Get the event's name for display/logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InsertToken => "InsertToken",
            Self::EjectToken => "EjectToken",
            Self::PressSelect => "PressSelect",
            Self::DispenseOutput => "DispenseOutput",
        }
    }
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

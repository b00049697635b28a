//! Observable outcomes of applying an event.
//!
//! An effect is a value, not an action. Invalid event-in-state combinations
//! produce a [`Rejection`] rather than an error: the session machine has no
//! failure path at all.

use serde::{Deserialize, Serialize};

/// What the caller observes after one event is applied.
///
/// Exactly one effect is produced per event. The four acceptance variants
/// always accompany a state change; [`Rejected`](Self::Rejected) always
/// accompanies the state staying put. That correspondence is a law of the
/// transition table, not a convention.
///
/// # Example
///
/// ```rust
/// use vendo::core::{Effect, Rejection};
///
/// assert!(!Effect::TokenAccepted.is_rejection());
/// assert!(Effect::Rejected(Rejection::Busy).is_rejection());
/// assert_eq!(Effect::Rejected(Rejection::NothingToEject).message(), "nothing to eject");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Effect {
    /// A token was taken; the session now awaits a selection.
    TokenAccepted,
    /// The held token was returned; the session reset to awaiting input.
    TokenRefunded,
    /// The selection was taken; the session began dispensing.
    SelectionAccepted,
    /// Output was emitted; the session reset to awaiting input.
    OutputDispensed,
    /// The event was turned away with a reason; the state did not change.
    Rejected(Rejection),
}

/// Why an event was turned away.
///
/// Rejections are part of the machine's normal vocabulary. Each carries a
/// short human-readable message suitable for an operator display.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Rejection {
    /// An eject arrived while no token was held.
    NothingToEject,
    /// A selection or dispense arrived before any token.
    InsertTokenFirst,
    /// A second token arrived while one was already held.
    TokenAlreadyInserted,
    /// A dispense arrived before any selection.
    MakeSelectionFirst,
    /// Anything other than finishing the dispense arrived mid-dispense.
    Busy,
}

impl Effect {
    /// Check whether this effect is a rejection.
    ///
    /// Equivalent to asking whether the event left the state unchanged.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Short human-readable description of the outcome.
    pub fn message(&self) -> &'static str {
        match self {
            Self::TokenAccepted => "token accepted",
            Self::TokenRefunded => "token refunded",
            Self::SelectionAccepted => "selection accepted",
            Self::OutputDispensed => "output dispensed",
            Self::Rejected(rejection) => rejection.message(),
        }
    }
}

impl Rejection {
    /// Short human-readable reason for the rejection.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NothingToEject => "nothing to eject",
            Self::InsertTokenFirst => "insert a token first",
            Self::TokenAlreadyInserted => "already have a token",
            Self::MakeSelectionFirst => "make a selection first",
            Self::Busy => "busy",
        }
    }
}

impl std::fmt::Display for Effect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rejected_reports_as_rejection() {
        assert!(!Effect::TokenAccepted.is_rejection());
        assert!(!Effect::TokenRefunded.is_rejection());
        assert!(!Effect::SelectionAccepted.is_rejection());
        assert!(!Effect::OutputDispensed.is_rejection());
        assert!(Effect::Rejected(Rejection::NothingToEject).is_rejection());
        assert!(Effect::Rejected(Rejection::Busy).is_rejection());
    }

    #[test]
    fn rejection_messages_are_stable() {
        assert_eq!(Rejection::NothingToEject.message(), "nothing to eject");
        assert_eq!(Rejection::InsertTokenFirst.message(), "insert a token first");
        assert_eq!(Rejection::TokenAlreadyInserted.message(), "already have a token");
        assert_eq!(Rejection::MakeSelectionFirst.message(), "make a selection first");
        assert_eq!(Rejection::Busy.message(), "busy");
    }

    #[test]
    fn rejected_effect_carries_the_rejection_message() {
        let effect = Effect::Rejected(Rejection::TokenAlreadyInserted);
        assert_eq!(effect.message(), "already have a token");
        assert_eq!(effect.to_string(), "already have a token");
    }

    #[test]
    fn acceptance_messages_are_stable() {
        assert_eq!(Effect::TokenAccepted.to_string(), "token accepted");
        assert_eq!(Effect::TokenRefunded.to_string(), "token refunded");
        assert_eq!(Effect::SelectionAccepted.to_string(), "selection accepted");
        assert_eq!(Effect::OutputDispensed.to_string(), "output dispensed");
    }

    #[test]
    fn effect_serializes_correctly() {
        let effect = Effect::Rejected(Rejection::Busy);
        let json = serde_json::to_string(&effect).unwrap();
        let deserialized: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(effect, deserialized);
    }
}

//! The transition table as one pure function.
//!
//! Every (state, event) pair resolves to exactly one [`Step`]. The match in
//! [`transition`] spells out all twelve cells so the compiler checks
//! totality; adding a state or an event will not build until every new cell
//! is decided.

use super::effect::{Effect, Rejection};
use super::event::SessionEvent;
use super::state::SessionState;
use serde::{Deserialize, Serialize};

/// Result of applying one event to one state.
///
/// A step is data, not an action: `next` is the state afterwards and
/// `effect` is what the caller observes. The table guarantees that `effect`
/// is a rejection exactly when `next` equals the state stepped from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Step {
    /// The state after the event.
    pub next: SessionState,
    /// The observable outcome.
    pub effect: Effect,
}

/// Apply one event to one state.
///
/// Pure and total: no side effects, a defined deterministic outcome for
/// every pair, never a panic or an error. Invalid combinations come back as
/// [`Effect::Rejected`] with the state unchanged.
///
/// The table:
///
/// | State             | InsertToken          | EjectToken        | PressSelect          | DispenseOutput       |
/// |-------------------|----------------------|-------------------|----------------------|----------------------|
/// | AwaitingInput     | AwaitingSelection    | stay, no token    | stay, insert first   | stay, insert first   |
/// | AwaitingSelection | stay, already held   | AwaitingInput     | Dispensing           | stay, select first   |
/// | Dispensing        | stay, busy           | stay, busy        | stay, busy           | AwaitingInput        |
///
/// # Example
///
/// ```rust
/// use vendo::core::{transition, Effect, SessionEvent, SessionState};
///
/// let step = transition(SessionState::AwaitingInput, SessionEvent::InsertToken);
/// assert_eq!(step.next, SessionState::AwaitingSelection);
/// assert_eq!(step.effect, Effect::TokenAccepted);
///
/// let step = transition(SessionState::Dispensing, SessionEvent::InsertToken);
/// assert_eq!(step.next, SessionState::Dispensing);
/// assert!(step.effect.is_rejection());
/// ```
pub fn transition(state: SessionState, event: SessionEvent) -> Step {
    use SessionEvent::*;
    use SessionState::*;

    match (state, event) {
        // AwaitingInput: only a token moves the session forward.
        (AwaitingInput, InsertToken) => advance(AwaitingSelection, Effect::TokenAccepted),
        (AwaitingInput, EjectToken) => stay(state, Rejection::NothingToEject),
        (AwaitingInput, PressSelect) => stay(state, Rejection::InsertTokenFirst),
        (AwaitingInput, DispenseOutput) => stay(state, Rejection::InsertTokenFirst),

        // AwaitingSelection: the held token can be spent or refunded.
        (AwaitingSelection, InsertToken) => stay(state, Rejection::TokenAlreadyInserted),
        (AwaitingSelection, EjectToken) => advance(AwaitingInput, Effect::TokenRefunded),
        (AwaitingSelection, PressSelect) => advance(Dispensing, Effect::SelectionAccepted),
        (AwaitingSelection, DispenseOutput) => stay(state, Rejection::MakeSelectionFirst),

        // Dispensing: everything waits until the output is out.
        (Dispensing, InsertToken) => stay(state, Rejection::Busy),
        (Dispensing, EjectToken) => stay(state, Rejection::Busy),
        (Dispensing, PressSelect) => stay(state, Rejection::Busy),
        (Dispensing, DispenseOutput) => advance(AwaitingInput, Effect::OutputDispensed),
    }
}

fn advance(next: SessionState, effect: Effect) -> Step {
    Step { next, effect }
}

fn stay(state: SessionState, why: Rejection) -> Step {
    Step {
        next: state,
        effect: Effect::Rejected(why),
    }
}

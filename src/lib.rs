//! Vendo: a token-session vending machine with a pure functional core
//!
//! Vendo follows the "pure core, imperative shell" philosophy. The transition
//! table is a total pure function over plain enums, while [`SessionMachine`]
//! isolates the mutation: it applies transitions, records history, and logs.
//! Alongside the sessions, [`SharedResource`] guards process-wide state with
//! an explicit initialize/acquire/shutdown lifecycle.
//!
//! # Core Concepts
//!
//! - **States and events**: Plain `Copy` enums, the whole vocabulary known at compile time
//! - **Effects**: Every event is answered with a value, rejections included
//! - **History**: Immutable tracking of state changes over time
//! - **Snapshots**: Versioned capture and restore of in-flight sessions
//!
//! # Example
//!
//! ```rust
//! use vendo::{Effect, Rejection, SessionMachine, SessionState};
//!
//! let mut session = SessionMachine::new();
//!
//! // Asking for a refund before paying is answered, not errored on.
//! assert_eq!(
//!     session.eject_token(),
//!     Effect::Rejected(Rejection::NothingToEject)
//! );
//!
//! // The happy path walks the full cycle and returns to the start.
//! assert_eq!(session.insert_token(), Effect::TokenAccepted);
//! assert_eq!(session.press_select(), Effect::SelectionAccepted);
//! assert_eq!(session.dispense_output(), Effect::OutputDispensed);
//! assert_eq!(session.state(), SessionState::AwaitingInput);
//! ```

pub mod core;
pub mod registry;
pub mod session;
pub mod snapshot;

// Re-export commonly used types
pub use core::{
    transition, Effect, Rejection, SessionEvent, SessionHistory, SessionState, Step,
    TransitionRecord,
};
pub use registry::{ConstructionFailure, ResourceHandle, SharedResource};
pub use session::{SessionId, SessionMachine};
pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};

//! Core session types and logic.
//!
//! This module contains the pure functional core of the vending session:
//! - State and event vocabularies as plain enums
//! - The total transition function over them
//! - Effects returned as values, including rejections
//! - Immutable history tracking
//!
//! All logic in this module is pure (no side effects), following
//! the "pure core, imperative shell" philosophy.

mod effect;
mod event;
mod history;
mod state;
mod transition;

pub use effect::{Effect, Rejection};
pub use event::SessionEvent;
pub use history::{SessionHistory, TransitionRecord};
pub use state::SessionState;
pub use transition::{transition, Step};

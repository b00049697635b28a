//! Vending Session Walkthrough
//!
//! This example drives a single session through the full token cycle,
//! including the rejections a confused customer can trigger.
//!
//! Key concepts:
//! - Total transition table (every event is answered in every state)
//! - Rejections as values instead of errors
//! - Cyclic sessions (the machine is ready again after dispensing)
//! - Immutable history of what actually happened
//!
//! Run with: cargo run --example vending_session

use vendo::{SessionMachine, SessionState};

fn main() {
    println!("=== Vending Session Walkthrough ===\n");

    let mut session = SessionMachine::new();
    println!("Session {} created", session.id());
    println!("Initial state: {:?}\n", session.state());

    println!("A confused customer first:");
    println!("  eject token     -> {}", session.eject_token());
    println!("  press select    -> {}", session.press_select());

    println!("\nNow the happy path:");
    println!("  insert token    -> {}", session.insert_token());
    println!("  press select    -> {}", session.press_select());
    println!("  insert token    -> {}", session.insert_token());
    println!("  dispense output -> {}", session.dispense_output());

    println!("\nBack at the start: {:?}", session.state());
    assert_eq!(session.state(), SessionState::AwaitingInput);

    println!("\nStates actually visited:");
    for state in session.history().path() {
        println!("  {state}");
    }

    println!("\n=== Example Complete ===");
}

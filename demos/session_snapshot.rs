//! Session Snapshot and Restore
//!
//! This example captures a session mid-purchase, serializes it, and
//! restores it as if the process had restarted.
//!
//! Key concepts:
//! - Versioned snapshots of in-flight sessions
//! - JSON and compact binary formats
//! - Validation on restore (tampered snapshots are rejected)
//!
//! Run with: cargo run --example session_snapshot

use vendo::{SessionMachine, Snapshot};

fn main() {
    println!("=== Session Snapshot and Restore ===\n");

    let mut session = SessionMachine::new();
    session.insert_token();
    session.press_select();

    println!("Session {} is mid-purchase:", session.id());
    println!("  state: {:?}\n", session.state());

    let snapshot = Snapshot::capture(&session);
    let json = snapshot.to_json().unwrap();
    println!("Captured as JSON ({} bytes):", json.len());
    println!("  {json}\n");

    let bytes = snapshot.to_bytes().unwrap();
    println!("Captured as binary: {} bytes\n", bytes.len());

    let mut restored = Snapshot::from_json(&json).unwrap().restore().unwrap();
    println!("Restored session {}:", restored.id());
    println!("  state: {:?}", restored.state());
    println!("  dispense output -> {}", restored.dispense_output());
    println!("  state: {:?}\n", restored.state());

    let mut tampered = Snapshot::from_bytes(&bytes).unwrap();
    tampered.version = 99;
    match tampered.restore() {
        Ok(_) => println!("Tampered snapshot slipped through!"),
        Err(error) => println!("Tampered snapshot rejected: {error}"),
    }

    println!("\n=== Example Complete ===");
}

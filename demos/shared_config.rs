//! Shared Configuration Resource
//!
//! This example guards a process-wide configuration value behind a
//! `SharedResource` slot: lazy construction, exactly-once semantics under
//! concurrent access, and explicit shutdown.
//!
//! Key concepts:
//! - Lazy construction on first access
//! - One initializer wins when threads race
//! - Failed construction leaves the slot empty for a retry
//! - Explicit shutdown instead of teardown at process exit
//!
//! Run with: cargo run --example shared_config

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use vendo::{ConstructionFailure, SharedResource};

#[derive(Debug)]
struct MachineConfig {
    token_value_cents: u32,
    slots: u32,
}

static CONFIG: SharedResource<MachineConfig> = SharedResource::new();
static FLAKY: SharedResource<String> = SharedResource::new();
static BUILDS: AtomicUsize = AtomicUsize::new(0);

fn load_config() -> Result<MachineConfig, ConstructionFailure> {
    BUILDS.fetch_add(1, Ordering::SeqCst);
    Ok(MachineConfig {
        token_value_cents: 50,
        slots: 12,
    })
}

fn main() {
    tracing_subscriber::fmt().with_env_filter("vendo=debug").init();

    println!("=== Shared Configuration Resource ===\n");

    println!("Nothing is built until someone asks:");
    println!("  initialized: {}\n", CONFIG.is_initialized());

    println!("Eight threads race for first access:");
    thread::scope(|s| {
        for worker in 0..8 {
            s.spawn(move || {
                let config = CONFIG
                    .get_or_create(load_config)
                    .expect("configuration should load");
                println!("  worker {worker} sees {} slots", config.slots);
            });
        }
    });
    println!("  initializer ran {} time(s)\n", BUILDS.load(Ordering::SeqCst));

    let config = CONFIG.get().expect("already initialized");
    println!("Every handle points at the same instance:");
    println!("  address: {:p}", &*config);
    println!("  token value: {} cents\n", config.token_value_cents);
    drop(config);

    println!("A failed initializer leaves the slot empty:");
    if let Err(error) = FLAKY.get_or_create(|| Err(ConstructionFailure::new("disk offline"))) {
        println!("  first attempt: {error}");
    }
    let recovered = FLAKY.get_or_create(|| Ok("loaded".to_string())).unwrap();
    println!("  second attempt: {}\n", *recovered);
    drop(recovered);

    println!("Shutting down releases the instance:");
    println!("  dropped: {}", CONFIG.shutdown());
    println!("  initialized: {}", CONFIG.is_initialized());

    println!("\n=== Example Complete ===");
}

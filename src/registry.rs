//! Guarded access to a process-wide shared resource.
//!
//! [`SharedResource`] holds at most one live instance of a value and hands
//! out read handles to it. Construction is lazy and happens exactly once,
//! even under concurrent first access; a failed construction leaves the
//! slot empty so a later call can retry. [`shutdown`](SharedResource::shutdown)
//! tears the instance down again, giving the resource an explicit
//! initialize/acquire/shutdown lifecycle instead of leaving teardown to
//! process exit.

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::fmt;
use std::ops::Deref;
use thiserror::Error;
use tracing::debug;

/// Error returned when a resource initializer fails.
///
/// The slot stays empty after a failure, so the next
/// [`get_or_create`](SharedResource::get_or_create) call runs its
/// initializer again.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
#[error("shared resource construction failed: {reason}")]
pub struct ConstructionFailure {
    reason: String,
}

impl ConstructionFailure {
    /// Create a construction failure with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Get the reason the construction failed.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A lazily constructed, process-wide unique instance of `T`.
///
/// The slot starts empty. The first successful
/// [`get_or_create`](Self::get_or_create) constructs the instance; every
/// later access observes that same instance until
/// [`shutdown`](Self::shutdown) drops it. Neither the resource nor the
/// handles it hands out can be cloned, so the single instance never leaks
/// out from behind the guard.
///
/// [`new`](Self::new) is `const`, which makes a `static` slot the natural
/// home for one:
///
/// ```rust
/// use vendo::SharedResource;
///
/// struct Config {
///     greeting: String,
/// }
///
/// static CONFIG: SharedResource<Config> = SharedResource::new();
///
/// let config = CONFIG
///     .get_or_create(|| {
///         Ok(Config {
///             greeting: "hello".to_string(),
///         })
///     })
///     .unwrap();
/// assert_eq!(config.greeting, "hello");
/// ```
///
/// A failed initializer leaves the slot empty:
///
/// ```rust
/// use vendo::{ConstructionFailure, SharedResource};
///
/// let resource: SharedResource<u32> = SharedResource::new();
///
/// let failed = resource.get_or_create(|| Err(ConstructionFailure::new("backend offline")));
/// assert!(failed.is_err());
/// assert!(!resource.is_initialized());
///
/// let value = resource.get_or_create(|| Ok(7)).unwrap();
/// assert_eq!(*value, 7);
/// ```
pub struct SharedResource<T> {
    slot: RwLock<Option<T>>,
}

impl<T> SharedResource<T> {
    /// Create an empty slot.
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Get the instance, constructing it first if the slot is empty.
    ///
    /// When several threads race on an empty slot, exactly one runs `init`;
    /// the rest block and then receive a handle to the instance it built.
    /// If `init` fails, the error is returned and the slot stays empty.
    ///
    /// The initializer must not touch the same resource: recursive
    /// initialization deadlocks.
    pub fn get_or_create<F>(&self, init: F) -> Result<ResourceHandle<'_, T>, ConstructionFailure>
    where
        F: FnOnce() -> Result<T, ConstructionFailure>,
    {
        if let Some(handle) = self.get() {
            return Ok(handle);
        }

        let mut slot = self.slot.write();
        if slot.is_none() {
            let value = init()?;
            *slot = Some(value);
            debug!(resource = std::any::type_name::<T>(), "shared resource created");
        }

        let read = RwLockWriteGuard::downgrade(slot);
        let guard = RwLockReadGuard::try_map(read, |slot| slot.as_ref())
            .ok()
            .expect("slot is occupied while the lock is held");
        Ok(ResourceHandle { guard })
    }

    /// Get the instance if it has been constructed.
    pub fn get(&self) -> Option<ResourceHandle<'_, T>> {
        let read = self.slot.read();
        RwLockReadGuard::try_map(read, |slot| slot.as_ref())
            .ok()
            .map(|guard| ResourceHandle { guard })
    }

    /// Check whether the slot currently holds an instance.
    pub fn is_initialized(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Drop the instance, emptying the slot.
    ///
    /// Blocks until every outstanding [`ResourceHandle`] has been released,
    /// then drops the instance while still holding the lock, so no caller
    /// can observe a second live instance. Returns `true` if an instance
    /// was dropped and `false` if the slot was already empty.
    ///
    /// Holding a handle while calling this from the same thread deadlocks.
    /// After shutdown the slot is empty again and the next
    /// [`get_or_create`](Self::get_or_create) starts a fresh lifecycle.
    pub fn shutdown(&self) -> bool {
        let mut slot = self.slot.write();
        match slot.take() {
            Some(value) => {
                drop(value);
                debug!(resource = std::any::type_name::<T>(), "shared resource shut down");
                true
            }
            None => false,
        }
    }
}

impl<T> Default for SharedResource<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Read handle to the shared instance.
///
/// Dereferences to `T`. The instance cannot be dropped by
/// [`shutdown`](SharedResource::shutdown) while a handle is alive, so hold
/// handles briefly and release them rather than caching them.
pub struct ResourceHandle<'a, T> {
    guard: MappedRwLockReadGuard<'a, T>,
}

impl<T> Deref for ResourceHandle<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T: fmt::Debug> fmt::Debug for ResourceHandle<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::thread;
    use std::time::{Duration, Instant};

    static GLOBAL: SharedResource<Vec<u32>> = SharedResource::new();

    #[test]
    fn empty_slot_reports_uninitialized() {
        let resource: SharedResource<u32> = SharedResource::new();
        assert!(resource.get().is_none());
        assert!(!resource.is_initialized());
    }

    #[test]
    fn initializer_runs_exactly_once() {
        let resource: SharedResource<u32> = SharedResource::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..5 {
            let handle = resource
                .get_or_create(|| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                })
                .unwrap();
            assert_eq!(*handle, 42);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn every_access_sees_the_same_instance() {
        let resource: SharedResource<String> = SharedResource::new();

        let first = resource.get_or_create(|| Ok("shared".to_string())).unwrap();
        let first_addr = &*first as *const String;
        drop(first);

        let second = resource.get().unwrap();
        assert!(std::ptr::eq(&*second, first_addr));
    }

    #[test]
    fn failed_construction_leaves_slot_empty_for_retry() {
        let resource: SharedResource<u32> = SharedResource::new();

        let failed = resource.get_or_create(|| Err(ConstructionFailure::new("boom")));
        assert_eq!(failed.unwrap_err().reason(), "boom");
        assert!(!resource.is_initialized());

        let value = resource.get_or_create(|| Ok(9)).unwrap();
        assert_eq!(*value, 9);
    }

    #[test]
    fn construction_failure_displays_reason() {
        let failure = ConstructionFailure::new("backend offline");
        assert_eq!(
            failure.to_string(),
            "shared resource construction failed: backend offline"
        );
    }

    #[test]
    fn shutdown_drops_the_instance_and_resets_the_slot() {
        static DROPS: AtomicUsize = AtomicUsize::new(0);

        struct Tracked;
        impl Drop for Tracked {
            fn drop(&mut self) {
                DROPS.fetch_add(1, Ordering::SeqCst);
            }
        }

        let resource: SharedResource<Tracked> = SharedResource::new();
        resource.get_or_create(|| Ok(Tracked)).unwrap();
        assert!(resource.is_initialized());
        assert_eq!(DROPS.load(Ordering::SeqCst), 0);

        assert!(resource.shutdown());
        assert_eq!(DROPS.load(Ordering::SeqCst), 1);
        assert!(!resource.is_initialized());
        assert!(resource.get().is_none());

        assert!(!resource.shutdown());

        resource.get_or_create(|| Ok(Tracked)).unwrap();
        assert!(resource.is_initialized());
    }

    #[test]
    fn concurrent_first_access_constructs_once() {
        let resource: SharedResource<u64> = SharedResource::new();
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(8);

        thread::scope(|s| {
            let mut workers = Vec::new();
            for _ in 0..8 {
                workers.push(s.spawn(|| {
                    barrier.wait();
                    let handle = resource
                        .get_or_create(|| {
                            calls.fetch_add(1, Ordering::SeqCst);
                            Ok(7)
                        })
                        .unwrap();
                    &*handle as *const u64 as usize
                }));
            }

            let addresses: Vec<usize> = workers.into_iter().map(|w| w.join().unwrap()).collect();
            assert!(addresses.windows(2).all(|pair| pair[0] == pair[1]));
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn shutdown_waits_for_outstanding_handles() {
        let resource: SharedResource<u32> = SharedResource::new();
        resource.get_or_create(|| Ok(1)).unwrap();

        let acquired = Barrier::new(2);

        thread::scope(|s| {
            s.spawn(|| {
                let handle = resource.get().unwrap();
                acquired.wait();
                thread::sleep(Duration::from_millis(50));
                drop(handle);
            });

            acquired.wait();
            let start = Instant::now();
            assert!(resource.shutdown());
            assert!(start.elapsed() >= Duration::from_millis(30));
        });
    }

    #[test]
    fn usable_as_a_static() {
        let handle = GLOBAL.get_or_create(|| Ok(vec![1, 2, 3])).unwrap();
        assert_eq!(handle.len(), 3);
    }
}

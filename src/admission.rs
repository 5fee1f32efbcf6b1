//! Admission controller (spec.md §4.3): gates how many connections may be
//! simultaneously active.
//!
//! `max_connections == 0` means unbounded, which a fixed-capacity
//! semaphore can't express directly — so we branch: unbounded skips the
//! semaphore entirely, bounded acquires/releases permits on a
//! `tokio::sync::Semaphore` sized to `max_connections` (spec.md §9, "a
//! fixed-capacity semaphore works when `maxConnections > 0`... the
//! `maxConnections == 0` case requires a branch"). `enter`/`leave` stay a
//! manual pair rather than an RAII guard because a connection's admission
//! slot and its socket lifetime are managed independently by the listener
//! and the connection handler.
//!
//! A single `tokio::sync::Notify` permit was tried first and discarded: it
//! coalesces multiple pending `notify_one()` calls into one stored permit,
//! so two `leave()`s arriving before either waiter is polled wake only one
//! of them — the other strands until some later, unrelated `leave()`.
//! `Semaphore::add_permits` has no such coalescing; each released permit
//! is handed to exactly one queued waiter.

use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;

pub struct AdmissionController {
    /// `None` when unbounded; `Some` sized to `max_connections` otherwise.
    semaphore: Option<Semaphore>,
    active: AtomicUsize,
}

impl AdmissionController {
    pub fn new(max_connections: usize) -> Self {
        AdmissionController {
            semaphore: if max_connections == 0 {
                None
            } else {
                Some(Semaphore::new(max_connections))
            },
            active: AtomicUsize::new(0),
        }
    }

    /// Block until admitted, then count this connection as active.
    pub async fn enter(&self) {
        if let Some(semaphore) = &self.semaphore {
            // The permit is released explicitly by `leave()`, not when a
            // guard drops, so it's forgotten here rather than held.
            semaphore
                .acquire()
                .await
                .expect("semaphore is never closed")
                .forget();
        }
        self.active.fetch_add(1, Ordering::SeqCst);
    }

    /// Stop counting this connection as active and free its slot, if any.
    pub fn leave(&self) {
        let previous = self.active.fetch_sub(1, Ordering::SeqCst);
        debug_assert!(previous > 0, "leave() without a matching enter()");
        if let Some(semaphore) = &self.semaphore {
            semaphore.add_permits(1);
        }
    }

    /// Current number of active connections. Exposed for logging/tests only.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

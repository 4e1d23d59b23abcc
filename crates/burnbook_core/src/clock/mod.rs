//! Time sources, the auto-seal countdown, and deferred task scheduling.
//!
//! # Responsibility
//! - Provide wall-clock reads for note timestamps.
//! - Drive the single countdown that auto-seals a draft.
//! - Keep deferred work as explicit, cancellable, keyed tasks.
//!
//! # Invariants
//! - At most one countdown is armed at any time.
//! - Scheduled tasks fire in deadline order; equal deadlines fire in
//!   scheduling order.

pub mod countdown;
pub mod scheduler;

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock source used for `created_at` stamps.
pub trait Clock: Send {
    /// Current time in Unix epoch milliseconds.
    fn now_epoch_ms(&self) -> i64;
}

/// Clock backed by the operating system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Manually driven clock for deterministic callers.
///
/// Clones share the same underlying instant.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now_ms: Arc::new(AtomicI64::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_epoch_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

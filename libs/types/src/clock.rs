//! Time source abstraction
//!
//! Entity constructors take explicit Unix-nanosecond timestamps; whoever builds
//! entities reads them from a `Clock` so tests can pin time.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of Unix-nanosecond timestamps
pub trait Clock: Send + Sync {
    fn now_nanos(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_nanos(&self) -> i64 {
        let now = Utc::now();
        // Out of range only after the year 2262.
        now.timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000))
    }
}

/// Deterministic clock that advances by a fixed step on every read
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
    step: i64,
}

impl ManualClock {
    pub fn new(start: i64) -> Self {
        Self::with_step(start, 0)
    }

    /// Clock returning `start`, `start + step`, `start + 2*step`, ...
    pub fn with_step(start: i64, step: i64) -> Self {
        Self {
            now: AtomicI64::new(start),
            step,
        }
    }

    pub fn set(&self, nanos: i64) {
        self.now.store(nanos, Ordering::SeqCst);
    }

    pub fn advance(&self, nanos: i64) {
        self.now.fetch_add(nanos, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_nanos(&self) -> i64 {
        self.now.fetch_add(self.step, Ordering::SeqCst)
    }
}

use std::sync::atomic::{AtomicI64, Ordering};

/// Source of the current wall-clock time in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 { chrono::Utc::now().timestamp_millis() }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn new(now_ms: i64) -> Self { Self(AtomicI64::new(now_ms)) }

    pub fn set(&self, now_ms: i64) { self.0.store(now_ms, Ordering::SeqCst); }

    pub fn advance(&self, delta_ms: i64) { self.0.fetch_add(delta_ms, Ordering::SeqCst); }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 { self.0.load(Ordering::SeqCst) }
}

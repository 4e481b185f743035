use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of wall-clock milliseconds for the rate limiter.
/// Implementors must be thread-safe, the limiter calls `now_millis` from every request task.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

// Wall clock backed by chrono. Times before the epoch read as 0.
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Hand-driven clock, cloned handles share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(start_millis)),
        }
    }

    pub fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: u64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

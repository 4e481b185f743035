use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::interval;

use crate::clock::{Clock, SystemClock};
use crate::config::RateLimitConfig;
use crate::metrics::TRACKED_CLIENTS;

// Rate limit window - tracks requests per client
#[derive(Debug)]
struct ClientWindow {
    start: u64,
    count: AtomicU64,
    last_seen: AtomicU64,
}

impl ClientWindow {
    fn new(now: u64) -> Self {
        Self {
            start: now,
            count: AtomicU64::new(0),
            last_seen: AtomicU64::new(now),
        }
    }
}

pub struct RateLimiter {
    windows: DashMap<String, Arc<ClientWindow>>,
    max_requests: u64,
    window_ms: u64,
    idle_ms: Option<u64>,
    clock: Arc<dyn Clock>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests: u64::from(config.max_requests),
            window_ms: config.window_ms,
            idle_ms: config.idle_ms,
            clock,
        }
    }

    // counts one attempt, rejected ones included
    pub fn allow(&self, client_id: &str) -> bool {
        let now = self.clock.now_millis();

        let mut window = self.current_window(client_id, now);
        if now.saturating_sub(window.start) > self.window_ms {
            window = self.replace_expired(client_id, &window, now);
        }

        window.last_seen.fetch_max(now, Ordering::Relaxed);
        let count = window.count.fetch_add(1, Ordering::AcqRel) + 1;
        count <= self.max_requests
    }

    fn current_window(&self, client_id: &str, now: u64) -> Arc<ClientWindow> {
        if let Some(window) = self.windows.get(client_id) {
            return Arc::clone(window.value());
        }

        let window = self
            .windows
            .entry(client_id.to_owned())
            .or_insert_with(|| Arc::new(ClientWindow::new(now)));
        Arc::clone(window.value())
    }

    // Install a fresh window only if `stale` is still the current one.
    fn replace_expired(
        &self,
        client_id: &str,
        stale: &Arc<ClientWindow>,
        now: u64,
    ) -> Arc<ClientWindow> {
        match self.windows.entry(client_id.to_owned()) {
            Entry::Occupied(mut slot) => {
                if Arc::ptr_eq(slot.get(), stale) {
                    let fresh = Arc::new(ClientWindow::new(now));
                    slot.insert(Arc::clone(&fresh));
                    fresh
                } else {
                    Arc::clone(slot.get())
                }
            }
            // evicted between lookup and replace
            Entry::Vacant(slot) => {
                let fresh = slot.insert(Arc::new(ClientWindow::new(now)));
                Arc::clone(fresh.value())
            }
        }
    }

    // drop clients idle longer than the threshold, returns how many went
    pub fn evict_idle(&self) -> usize {
        let Some(idle_ms) = self.idle_ms else {
            return 0;
        };
        let now = self.clock.now_millis();
        let before = self.windows.len();
        self.windows.retain(|_, window| {
            now.saturating_sub(window.last_seen.load(Ordering::Relaxed)) <= idle_ms
        });
        before.saturating_sub(self.windows.len())
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    pub fn evicts_idle_clients(&self) -> bool {
        self.idle_ms.is_some()
    }
}

// Idle client sweeper - runs until the runtime shuts down
pub async fn sweep_idle_clients(limiter: Arc<RateLimiter>, every: Duration) {
    let mut interval = interval(every);

    tracing::info!(interval = ?every, "idle client sweeper started");

    loop {
        interval.tick().await;

        let evicted = limiter.evict_idle();
        let tracked = limiter.tracked_clients();
        TRACKED_CLIENTS.set(tracked as f64);

        if evicted > 0 {
            tracing::debug!(evicted, tracked, "evicted idle rate limit windows");
        }
    }
}

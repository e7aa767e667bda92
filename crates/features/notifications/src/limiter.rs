use atelier_kernel::domain::config::RateLimitConfig;
use moka::sync::Cache;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window limiter keyed by recipient.
///
/// Windows live in a bounded cache; a recipient evicted under pressure simply starts a new
/// window.
#[derive(Clone)]
pub struct RateLimiter {
    max_messages: u32,
    window: Duration,
    windows: Cache<String, Arc<Mutex<Window>>>,
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("max_messages", &self.max_messages)
            .field("window", &self.window)
            .field("tracked", &self.windows.entry_count())
            .finish()
    }
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: &RateLimitConfig) -> Self {
        let window = Duration::from_secs(config.window_seconds.max(1));
        Self {
            max_messages: config.max_messages,
            window,
            windows: Cache::builder().max_capacity(config.capacity).time_to_live(window).build(),
        }
    }

    /// Counts one message for `key`; `false` when the window is already full.
    pub fn try_acquire(&self, key: &str) -> bool {
        let now = Instant::now();
        let entry = self
            .windows
            .get_with(key.to_owned(), || Arc::new(Mutex::new(Window { started: now, count: 0 })));
        let mut window = entry.lock();

        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }
        if window.count >= self.max_messages {
            return false;
        }
        window.count += 1;
        true
    }
}

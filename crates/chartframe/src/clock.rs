// File: crates/chartframe/src/clock.rs
// Summary: Injectable tick sources for animation frame pacing and input rate limiting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Time source consulted by animations and the wheel limiter.
///
/// `now` is measured from an arbitrary, fixed origin. `sleep` is the only
/// place a frame loop suspends.
pub trait TickSource: Send + Sync {
    fn now(&self) -> Duration;
    fn sleep(&self, d: Duration);
}

/// Monotonic wall clock backed by [`Instant`] and thread sleep.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }

    pub fn shared() -> Arc<dyn TickSource> {
        Arc::new(Self::new())
    }
}

impl Default for SystemClock {
    fn default() -> Self { Self::new() }
}

impl TickSource for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&self, d: Duration) {
        std::thread::sleep(d);
    }
}

/// Virtual clock: time only moves when someone sleeps on it or calls
/// [`ManualClock::advance`]. Clones share the same timeline.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    nanos: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, d: Duration) {
        self.nanos.fetch_add(d.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl TickSource for ManualClock {
    fn now(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
    }

    fn sleep(&self, d: Duration) {
        self.advance(d);
    }
}

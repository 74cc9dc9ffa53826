use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond time source.
///
/// Values are monotonic and share an arbitrary origin per source, so they are
/// only comparable with other values from the same source.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Wall-clock monotonic source anchored at construction.
#[derive(Debug, Copy, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }

    /// Milliseconds between the origin and `at`. Instants before the origin map to 0.
    pub fn ms_at(&self, at: Instant) -> f64 {
        at.saturating_duration_since(self.origin).as_secs_f64() * 1000.0
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.ms_at(Instant::now())
    }
}

/// Hand-driven source for deterministic tests and offline playback.
///
/// Clones share the same underlying time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

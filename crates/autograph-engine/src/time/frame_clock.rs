use std::time::{Duration, Instant};

/// Gap after which a frame counts as a stall (debugger, minimized window).
const STALL: Duration = Duration::from_millis(250);

/// When a frame started and how far it is from the previous one.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    pub now: Instant,
    /// Time since the previous tick; zero on the first frame.
    pub interval: Duration,
    pub index: u64,
}

impl FrameTime {
    /// The previous frame was too long ago for its interval to mean anything.
    pub fn stalled(&self) -> bool {
        self.interval >= STALL
    }
}

/// Stamps each presented frame. Owned by the runtime, one per window.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last: Option<Instant>,
    next_index: u64,
}

impl FrameClock {
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let interval = self
            .last
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last = Some(now);

        let ft = FrameTime { now, interval, index: self.next_index };
        self.next_index += 1;
        if ft.stalled() {
            log::debug!("frame {} arrived {interval:?} after the previous one", ft.index);
        }
        ft
    }
}

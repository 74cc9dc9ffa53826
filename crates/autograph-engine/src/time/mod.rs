//! Clocks.
//!
//! [`FrameClock`] stamps frames for the runtime. [`TimeSource`] yields the
//! millisecond timestamps that pointer samples and replay pacing use.

mod clock;
mod frame_clock;

pub use clock::{ManualClock, MonotonicClock, TimeSource};
pub use frame_clock::{FrameClock, FrameTime};

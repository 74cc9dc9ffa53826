use std::time::Instant;

use super::types::InputEvent;

/// An input event and the instant the runtime received it.
///
/// Pointer samples take their time from `at` rather than from the frame that
/// drains them, so moves batched between two frames keep their real spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEvent {
    pub at: Instant,
    pub event: InputEvent,
}

/// Events received since the last frame, oldest first.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<TimedEvent>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn push(&mut self, at: Instant, event: InputEvent) {
        self.events.push(TimedEvent { at, event });
    }
}

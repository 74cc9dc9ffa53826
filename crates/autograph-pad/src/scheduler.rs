//! Display-frame requests for animated replay.
//!
//! The replay engine never sleeps or sets timers. It asks a
//! [`FrameScheduler`] for the next display frame and is called back with the
//! request handle and the frame time.

use std::collections::VecDeque;

/// Handle for one requested frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    /// Wraps a scheduler-specific id. Ids must be unique per scheduler.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

pub trait FrameScheduler {
    /// Asks for a callback on the next display frame.
    fn request_frame(&mut self) -> FrameRequest;

    /// Withdraws a request. Unknown or already dispatched requests are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Queue of pending requests, drained by the host once per presented frame.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: VecDeque<FrameRequest>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest pending request.
    pub fn take_due(&mut self) -> Option<FrameRequest> {
        self.pending.pop_front()
    }

    pub fn is_pending(&self, request: FrameRequest) -> bool {
        self.pending.contains(&request)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameRequest {
        self.next += 1;
        let request = FrameRequest::new(self.next);
        self.pending.push_back(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_unique_and_fifo() {
        let mut q = FrameQueue::new();
        let a = q.request_frame();
        let b = q.request_frame();
        assert_ne!(a, b);
        assert_eq!(q.take_due(), Some(a));
        assert_eq!(q.take_due(), Some(b));
        assert_eq!(q.take_due(), None);
    }

    #[test]
    fn cancel_removes_only_that_request() {
        let mut q = FrameQueue::new();
        let a = q.request_frame();
        let b = q.request_frame();
        q.cancel_frame(a);
        assert!(!q.is_pending(a));
        assert!(q.is_pending(b));
        assert_eq!(q.len(), 1);

        q.cancel_frame(a);
        assert_eq!(q.len(), 1);
    }
}

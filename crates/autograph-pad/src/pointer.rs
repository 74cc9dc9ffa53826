//! Pointer input as seen by the capture engine.
//!
//! Mouse and touch arrive in different shapes; both are reduced to a phase
//! plus one sample for the contact the engine is tracking.

use autograph_engine::coords::Vec2;

/// Lifecycle phase of a pointer event.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The pointer left the surface.
    Leave,
    /// The platform aborted the gesture.
    Cancel,
}

/// One sampled pointer position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerSample {
    /// Position in the parent's logical coordinate space (client location).
    pub location: Vec2,
    /// Monotonic milliseconds.
    pub timestamp: f64,
    /// Touch contact id; `None` for the mouse.
    pub contact: Option<u64>,
}

/// Anything that can drive the capture state machine.
pub trait PointerSource {
    fn phase(&self) -> PointerPhase;

    /// The sample for `tracked`, or for the primary contact when nothing is
    /// tracked yet. `None` when this event carries nothing for that contact.
    fn sample(&self, tracked: Option<u64>) -> Option<PointerSample>;
}

// ── mouse ─────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseActivity {
    pub phase: PointerPhase,
    pub location: Vec2,
    pub timestamp: f64,
}

impl MouseActivity {
    pub fn new(phase: PointerPhase, location: Vec2, timestamp: f64) -> Self {
        Self { phase, location, timestamp }
    }
}

impl PointerSource for MouseActivity {
    fn phase(&self) -> PointerPhase {
        self.phase
    }

    fn sample(&self, tracked: Option<u64>) -> Option<PointerSample> {
        // The mouse never continues a touch gesture.
        if tracked.is_some() {
            return None;
        }
        Some(PointerSample { location: self.location, timestamp: self.timestamp, contact: None })
    }
}

// ── touch ─────────────────────────────────────────────────────────────────

/// One finger in a touch event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Contact {
    pub id: u64,
    pub location: Vec2,
}

/// A touch event carrying one or more contacts.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchActivity {
    pub phase: PointerPhase,
    pub contacts: Vec<Contact>,
    pub timestamp: f64,
}

impl TouchActivity {
    pub fn new(phase: PointerPhase, contacts: Vec<Contact>, timestamp: f64) -> Self {
        Self { phase, contacts, timestamp }
    }

    /// Single-contact event, the shape winit delivers touches in.
    pub fn single(phase: PointerPhase, id: u64, location: Vec2, timestamp: f64) -> Self {
        Self::new(phase, vec![Contact { id, location }], timestamp)
    }
}

impl PointerSource for TouchActivity {
    fn phase(&self) -> PointerPhase {
        self.phase
    }

    fn sample(&self, tracked: Option<u64>) -> Option<PointerSample> {
        let contact = match tracked {
            Some(id) => self.contacts.iter().find(|c| c.id == id),
            None => self.contacts.first(),
        }?;
        Some(PointerSample {
            location: contact.location,
            timestamp: self.timestamp,
            contact: Some(contact.id),
        })
    }
}

//! Platform-neutral window input.
//!
//! The runtime translates winit events into [`InputEvent`]s, stamps each
//! with its arrival [`std::time::Instant`], and hands the batch to the app
//! once per frame.

mod frame;
mod state;
mod types;

pub(crate) mod platform;

pub use frame::{InputFrame, TimedEvent};
pub use state::InputState;
pub use types::{
    ButtonState, InputEvent, Key, Modifiers, MouseButton, PointerButtonEvent, PointerMoveEvent,
    TouchEvent, TouchPhase,
};

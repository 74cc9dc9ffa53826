//! The contract between the runtime and the application it drives.

mod frame;

use winit::event::WindowEvent;

pub use frame::{FrameCtx, WindowCtx};

/// Whether the runtime should keep running after a callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// An application hosted by [`crate::window::Runtime`].
///
/// Input arrives already translated in [`FrameCtx::input_frame`]; the raw
/// hook exists for events the translator does not cover.
pub trait App {
    /// Raw window event, seen before the runtime reacts to it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// One rendered frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitButton, TouchPhase as WinitPhase, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::Window;

use crate::input::{
    ButtonState, InputEvent, InputState, Key, Modifiers, MouseButton, PointerButtonEvent,
    PointerMoveEvent, TouchEvent, TouchPhase,
};

/// Maps a winit window event onto an [`InputEvent`], or `None` when the pad
/// has no use for it. Positions come out in logical pixels.
pub(crate) fn translate_window_event(
    window: &Window,
    held: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    let ev = match event {
        WindowEvent::ModifiersChanged(m) => InputEvent::ModifiersChanged(modifiers(m.state())),
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,
        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = logical(window, *position);
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
        }
        WindowEvent::MouseInput { state, button, .. } => {
            // Button events carry no position; use the last cursor move.
            let (x, y) = held.pointer.unwrap_or_default();
            InputEvent::PointerButton(PointerButtonEvent {
                button: mouse_button(*button),
                state: (*state).into(),
                x,
                y,
                modifiers: held.modifiers,
            })
        }
        WindowEvent::Touch(touch) => {
            let (x, y) = logical(window, touch.location);
            InputEvent::Touch(TouchEvent {
                id: touch.id,
                phase: match touch.phase {
                    WinitPhase::Started => TouchPhase::Started,
                    WinitPhase::Moved => TouchPhase::Moved,
                    WinitPhase::Ended => TouchPhase::Ended,
                    WinitPhase::Cancelled => TouchPhase::Cancelled,
                },
                x,
                y,
            })
        }
        WindowEvent::KeyboardInput { event, .. } => InputEvent::Key {
            key: key(event.physical_key),
            state: event.state.into(),
            modifiers: held.modifiers,
            repeat: event.repeat,
        },
        _ => return None,
    };
    Some(ev)
}

impl From<ElementState> for ButtonState {
    fn from(state: ElementState) -> Self {
        match state {
            ElementState::Pressed => ButtonState::Pressed,
            ElementState::Released => ButtonState::Released,
        }
    }
}

fn logical(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let pos = pos.to_logical::<f64>(window.scale_factor());
    (pos.x as f32, pos.y as f32)
}

fn modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn mouse_button(b: WinitButton) -> MouseButton {
    match b {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Right => MouseButton::Right,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Back => MouseButton::Other(3),
        WinitButton::Forward => MouseButton::Other(4),
        WinitButton::Other(n) => MouseButton::Other(n),
    }
}

fn key(physical: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = physical else {
        return Key::Other;
    };
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Space => Key::Space,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        _ => Key::Other,
    }
}

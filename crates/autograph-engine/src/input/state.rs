use std::collections::{HashMap, HashSet};
use std::time::Instant;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Modifiers, MouseButton, PointerButtonEvent, TouchEvent, TouchPhase};

/// What is held down right now, and where.
///
/// The winit translator reads the cursor position and modifiers from here,
/// since button events do not carry them.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Cursor position in logical pixels; `None` while outside the window.
    pub pointer: Option<(f32, f32)>,
    pub buttons_down: HashSet<MouseButton>,
    /// Touch contacts currently down, by id.
    pub touches: HashMap<u64, (f32, f32)>,
}

impl InputState {
    /// Folds `ev` into the held state and queues it on `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, at: Instant, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,
            InputEvent::Key { modifiers, .. } => self.modifiers = *modifiers,
            InputEvent::Focused(focused) => {
                self.focused = *focused;
                if !focused {
                    self.buttons_down.clear();
                    self.touches.clear();
                }
            }
            InputEvent::PointerMoved(p) => self.pointer = Some((p.x, p.y)),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, .. }) => {
                self.pointer = Some((*x, *y));
                match state {
                    ButtonState::Pressed => self.buttons_down.insert(*button),
                    ButtonState::Released => self.buttons_down.remove(button),
                };
            }
            InputEvent::Touch(TouchEvent { id, phase, x, y }) => match phase {
                TouchPhase::Started | TouchPhase::Moved => {
                    self.touches.insert(*id, (*x, *y));
                }
                TouchPhase::Ended | TouchPhase::Cancelled => {
                    self.touches.remove(id);
                }
            },
        }
        frame.push(at, ev);
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::super::types::PointerMoveEvent;
    use super::*;

    fn left(state: ButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x: 5.0,
            y: 6.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn button_press_moves_pointer_and_is_queued() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, Instant::now(), left(ButtonState::Pressed));

        assert!(st.button_down(MouseButton::Left));
        assert_eq!(st.pointer, Some((5.0, 6.0)));
        assert_eq!(fr.events.len(), 1);

        st.apply_event(&mut fr, Instant::now(), left(ButtonState::Released));
        assert!(!st.button_down(MouseButton::Left));
    }

    #[test]
    fn focus_loss_drops_held_state() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let now = Instant::now();

        st.apply_event(&mut fr, now, left(ButtonState::Pressed));
        st.apply_event(&mut fr, now, InputEvent::Touch(TouchEvent { id: 3, phase: TouchPhase::Started, x: 0.0, y: 0.0 }));
        st.apply_event(&mut fr, now, InputEvent::Focused(false));

        assert!(!st.button_down(MouseButton::Left));
        assert!(st.touches.is_empty());
    }

    #[test]
    fn touches_are_tracked_until_lifted() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let now = Instant::now();
        let touch = |id, phase| InputEvent::Touch(TouchEvent { id, phase, x: 1.0, y: 2.0 });

        st.apply_event(&mut fr, now, touch(1, TouchPhase::Started));
        st.apply_event(&mut fr, now, touch(2, TouchPhase::Started));
        st.apply_event(&mut fr, now, touch(1, TouchPhase::Ended));

        assert_eq!(st.touches.len(), 1);
        assert!(st.touches.contains_key(&2));
    }

    #[test]
    fn leaving_clears_pointer() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(8);

        st.apply_event(&mut fr, t0, InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 1.0 }));
        st.apply_event(&mut fr, t1, InputEvent::PointerLeft);

        assert_eq!(st.pointer, None);
        assert_eq!(fr.events[0].at, t0);
        assert_eq!(fr.events[1].at, t1);
        fr.clear();
        assert!(fr.events.is_empty());
    }
}

use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    PointerMoveEvent,
};

/// What is held right now, and where the pointer is.
///
/// Transitions (presses, releases, drag, wheel) go to the [`InputFrame`] passed to
/// [`apply_event`](Self::apply_event).
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Logical pixels; `None` while the pointer is outside the window.
    pub pointer_pos: Option<(f32, f32)>,
    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = m,

            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are not delivered to an unfocused window.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                if let (Some((px, py)), false) = (self.pointer_pos, self.buttons_down.is_empty()) {
                    frame.drag = frame.drag + Vec2::new(x - px, y - py);
                }
                self.pointer_pos = Some((x, y));
            }

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { key, state, modifiers, repeat } => {
                self.modifiers = modifiers;
                match state {
                    KeyState::Pressed if self.keys_down.insert(key) || repeat => {
                        frame.keys_pressed.insert(key);
                    }
                    KeyState::Released if self.keys_down.remove(&key) => {
                        frame.keys_released.insert(key);
                    }
                    _ => {}
                }
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, modifiers }) => {
                self.pointer_pos = Some((x, y));
                self.modifiers = modifiers;
                match state {
                    MouseButtonState::Pressed if self.buttons_down.insert(button) => {
                        frame.buttons_pressed.insert(button);
                    }
                    MouseButtonState::Released if self.buttons_down.remove(&button) => {
                        frame.buttons_released.insert(button);
                    }
                    _ => {}
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = modifiers;
                frame.wheel += delta.vertical_px();
            }
        }

        frame.push_event(ev);
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    #[inline]
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn key(key: Key, state: KeyState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, modifiers: Modifiers::default(), repeat }
    }

    fn button(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn press_and_release_are_recorded_once() {
        let (mut st, mut fr) = (InputState::default(), InputFrame::default());
        st.apply_event(&mut fr, key(Key::R, KeyState::Pressed, false));
        assert!(fr.pressed(Key::R));
        assert!(st.key_down(Key::R));

        st.apply_event(&mut fr, key(Key::R, KeyState::Released, false));
        assert!(fr.keys_released.contains(&Key::R));
        assert!(!st.key_down(Key::R));
    }

    #[test]
    fn key_repeat_counts_as_press() {
        let (mut st, mut fr) = (InputState::default(), InputFrame::default());
        st.apply_event(&mut fr, key(Key::ArrowLeft, KeyState::Pressed, false));
        fr.clear();
        st.apply_event(&mut fr, key(Key::ArrowLeft, KeyState::Pressed, true));
        assert!(fr.pressed(Key::ArrowLeft));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let (mut st, mut fr) = (InputState::default(), InputFrame::default());
        st.apply_event(&mut fr, key(Key::Shift, KeyState::Pressed, false));
        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(st.keys_down.is_empty());
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn drag_accumulates_only_while_held() {
        let (mut st, mut fr) = (InputState::default(), InputFrame::default());
        st.apply_event(&mut fr, moved(10.0, 10.0));
        st.apply_event(&mut fr, moved(20.0, 10.0));
        assert_eq!(fr.drag, Vec2::zero());

        st.apply_event(&mut fr, button(MouseButtonState::Pressed, 20.0, 10.0));
        st.apply_event(&mut fr, moved(25.0, 4.0));
        st.apply_event(&mut fr, moved(30.0, 2.0));
        assert_eq!(fr.drag, Vec2::new(10.0, -8.0));
    }

    #[test]
    fn wheel_lines_are_converted_to_pixels() {
        let (mut st, mut fr) = (InputState::default(), InputFrame::default());
        let ev = InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y: 2.0 },
            modifiers: Modifiers::default(),
        };
        st.apply_event(&mut fr, ev);
        assert_eq!(fr.wheel, 2.0 * MouseWheelDelta::LINE_HEIGHT);

        fr.clear();
        assert_eq!(fr.wheel, 0.0);
    }
}

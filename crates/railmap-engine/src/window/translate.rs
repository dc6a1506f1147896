//! winit events to platform-agnostic [`InputEvent`]s.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    MouseWheelDelta, PointerButtonEvent, PointerMoveEvent,
};

/// Translates `event`, or `None` for events input does not track. Positions are
/// converted to logical pixels with `scale`.
pub(super) fn input_event(event: &WindowEvent, state: &InputState, scale: f64) -> Option<InputEvent> {
    let logical = |p: PhysicalPosition<f64>| {
        let p = p.to_logical::<f64>(scale);
        (p.x as f32, p.y as f32)
    };
    let pressed = |s: ElementState| s == ElementState::Pressed;

    let ev = match event {
        WindowEvent::ModifiersChanged(m) => InputEvent::ModifiersChanged(modifiers(m.state())),
        WindowEvent::Focused(focused) => InputEvent::Focused(*focused),
        WindowEvent::CursorLeft { .. } => InputEvent::PointerLeft,

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = logical(*position);
            InputEvent::PointerMoved(PointerMoveEvent { x, y })
        }

        WindowEvent::MouseInput { state: s, button, .. } => {
            let (x, y) = state.pointer_pos.unwrap_or_default();
            InputEvent::PointerButton(PointerButtonEvent {
                button: mouse_button(*button),
                state: if pressed(*s) { MouseButtonState::Pressed } else { MouseButtonState::Released },
                x,
                y,
                modifiers: state.modifiers,
            })
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let delta = match *delta {
                MouseScrollDelta::LineDelta(x, y) => MouseWheelDelta::Line { x, y },
                MouseScrollDelta::PixelDelta(p) => {
                    let (x, y) = logical(p);
                    MouseWheelDelta::Pixel { x, y }
                }
            };
            InputEvent::MouseWheel { delta, modifiers: state.modifiers }
        }

        WindowEvent::KeyboardInput { event, .. } => InputEvent::Key {
            key: key(event.physical_key),
            state: if pressed(event.state) { KeyState::Pressed } else { KeyState::Released },
            modifiers: state.modifiers,
            repeat: event.repeat,
        },

        _ => return None,
    };
    Some(ev)
}

fn modifiers(m: ModifiersState) -> Modifiers {
    Modifiers { shift: m.shift_key(), ctrl: m.control_key() }
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

fn key(pk: PhysicalKey) -> Key {
    let PhysicalKey::Code(code) = pk else {
        // Native codes have no stable numeric form.
        return Key::Unknown(0);
    };
    match code {
        KeyCode::Escape => Key::Escape,
        KeyCode::Space => Key::Space,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Equal | KeyCode::NumpadAdd => Key::Plus,
        KeyCode::Minus | KeyCode::NumpadSubtract => Key::Minus,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyR => Key::R,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
        KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_keys_cover_main_row_and_keypad() {
        assert_eq!(key(PhysicalKey::Code(KeyCode::Equal)), Key::Plus);
        assert_eq!(key(PhysicalKey::Code(KeyCode::NumpadAdd)), Key::Plus);
        assert_eq!(key(PhysicalKey::Code(KeyCode::NumpadSubtract)), Key::Minus);
    }

    #[test]
    fn unbound_keys_are_unknown() {
        assert!(matches!(key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Unknown(_)));
    }

    #[test]
    fn side_buttons_map_to_other() {
        assert_eq!(mouse_button(WinitButton::Back), MouseButton::Other(3));
        assert_eq!(mouse_button(WinitButton::Forward), MouseButton::Other(4));
    }

    #[test]
    fn modifiers_keep_shift_and_ctrl() {
        let m = modifiers(ModifiersState::SHIFT | ModifiersState::ALT);
        assert_eq!(m, Modifiers { shift: true, ctrl: false });
    }

    #[test]
    fn focus_changes_pass_through() {
        let event = WindowEvent::Focused(true);
        assert_eq!(input_event(&event, &InputState::default(), 2.0), Some(InputEvent::Focused(true)));
    }
}

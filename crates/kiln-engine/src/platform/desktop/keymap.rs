use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};

use crate::input::KeyCode;

/// Translates a winit physical key into a [`KeyCode`].
///
/// Unmapped keys keep winit's discriminant in `KeyCode::Unknown`; keys winit
/// could not identify map to `Unknown(0)`.
pub fn map_key(physical: PhysicalKey) -> KeyCode {
    let code = match physical {
        PhysicalKey::Code(code) => code,
        PhysicalKey::Unidentified(_) => return KeyCode::Unknown(0),
    };

    match code {
        WinitKey::Escape => KeyCode::Escape,
        WinitKey::Enter | WinitKey::NumpadEnter => KeyCode::Enter,
        WinitKey::Tab => KeyCode::Tab,
        WinitKey::Backspace => KeyCode::Backspace,
        WinitKey::Space => KeyCode::Space,

        WinitKey::Insert => KeyCode::Insert,
        WinitKey::Delete => KeyCode::Delete,
        WinitKey::Home => KeyCode::Home,
        WinitKey::End => KeyCode::End,
        WinitKey::PageUp => KeyCode::PageUp,
        WinitKey::PageDown => KeyCode::PageDown,

        WinitKey::ArrowUp => KeyCode::Up,
        WinitKey::ArrowDown => KeyCode::Down,
        WinitKey::ArrowLeft => KeyCode::Left,
        WinitKey::ArrowRight => KeyCode::Right,

        WinitKey::ShiftLeft => KeyCode::ShiftLeft,
        WinitKey::ShiftRight => KeyCode::ShiftRight,
        WinitKey::ControlLeft => KeyCode::ControlLeft,
        WinitKey::ControlRight => KeyCode::ControlRight,
        WinitKey::AltLeft => KeyCode::AltLeft,
        WinitKey::AltRight => KeyCode::AltRight,
        WinitKey::SuperLeft => KeyCode::SuperLeft,
        WinitKey::SuperRight => KeyCode::SuperRight,

        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyB => KeyCode::B,
        WinitKey::KeyC => KeyCode::C,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::KeyF => KeyCode::F,
        WinitKey::KeyG => KeyCode::G,
        WinitKey::KeyH => KeyCode::H,
        WinitKey::KeyI => KeyCode::I,
        WinitKey::KeyJ => KeyCode::J,
        WinitKey::KeyK => KeyCode::K,
        WinitKey::KeyL => KeyCode::L,
        WinitKey::KeyM => KeyCode::M,
        WinitKey::KeyN => KeyCode::N,
        WinitKey::KeyO => KeyCode::O,
        WinitKey::KeyP => KeyCode::P,
        WinitKey::KeyQ => KeyCode::Q,
        WinitKey::KeyR => KeyCode::R,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyT => KeyCode::T,
        WinitKey::KeyU => KeyCode::U,
        WinitKey::KeyV => KeyCode::V,
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyX => KeyCode::X,
        WinitKey::KeyY => KeyCode::Y,
        WinitKey::KeyZ => KeyCode::Z,

        WinitKey::Digit0 | WinitKey::Numpad0 => KeyCode::Num0,
        WinitKey::Digit1 | WinitKey::Numpad1 => KeyCode::Num1,
        WinitKey::Digit2 | WinitKey::Numpad2 => KeyCode::Num2,
        WinitKey::Digit3 | WinitKey::Numpad3 => KeyCode::Num3,
        WinitKey::Digit4 | WinitKey::Numpad4 => KeyCode::Num4,
        WinitKey::Digit5 | WinitKey::Numpad5 => KeyCode::Num5,
        WinitKey::Digit6 | WinitKey::Numpad6 => KeyCode::Num6,
        WinitKey::Digit7 | WinitKey::Numpad7 => KeyCode::Num7,
        WinitKey::Digit8 | WinitKey::Numpad8 => KeyCode::Num8,
        WinitKey::Digit9 | WinitKey::Numpad9 => KeyCode::Num9,

        WinitKey::F1 => KeyCode::F1,
        WinitKey::F2 => KeyCode::F2,
        WinitKey::F3 => KeyCode::F3,
        WinitKey::F4 => KeyCode::F4,
        WinitKey::F5 => KeyCode::F5,
        WinitKey::F6 => KeyCode::F6,
        WinitKey::F7 => KeyCode::F7,
        WinitKey::F8 => KeyCode::F8,
        WinitKey::F9 => KeyCode::F9,
        WinitKey::F10 => KeyCode::F10,
        WinitKey::F11 => KeyCode::F11,
        WinitKey::F12 => KeyCode::F12,

        other => KeyCode::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn letters_and_modifiers() {
        assert_eq!(map_key(PhysicalKey::Code(WinitKey::KeyW)), KeyCode::W);
        assert_eq!(map_key(PhysicalKey::Code(WinitKey::ShiftRight)), KeyCode::ShiftRight);
        assert!(map_key(PhysicalKey::Code(WinitKey::ControlLeft)).is_modifier());
    }

    #[test]
    fn numpad_digits_fold_into_digits() {
        assert_eq!(map_key(PhysicalKey::Code(WinitKey::Numpad7)), KeyCode::Num7);
        assert_eq!(map_key(PhysicalKey::Code(WinitKey::NumpadEnter)), KeyCode::Enter);
    }

    #[test]
    fn unmapped_keys_are_unknown() {
        assert!(matches!(map_key(PhysicalKey::Code(WinitKey::CapsLock)), KeyCode::Unknown(_)));
        assert_eq!(
            map_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            KeyCode::Unknown(0)
        );
    }
}

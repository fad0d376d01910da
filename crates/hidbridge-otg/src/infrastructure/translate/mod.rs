//! Translation between winit input identifiers and the canonical HID tables.
//!
//! Both lookup directions are total functions: no raw identifier maps to
//! more than one normalized code, and unrecognized identifiers map to the
//! `Unknown` sentinel so device-originated events are forwarded rather than
//! dropped.  The reverse tables are the reference used to verify round-trip
//! fidelity.

use hidbridge_core::{HidKeyCode, HidMouseButton};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Translates a winit physical key code to a [`HidKeyCode`].
///
/// Returns [`HidKeyCode::Unknown`] for keys without a usage on page 0x07.
pub fn keycode_to_hid(code: KeyCode) -> HidKeyCode {
    match code {
        KeyCode::KeyA => HidKeyCode::KeyA,
        KeyCode::KeyB => HidKeyCode::KeyB,
        KeyCode::KeyC => HidKeyCode::KeyC,
        KeyCode::KeyD => HidKeyCode::KeyD,
        KeyCode::KeyE => HidKeyCode::KeyE,
        KeyCode::KeyF => HidKeyCode::KeyF,
        KeyCode::KeyG => HidKeyCode::KeyG,
        KeyCode::KeyH => HidKeyCode::KeyH,
        KeyCode::KeyI => HidKeyCode::KeyI,
        KeyCode::KeyJ => HidKeyCode::KeyJ,
        KeyCode::KeyK => HidKeyCode::KeyK,
        KeyCode::KeyL => HidKeyCode::KeyL,
        KeyCode::KeyM => HidKeyCode::KeyM,
        KeyCode::KeyN => HidKeyCode::KeyN,
        KeyCode::KeyO => HidKeyCode::KeyO,
        KeyCode::KeyP => HidKeyCode::KeyP,
        KeyCode::KeyQ => HidKeyCode::KeyQ,
        KeyCode::KeyR => HidKeyCode::KeyR,
        KeyCode::KeyS => HidKeyCode::KeyS,
        KeyCode::KeyT => HidKeyCode::KeyT,
        KeyCode::KeyU => HidKeyCode::KeyU,
        KeyCode::KeyV => HidKeyCode::KeyV,
        KeyCode::KeyW => HidKeyCode::KeyW,
        KeyCode::KeyX => HidKeyCode::KeyX,
        KeyCode::KeyY => HidKeyCode::KeyY,
        KeyCode::KeyZ => HidKeyCode::KeyZ,
        KeyCode::Digit1 => HidKeyCode::Digit1,
        KeyCode::Digit2 => HidKeyCode::Digit2,
        KeyCode::Digit3 => HidKeyCode::Digit3,
        KeyCode::Digit4 => HidKeyCode::Digit4,
        KeyCode::Digit5 => HidKeyCode::Digit5,
        KeyCode::Digit6 => HidKeyCode::Digit6,
        KeyCode::Digit7 => HidKeyCode::Digit7,
        KeyCode::Digit8 => HidKeyCode::Digit8,
        KeyCode::Digit9 => HidKeyCode::Digit9,
        KeyCode::Digit0 => HidKeyCode::Digit0,
        KeyCode::Enter => HidKeyCode::Enter,
        KeyCode::Escape => HidKeyCode::Escape,
        KeyCode::Backspace => HidKeyCode::Backspace,
        KeyCode::Tab => HidKeyCode::Tab,
        KeyCode::Space => HidKeyCode::Space,
        KeyCode::Minus => HidKeyCode::Minus,
        KeyCode::Equal => HidKeyCode::Equal,
        KeyCode::BracketLeft => HidKeyCode::BracketLeft,
        KeyCode::BracketRight => HidKeyCode::BracketRight,
        KeyCode::Backslash => HidKeyCode::Backslash,
        KeyCode::Semicolon => HidKeyCode::Semicolon,
        KeyCode::Quote => HidKeyCode::Quote,
        KeyCode::Backquote => HidKeyCode::Backquote,
        KeyCode::Comma => HidKeyCode::Comma,
        KeyCode::Period => HidKeyCode::Period,
        KeyCode::Slash => HidKeyCode::Slash,
        KeyCode::CapsLock => HidKeyCode::CapsLock,
        KeyCode::F1 => HidKeyCode::F1,
        KeyCode::F2 => HidKeyCode::F2,
        KeyCode::F3 => HidKeyCode::F3,
        KeyCode::F4 => HidKeyCode::F4,
        KeyCode::F5 => HidKeyCode::F5,
        KeyCode::F6 => HidKeyCode::F6,
        KeyCode::F7 => HidKeyCode::F7,
        KeyCode::F8 => HidKeyCode::F8,
        KeyCode::F9 => HidKeyCode::F9,
        KeyCode::F10 => HidKeyCode::F10,
        KeyCode::F11 => HidKeyCode::F11,
        KeyCode::F12 => HidKeyCode::F12,
        KeyCode::PrintScreen => HidKeyCode::PrintScreen,
        KeyCode::ScrollLock => HidKeyCode::ScrollLock,
        KeyCode::Pause => HidKeyCode::Pause,
        KeyCode::Insert => HidKeyCode::Insert,
        KeyCode::Home => HidKeyCode::Home,
        KeyCode::PageUp => HidKeyCode::PageUp,
        KeyCode::Delete => HidKeyCode::Delete,
        KeyCode::End => HidKeyCode::End,
        KeyCode::PageDown => HidKeyCode::PageDown,
        KeyCode::ArrowRight => HidKeyCode::ArrowRight,
        KeyCode::ArrowLeft => HidKeyCode::ArrowLeft,
        KeyCode::ArrowDown => HidKeyCode::ArrowDown,
        KeyCode::ArrowUp => HidKeyCode::ArrowUp,
        KeyCode::NumLock => HidKeyCode::NumLock,
        KeyCode::NumpadDivide => HidKeyCode::NumpadDivide,
        KeyCode::NumpadMultiply => HidKeyCode::NumpadMultiply,
        KeyCode::NumpadSubtract => HidKeyCode::NumpadSubtract,
        KeyCode::NumpadAdd => HidKeyCode::NumpadAdd,
        KeyCode::NumpadEnter => HidKeyCode::NumpadEnter,
        KeyCode::Numpad1 => HidKeyCode::Numpad1,
        KeyCode::Numpad2 => HidKeyCode::Numpad2,
        KeyCode::Numpad3 => HidKeyCode::Numpad3,
        KeyCode::Numpad4 => HidKeyCode::Numpad4,
        KeyCode::Numpad5 => HidKeyCode::Numpad5,
        KeyCode::Numpad6 => HidKeyCode::Numpad6,
        KeyCode::Numpad7 => HidKeyCode::Numpad7,
        KeyCode::Numpad8 => HidKeyCode::Numpad8,
        KeyCode::Numpad9 => HidKeyCode::Numpad9,
        KeyCode::Numpad0 => HidKeyCode::Numpad0,
        KeyCode::NumpadDecimal => HidKeyCode::NumpadDecimal,
        KeyCode::IntlBackslash => HidKeyCode::IntlBackslash,
        KeyCode::ContextMenu => HidKeyCode::ContextMenu,
        KeyCode::ControlLeft => HidKeyCode::ControlLeft,
        KeyCode::ShiftLeft => HidKeyCode::ShiftLeft,
        KeyCode::AltLeft => HidKeyCode::AltLeft,
        KeyCode::SuperLeft => HidKeyCode::MetaLeft,
        KeyCode::ControlRight => HidKeyCode::ControlRight,
        KeyCode::ShiftRight => HidKeyCode::ShiftRight,
        KeyCode::AltRight => HidKeyCode::AltRight,
        KeyCode::SuperRight => HidKeyCode::MetaRight,
        _ => HidKeyCode::Unknown,
    }
}

/// Reference reverse table: the winit key code a [`HidKeyCode`] originated
/// from.  Returns `None` for [`HidKeyCode::Unknown`].
pub fn hid_to_keycode(hid: HidKeyCode) -> Option<KeyCode> {
    let code = match hid {
        HidKeyCode::KeyA => KeyCode::KeyA,
        HidKeyCode::KeyB => KeyCode::KeyB,
        HidKeyCode::KeyC => KeyCode::KeyC,
        HidKeyCode::KeyD => KeyCode::KeyD,
        HidKeyCode::KeyE => KeyCode::KeyE,
        HidKeyCode::KeyF => KeyCode::KeyF,
        HidKeyCode::KeyG => KeyCode::KeyG,
        HidKeyCode::KeyH => KeyCode::KeyH,
        HidKeyCode::KeyI => KeyCode::KeyI,
        HidKeyCode::KeyJ => KeyCode::KeyJ,
        HidKeyCode::KeyK => KeyCode::KeyK,
        HidKeyCode::KeyL => KeyCode::KeyL,
        HidKeyCode::KeyM => KeyCode::KeyM,
        HidKeyCode::KeyN => KeyCode::KeyN,
        HidKeyCode::KeyO => KeyCode::KeyO,
        HidKeyCode::KeyP => KeyCode::KeyP,
        HidKeyCode::KeyQ => KeyCode::KeyQ,
        HidKeyCode::KeyR => KeyCode::KeyR,
        HidKeyCode::KeyS => KeyCode::KeyS,
        HidKeyCode::KeyT => KeyCode::KeyT,
        HidKeyCode::KeyU => KeyCode::KeyU,
        HidKeyCode::KeyV => KeyCode::KeyV,
        HidKeyCode::KeyW => KeyCode::KeyW,
        HidKeyCode::KeyX => KeyCode::KeyX,
        HidKeyCode::KeyY => KeyCode::KeyY,
        HidKeyCode::KeyZ => KeyCode::KeyZ,
        HidKeyCode::Digit1 => KeyCode::Digit1,
        HidKeyCode::Digit2 => KeyCode::Digit2,
        HidKeyCode::Digit3 => KeyCode::Digit3,
        HidKeyCode::Digit4 => KeyCode::Digit4,
        HidKeyCode::Digit5 => KeyCode::Digit5,
        HidKeyCode::Digit6 => KeyCode::Digit6,
        HidKeyCode::Digit7 => KeyCode::Digit7,
        HidKeyCode::Digit8 => KeyCode::Digit8,
        HidKeyCode::Digit9 => KeyCode::Digit9,
        HidKeyCode::Digit0 => KeyCode::Digit0,
        HidKeyCode::Enter => KeyCode::Enter,
        HidKeyCode::Escape => KeyCode::Escape,
        HidKeyCode::Backspace => KeyCode::Backspace,
        HidKeyCode::Tab => KeyCode::Tab,
        HidKeyCode::Space => KeyCode::Space,
        HidKeyCode::Minus => KeyCode::Minus,
        HidKeyCode::Equal => KeyCode::Equal,
        HidKeyCode::BracketLeft => KeyCode::BracketLeft,
        HidKeyCode::BracketRight => KeyCode::BracketRight,
        HidKeyCode::Backslash => KeyCode::Backslash,
        HidKeyCode::Semicolon => KeyCode::Semicolon,
        HidKeyCode::Quote => KeyCode::Quote,
        HidKeyCode::Backquote => KeyCode::Backquote,
        HidKeyCode::Comma => KeyCode::Comma,
        HidKeyCode::Period => KeyCode::Period,
        HidKeyCode::Slash => KeyCode::Slash,
        HidKeyCode::CapsLock => KeyCode::CapsLock,
        HidKeyCode::F1 => KeyCode::F1,
        HidKeyCode::F2 => KeyCode::F2,
        HidKeyCode::F3 => KeyCode::F3,
        HidKeyCode::F4 => KeyCode::F4,
        HidKeyCode::F5 => KeyCode::F5,
        HidKeyCode::F6 => KeyCode::F6,
        HidKeyCode::F7 => KeyCode::F7,
        HidKeyCode::F8 => KeyCode::F8,
        HidKeyCode::F9 => KeyCode::F9,
        HidKeyCode::F10 => KeyCode::F10,
        HidKeyCode::F11 => KeyCode::F11,
        HidKeyCode::F12 => KeyCode::F12,
        HidKeyCode::PrintScreen => KeyCode::PrintScreen,
        HidKeyCode::ScrollLock => KeyCode::ScrollLock,
        HidKeyCode::Pause => KeyCode::Pause,
        HidKeyCode::Insert => KeyCode::Insert,
        HidKeyCode::Home => KeyCode::Home,
        HidKeyCode::PageUp => KeyCode::PageUp,
        HidKeyCode::Delete => KeyCode::Delete,
        HidKeyCode::End => KeyCode::End,
        HidKeyCode::PageDown => KeyCode::PageDown,
        HidKeyCode::ArrowRight => KeyCode::ArrowRight,
        HidKeyCode::ArrowLeft => KeyCode::ArrowLeft,
        HidKeyCode::ArrowDown => KeyCode::ArrowDown,
        HidKeyCode::ArrowUp => KeyCode::ArrowUp,
        HidKeyCode::NumLock => KeyCode::NumLock,
        HidKeyCode::NumpadDivide => KeyCode::NumpadDivide,
        HidKeyCode::NumpadMultiply => KeyCode::NumpadMultiply,
        HidKeyCode::NumpadSubtract => KeyCode::NumpadSubtract,
        HidKeyCode::NumpadAdd => KeyCode::NumpadAdd,
        HidKeyCode::NumpadEnter => KeyCode::NumpadEnter,
        HidKeyCode::Numpad1 => KeyCode::Numpad1,
        HidKeyCode::Numpad2 => KeyCode::Numpad2,
        HidKeyCode::Numpad3 => KeyCode::Numpad3,
        HidKeyCode::Numpad4 => KeyCode::Numpad4,
        HidKeyCode::Numpad5 => KeyCode::Numpad5,
        HidKeyCode::Numpad6 => KeyCode::Numpad6,
        HidKeyCode::Numpad7 => KeyCode::Numpad7,
        HidKeyCode::Numpad8 => KeyCode::Numpad8,
        HidKeyCode::Numpad9 => KeyCode::Numpad9,
        HidKeyCode::Numpad0 => KeyCode::Numpad0,
        HidKeyCode::NumpadDecimal => KeyCode::NumpadDecimal,
        HidKeyCode::IntlBackslash => KeyCode::IntlBackslash,
        HidKeyCode::ContextMenu => KeyCode::ContextMenu,
        HidKeyCode::ControlLeft => KeyCode::ControlLeft,
        HidKeyCode::ShiftLeft => KeyCode::ShiftLeft,
        HidKeyCode::AltLeft => KeyCode::AltLeft,
        HidKeyCode::MetaLeft => KeyCode::SuperLeft,
        HidKeyCode::ControlRight => KeyCode::ControlRight,
        HidKeyCode::ShiftRight => KeyCode::ShiftRight,
        HidKeyCode::AltRight => KeyCode::AltRight,
        HidKeyCode::MetaRight => KeyCode::SuperRight,
        HidKeyCode::Unknown => return None,
    };
    Some(code)
}

/// Translates a winit mouse button to a [`HidMouseButton`].
///
/// Buttons outside the HID boot report map to the `Unknown` sentinel.
pub fn button_to_hid(button: MouseButton) -> HidMouseButton {
    match button {
        MouseButton::Left => HidMouseButton::Left,
        MouseButton::Right => HidMouseButton::Right,
        MouseButton::Middle => HidMouseButton::Middle,
        MouseButton::Back => HidMouseButton::Backward,
        MouseButton::Forward => HidMouseButton::Forward,
        MouseButton::Other(_) => HidMouseButton::Unknown,
    }
}

/// Reference reverse table for mouse buttons.
pub fn hid_to_button(button: HidMouseButton) -> Option<MouseButton> {
    match button {
        HidMouseButton::Left => Some(MouseButton::Left),
        HidMouseButton::Right => Some(MouseButton::Right),
        HidMouseButton::Middle => Some(MouseButton::Middle),
        HidMouseButton::Backward => Some(MouseButton::Back),
        HidMouseButton::Forward => Some(MouseButton::Forward),
        HidMouseButton::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_assigned_hid_code_round_trips_through_the_reference_table() {
        for &hid in HidKeyCode::ALL {
            // Arrange / Act
            let code = hid_to_keycode(hid).expect("assigned codes have a winit origin");
            let back = keycode_to_hid(code);

            // Assert
            assert_eq!(back, hid, "round-trip for {hid:?} via {code:?} failed");
        }
    }

    #[test]
    fn test_unmapped_keycodes_translate_to_unknown() {
        // Multimedia and high function keys have no usage on page 0x07.
        for code in [
            KeyCode::F13,
            KeyCode::F24,
            KeyCode::MediaPlayPause,
            KeyCode::AudioVolumeUp,
        ] {
            assert_eq!(
                keycode_to_hid(code),
                HidKeyCode::Unknown,
                "{code:?} should be Unknown"
            );
        }
    }

    #[test]
    fn test_unknown_hid_code_has_no_reverse_mapping() {
        assert_eq!(hid_to_keycode(HidKeyCode::Unknown), None);
    }

    #[test]
    fn test_no_two_keycodes_translate_to_the_same_assigned_hid_code() {
        // The reverse table is injective; forward translation of each
        // reverse image must be unique.
        let mut seen = std::collections::HashSet::new();
        for &hid in HidKeyCode::ALL {
            let code = hid_to_keycode(hid).unwrap();
            assert!(seen.insert(code), "{code:?} maps to two HID codes");
        }
    }

    #[test]
    fn test_every_report_button_round_trips() {
        for &button in HidMouseButton::ALL {
            let raw = hid_to_button(button).expect("report buttons have a winit origin");
            assert_eq!(button_to_hid(raw), button);
        }
    }

    #[test]
    fn test_other_buttons_translate_to_unknown() {
        assert_eq!(button_to_hid(MouseButton::Other(6)), HidMouseButton::Unknown);
        assert_eq!(hid_to_button(HidMouseButton::Unknown), None);
    }

    #[test]
    fn test_left_and_right_meta_map_to_super_keys() {
        assert_eq!(keycode_to_hid(KeyCode::SuperLeft), HidKeyCode::MetaLeft);
        assert_eq!(keycode_to_hid(KeyCode::SuperRight), HidKeyCode::MetaRight);
    }
}

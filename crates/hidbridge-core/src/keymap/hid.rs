//! USB HID Usage IDs (page 0x07, Keyboard/Keypad page).
//!
//! This is the canonical key representation handed to the keyboard capability
//! processor.  HID Usage IDs identify *physical key positions*, not
//! characters, so forwarding works for every keyboard layout on the
//! controlled device.
//!
//! Reference: USB HID Usage Tables 1.3, Section 10 (Keyboard/Keypad page 0x07).
//!
//! # The `Unknown` sentinel
//!
//! Not every key the windowing layer can report has an assigned usage on
//! page 0x07.  [`HidKeyCode::Unknown`] (value 0x0000) stands in for any such
//! key.  Events carrying `Unknown` are still forwarded so that the
//! one-event-in/at-most-one-event-out contract holds; the downstream encoder
//! decides what to do with them.

use serde::{Deserialize, Serialize};

/// Defines [`HidKeyCode`], its total `from_u16` lookup, and the `ALL` table
/// from a single list of `(variant, usage id)` pairs so the three can never
/// drift apart.
macro_rules! hid_key_codes {
    ($($(#[$attr:meta])* $name:ident = $value:literal,)*) => {
        /// USB HID Usage ID for keyboard keys (page 0x07).
        ///
        /// The numeric value of each variant is its HID Usage ID.
        /// [`HidKeyCode::Unknown`] represents any key with no mapping.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u16)]
        pub enum HidKeyCode {
            $($(#[$attr])* $name = $value,)*
            /// Sentinel for keys with no HID mapping.
            Unknown = 0x0000,
        }

        impl HidKeyCode {
            /// Every key code with an assigned usage, in table order.
            /// `Unknown` is deliberately excluded.
            pub const ALL: &'static [HidKeyCode] = &[$(HidKeyCode::$name,)*];

            /// Converts a raw u16 HID Usage ID to a [`HidKeyCode`].
            ///
            /// Returns [`HidKeyCode::Unknown`] if the value does not
            /// correspond to a known variant.
            pub fn from_u16(value: u16) -> Self {
                match value {
                    $($value => HidKeyCode::$name,)*
                    _ => HidKeyCode::Unknown,
                }
            }
        }
    };
}

hid_key_codes! {
    // Letters (HID 0x04-0x1D)
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Digits (HID 0x1E-0x27)
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Control and punctuation (HID 0x28-0x38)
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,

    CapsLock = 0x39,

    // Function keys (HID 0x3A-0x45)
    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // Navigation cluster (HID 0x46-0x52)
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Numpad (HID 0x53-0x63)
    NumLock = 0x53,
    NumpadDivide = 0x54,
    NumpadMultiply = 0x55,
    NumpadSubtract = 0x56,
    NumpadAdd = 0x57,
    NumpadEnter = 0x58,
    Numpad1 = 0x59,
    Numpad2 = 0x5A,
    Numpad3 = 0x5B,
    Numpad4 = 0x5C,
    Numpad5 = 0x5D,
    Numpad6 = 0x5E,
    Numpad7 = 0x5F,
    Numpad8 = 0x60,
    Numpad9 = 0x61,
    Numpad0 = 0x62,
    NumpadDecimal = 0x63,

    /// The key between left Shift and Z on ISO keyboards.
    IntlBackslash = 0x64,
    ContextMenu = 0x65,

    // Modifier keys (HID 0xE0-0xE7)
    ControlLeft = 0xE0,
    ShiftLeft = 0xE1,
    AltLeft = 0xE2,
    MetaLeft = 0xE3,
    ControlRight = 0xE4,
    ShiftRight = 0xE5,
    AltRight = 0xE6,
    MetaRight = 0xE7,
}

impl HidKeyCode {
    /// Returns the raw USB HID Usage ID value for this key code.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns `true` if this is a modifier key (HID 0xE0-0xE7).
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            HidKeyCode::ControlLeft
                | HidKeyCode::ControlRight
                | HidKeyCode::ShiftLeft
                | HidKeyCode::ShiftRight
                | HidKeyCode::AltLeft
                | HidKeyCode::AltRight
                | HidKeyCode::MetaLeft
                | HidKeyCode::MetaRight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_from_u16_and_as_u16_for_every_assigned_code() {
        for &code in HidKeyCode::ALL {
            // Arrange / Act
            let raw = code.as_u16();
            let back = HidKeyCode::from_u16(raw);

            // Assert
            assert_eq!(back, code, "round-trip for {code:?} (0x{raw:04X}) failed");
        }
    }

    #[test]
    fn test_all_table_has_no_duplicate_usage_ids() {
        let mut values: Vec<u16> = HidKeyCode::ALL.iter().map(|c| c.as_u16()).collect();
        values.sort_unstable();
        let before = values.len();
        values.dedup();
        assert_eq!(before, values.len(), "no usage id may map to two variants");
    }

    #[test]
    fn test_unassigned_u16_values_return_unknown() {
        // 0x32 (Non-US hash) and 0x66+ are deliberately not part of the table.
        for unassigned in [0x00, 0x01, 0x02, 0x03, 0x32, 0x66, 0xA0, 0xDF, 0xE8, 0xFF] {
            assert_eq!(
                HidKeyCode::from_u16(unassigned),
                HidKeyCode::Unknown,
                "0x{unassigned:02X} should map to Unknown"
            );
        }
    }

    #[test]
    fn test_unknown_code_has_value_zero() {
        assert_eq!(HidKeyCode::Unknown.as_u16(), 0x0000);
    }

    #[test]
    fn test_letters_span_the_expected_usage_range() {
        assert_eq!(HidKeyCode::KeyA.as_u16(), 0x04);
        assert_eq!(HidKeyCode::KeyZ.as_u16(), 0x1D);
        let letters = HidKeyCode::ALL
            .iter()
            .filter(|c| (0x04..=0x1D).contains(&c.as_u16()))
            .count();
        assert_eq!(letters, 26);
    }

    #[test]
    fn test_modifier_keys_are_identified_correctly() {
        for &code in HidKeyCode::ALL {
            let in_modifier_range = (0xE0..=0xE7).contains(&code.as_u16());
            assert_eq!(
                code.is_modifier(),
                in_modifier_range,
                "{code:?} modifier classification mismatch"
            );
        }
        assert!(!HidKeyCode::Unknown.is_modifier());
    }
}

//! The normalized HID event model.
//!
//! Events in this module are what the dispatcher hands to the capability
//! processors.  They are transient values scoped to one raw event's
//! processing; nothing here is persisted.
//!
//! Mouse events deliberately carry no absolute position: HID forwarding is
//! relative and stateless with respect to screen coordinates, because the
//! controlled device manages its own cursor.

use serde::{Deserialize, Serialize};

use crate::keymap::button::HidMouseButton;
use crate::keymap::hid::HidKeyCode;

/// Direction of a key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Down,
    Up,
}

/// Direction of a mouse button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    Press,
    Release,
}

/// Modifier-key bitmask carried by normalized keyboard events.
///
/// One bit per physical modifier, mirroring the modifier byte of a HID
/// keyboard report (left keys in the low nibble, right keys in the high
/// nibble).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierFlags(pub u8);

impl ModifierFlags {
    pub const LEFT_CTRL: u8 = 1 << 0;
    pub const LEFT_SHIFT: u8 = 1 << 1;
    pub const LEFT_ALT: u8 = 1 << 2;
    pub const LEFT_META: u8 = 1 << 3;
    pub const RIGHT_CTRL: u8 = 1 << 4;
    pub const RIGHT_SHIFT: u8 = 1 << 5;
    pub const RIGHT_ALT: u8 = 1 << 6;
    pub const RIGHT_META: u8 = 1 << 7;

    /// Returns `true` when no modifier bit is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` when every bit in `mask` is set.
    pub fn contains(self, mask: u8) -> bool {
        self.0 & mask == mask
    }
}

/// Bitmask of the mouse buttons held down at dispatch time.
///
/// Bit positions follow [`HidMouseButton::mask`].  The mask always reflects
/// the button state *after* the event carrying it has been applied, matching
/// the semantics of querying the live button state at dispatch time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseButtonsState(pub u8);

impl MouseButtonsState {
    /// Marks `button` as held.
    pub fn press(&mut self, button: HidMouseButton) {
        self.0 |= button.mask().0;
    }

    /// Marks `button` as released.
    pub fn release(&mut self, button: HidMouseButton) {
        self.0 &= !button.mask().0;
    }

    /// Returns `true` while `button` is held.
    pub fn is_pressed(self, button: HidMouseButton) -> bool {
        let mask = button.mask().0;
        mask != 0 && self.0 & mask == mask
    }

    /// Returns `true` when no button is held.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Opaque correlation token attached to forwarded keyboard events.
///
/// Acknowledgement-based processors use it to pair an injected event with a
/// completion report.  OTG mode has no frame sequencing, so it always passes
/// [`Sequence::NONE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequence(u64);

impl Sequence {
    /// The "no sequencing" token.
    pub const NONE: Sequence = Sequence(0);

    pub fn new(value: u64) -> Self {
        Sequence(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// A normalized keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub action: KeyAction,
    /// Canonical key code (HID usage on page 0x07).
    pub keycode: HidKeyCode,
    /// Hardware scan code.  For HID forwarding this carries the usage value;
    /// the windowing layer exposes no separate raw scancode.
    pub scancode: u16,
    /// `true` for auto-repeat events while the key is held.
    pub repeat: bool,
    /// Modifier state at dispatch time.
    pub mods_state: ModifierFlags,
}

/// A normalized relative pointer motion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseMotionEvent {
    pub dx: i32,
    pub dy: i32,
    pub buttons_state: MouseButtonsState,
}

/// A normalized mouse click event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseClickEvent {
    pub action: ButtonAction,
    pub button: HidMouseButton,
    pub buttons_state: MouseButtonsState,
}

/// A normalized scroll event.  Deltas are in wheel notches; horizontal
/// positive means right, vertical positive means away from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseScrollEvent {
    pub hscroll: i32,
    pub vscroll: i32,
    pub buttons_state: MouseButtonsState,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── MouseButtonsState ─────────────────────────────────────────────────────

    #[test]
    fn test_press_and_release_round_trip_leaves_mask_empty() {
        // Arrange
        let mut state = MouseButtonsState::default();

        // Act
        state.press(HidMouseButton::Left);
        state.press(HidMouseButton::Right);
        state.release(HidMouseButton::Left);
        state.release(HidMouseButton::Right);

        // Assert
        assert!(state.is_empty());
    }

    #[test]
    fn test_press_tracks_multiple_buttons_independently() {
        let mut state = MouseButtonsState::default();
        state.press(HidMouseButton::Left);
        state.press(HidMouseButton::Middle);

        assert!(state.is_pressed(HidMouseButton::Left));
        assert!(state.is_pressed(HidMouseButton::Middle));
        assert!(!state.is_pressed(HidMouseButton::Right));
    }

    #[test]
    fn test_unknown_button_press_does_not_change_the_mask() {
        let mut state = MouseButtonsState::default();
        state.press(HidMouseButton::Unknown);
        assert!(state.is_empty());
        assert!(!state.is_pressed(HidMouseButton::Unknown));
    }

    #[test]
    fn test_release_of_unpressed_button_is_a_no_op() {
        let mut state = MouseButtonsState::default();
        state.press(HidMouseButton::Left);
        state.release(HidMouseButton::Right);
        assert!(state.is_pressed(HidMouseButton::Left));
    }

    // ── ModifierFlags ─────────────────────────────────────────────────────────

    #[test]
    fn test_modifier_flags_contains_checks_all_requested_bits() {
        let flags = ModifierFlags(ModifierFlags::LEFT_CTRL | ModifierFlags::LEFT_SHIFT);

        assert!(flags.contains(ModifierFlags::LEFT_CTRL));
        assert!(flags.contains(ModifierFlags::LEFT_CTRL | ModifierFlags::LEFT_SHIFT));
        assert!(!flags.contains(ModifierFlags::LEFT_ALT));
        assert!(!flags.contains(ModifierFlags::LEFT_CTRL | ModifierFlags::RIGHT_CTRL));
    }

    #[test]
    fn test_modifier_flags_default_is_empty() {
        assert!(ModifierFlags::default().is_empty());
    }

    // ── Sequence ──────────────────────────────────────────────────────────────

    #[test]
    fn test_sequence_none_is_zero() {
        assert_eq!(Sequence::NONE.value(), 0);
        assert_eq!(Sequence::new(0), Sequence::NONE);
    }
}

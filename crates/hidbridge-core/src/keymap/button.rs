//! Mouse button identifiers and their HID report bit positions.
//!
//! The bit layout follows the USB HID boot mouse report: bit 0 is the
//! primary button, bit 1 secondary, bit 2 tertiary, bits 3 and 4 the
//! backward/forward side buttons.

use serde::{Deserialize, Serialize};

use crate::event::MouseButtonsState;

/// Normalized mouse button identifier.
///
/// [`HidMouseButton::Unknown`] is the sentinel for buttons the windowing
/// layer reports but the HID report cannot express; click events carrying it
/// are still forwarded so event counts are preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HidMouseButton {
    Left,
    Right,
    Middle,
    /// Side button usually bound to "back".
    Backward,
    /// Side button usually bound to "forward".
    Forward,
    /// Sentinel for buttons with no HID report bit.
    Unknown,
}

impl HidMouseButton {
    /// Every button with an assigned report bit, in bit order.
    pub const ALL: &'static [HidMouseButton] = &[
        HidMouseButton::Left,
        HidMouseButton::Right,
        HidMouseButton::Middle,
        HidMouseButton::Backward,
        HidMouseButton::Forward,
    ];

    /// Returns the single-bit mask of this button within a buttons-state
    /// bitmask, or an empty mask for [`HidMouseButton::Unknown`].
    pub fn mask(self) -> MouseButtonsState {
        match self {
            HidMouseButton::Left => MouseButtonsState(1 << 0),
            HidMouseButton::Right => MouseButtonsState(1 << 1),
            HidMouseButton::Middle => MouseButtonsState(1 << 2),
            HidMouseButton::Backward => MouseButtonsState(1 << 3),
            HidMouseButton::Forward => MouseButtonsState(1 << 4),
            HidMouseButton::Unknown => MouseButtonsState(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_button_has_a_distinct_single_bit_mask() {
        let mut seen = 0u8;
        for &button in HidMouseButton::ALL {
            let mask = button.mask().0;
            assert_eq!(mask.count_ones(), 1, "{button:?} must occupy one bit");
            assert_eq!(seen & mask, 0, "{button:?} overlaps another button");
            seen |= mask;
        }
    }

    #[test]
    fn test_unknown_button_has_empty_mask() {
        assert_eq!(HidMouseButton::Unknown.mask().0, 0);
    }

    #[test]
    fn test_primary_button_occupies_bit_zero() {
        assert_eq!(HidMouseButton::Left.mask().0, 0x01);
        assert_eq!(HidMouseButton::Right.mask().0, 0x02);
        assert_eq!(HidMouseButton::Middle.mask().0, 0x04);
    }
}

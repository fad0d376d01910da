//! Mouse-capture state machine.
//!
//! While capture is engaged the host pointer is grabbed by the OTG window and
//! every relative motion is forwarded to the controlled device.  The operator
//! toggles capture with a *toggle-key chord*: pressing and releasing a single
//! designated modifier key with no other toggle key interleaved.
//!
//! The machine is pure state: applying the pointer grab to the actual window
//! is the dispatcher's job, which keeps every transition testable without a
//! live window.
//!
//! # Chord negotiation
//!
//! - Key-down of a toggle key arms the chord.  A key-down of a *different*
//!   toggle key while one is armed is an abort gesture: the pending chord is
//!   cancelled and neither key toggles on release.
//! - *Every* key-up consumes the armed chord, toggle key or not.  Only a
//!   release matching the armed key toggles capture; any other release
//!   forfeits the gesture, so using a toggle modifier as part of a shortcut
//!   (Alt held while another key is pressed and released) never toggles.
//! - Auto-repeat key-downs of the armed key neither re-arm nor cancel, and
//!   non-toggle key-downs leave the chord armed.

use tracing::debug;

use crate::keymap::hid::HidKeyCode;

/// Returns `true` for the designated capture-toggle keys.
///
/// These keys are fully absorbed by the OTG front-end whenever mouse
/// forwarding is enabled; they never reach the keyboard processor.
pub fn is_capture_toggle_key(key: HidKeyCode) -> bool {
    matches!(
        key,
        HidKeyCode::AltLeft | HidKeyCode::MetaLeft | HidKeyCode::MetaRight
    )
}

/// Tracks whether pointer input is captured and the in-progress toggle chord.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureState {
    captured: bool,
    pending_chord: Option<HidKeyCode>,
}

impl CaptureState {
    /// Creates the state machine.  Sessions with mouse forwarding enabled
    /// start captured; keyboard-only sessions never capture.
    pub fn new(captured: bool) -> Self {
        Self {
            captured,
            pending_chord: None,
        }
    }

    /// Returns whether pointer input is currently captured.
    pub fn captured(&self) -> bool {
        self.captured
    }

    /// Unconditionally sets the captured flag.
    ///
    /// Used for forced transitions (focus loss, click-to-recapture) that
    /// bypass chord negotiation.
    pub fn set_captured(&mut self, want: bool) {
        self.captured = want;
    }

    /// The toggle key currently armed, if any.
    pub fn pending_chord(&self) -> Option<HidKeyCode> {
        self.pending_chord
    }

    /// Applies a key-down of a capture-toggle key.
    ///
    /// Arms the chord when none is pending; cancels the pending chord when a
    /// different toggle key arrives.  Repeat key-downs of the armed key are
    /// indistinguishable from the first and leave the chord armed.
    pub fn chord_key_down(&mut self, key: HidKeyCode) {
        debug_assert!(is_capture_toggle_key(key));
        match self.pending_chord {
            None => self.pending_chord = Some(key),
            Some(pending) if pending == key => {}
            Some(pending) => {
                // A second toggle key is an abort gesture, not a new chord.
                debug!(?pending, ?key, "capture toggle cancelled by second toggle key");
                self.pending_chord = None;
            }
        }
    }

    /// Applies a key-up of a capture-toggle key.
    ///
    /// Consumes the armed chord.  Returns `Some(new_captured)` when the
    /// release completes the chord and capture toggled; `None` when no
    /// toggle occurs.
    pub fn chord_key_up(&mut self, key: HidKeyCode) -> Option<bool> {
        debug_assert!(is_capture_toggle_key(key));
        let pending = self.pending_chord.take();
        if pending == Some(key) {
            self.captured = !self.captured;
            Some(self.captured)
        } else {
            if let Some(pending) = pending {
                debug!(?pending, ?key, "capture toggle forfeited by mismatched release");
            }
            None
        }
    }

    /// Applies a key-up of a non-toggle key.
    ///
    /// Any release interleaved into the chord forfeits it: the toggle
    /// gesture is a strictly paired down/up of one toggle key with no other
    /// key released in between.
    pub fn note_key_up(&mut self, key: HidKeyCode) {
        debug_assert!(!is_capture_toggle_key(key));
        if let Some(pending) = self.pending_chord.take() {
            debug!(?pending, ?key, "capture toggle forfeited by interleaved release");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOGGLE_KEYS: &[HidKeyCode] = &[
        HidKeyCode::AltLeft,
        HidKeyCode::MetaLeft,
        HidKeyCode::MetaRight,
    ];

    // ── Toggle-key classification ─────────────────────────────────────────────

    #[test]
    fn test_only_left_alt_and_both_meta_keys_are_toggle_keys() {
        for &key in TOGGLE_KEYS {
            assert!(is_capture_toggle_key(key), "{key:?} must be a toggle key");
        }
        for key in [
            HidKeyCode::AltRight,
            HidKeyCode::ControlLeft,
            HidKeyCode::ShiftLeft,
            HidKeyCode::KeyA,
            HidKeyCode::Unknown,
        ] {
            assert!(!is_capture_toggle_key(key), "{key:?} must not toggle");
        }
    }

    // ── Paired down/up toggles ────────────────────────────────────────────────

    #[test]
    fn test_paired_down_up_of_same_key_toggles_capture() {
        for &key in TOGGLE_KEYS {
            // Arrange
            let mut state = CaptureState::new(true);

            // Act
            state.chord_key_down(key);
            let result = state.chord_key_up(key);

            // Assert
            assert_eq!(result, Some(false), "{key:?} must toggle off");
            assert!(!state.captured());
            assert_eq!(state.pending_chord(), None);
        }
    }

    #[test]
    fn test_toggle_works_in_both_directions() {
        let mut state = CaptureState::new(false);

        state.chord_key_down(HidKeyCode::AltLeft);
        assert_eq!(state.chord_key_up(HidKeyCode::AltLeft), Some(true));

        state.chord_key_down(HidKeyCode::AltLeft);
        assert_eq!(state.chord_key_up(HidKeyCode::AltLeft), Some(false));
    }

    #[test]
    fn test_release_without_prior_down_does_not_toggle() {
        let mut state = CaptureState::new(true);

        let result = state.chord_key_up(HidKeyCode::MetaLeft);

        assert_eq!(result, None);
        assert!(state.captured());
    }

    // ── Cancellation by a second toggle key ───────────────────────────────────

    #[test]
    fn test_second_distinct_toggle_key_cancels_the_pending_chord() {
        // Arrange
        let mut state = CaptureState::new(true);

        // Act – down(LeftAlt), down(LeftMeta) cancels
        state.chord_key_down(HidKeyCode::AltLeft);
        state.chord_key_down(HidKeyCode::MetaLeft);

        // Assert – neither key's release toggles afterwards
        assert_eq!(state.pending_chord(), None);
        assert_eq!(state.chord_key_up(HidKeyCode::AltLeft), None);
        assert_eq!(state.chord_key_up(HidKeyCode::MetaLeft), None);
        assert!(state.captured());
    }

    #[test]
    fn test_cancellation_does_not_arm_the_second_key() {
        let mut state = CaptureState::new(false);

        state.chord_key_down(HidKeyCode::MetaRight);
        state.chord_key_down(HidKeyCode::AltLeft); // cancels, does not re-arm

        assert_eq!(state.chord_key_up(HidKeyCode::AltLeft), None);
        assert!(!state.captured());
    }

    #[test]
    fn test_chord_can_be_rearmed_after_cancellation() {
        let mut state = CaptureState::new(true);

        state.chord_key_down(HidKeyCode::AltLeft);
        state.chord_key_down(HidKeyCode::MetaLeft); // cancel
        state.chord_key_up(HidKeyCode::AltLeft);
        state.chord_key_up(HidKeyCode::MetaLeft);

        // A fresh, strictly paired chord still works.
        state.chord_key_down(HidKeyCode::MetaLeft);
        assert_eq!(state.chord_key_up(HidKeyCode::MetaLeft), Some(false));
    }

    #[test]
    fn test_mismatched_release_forfeits_but_consumes_the_chord() {
        let mut state = CaptureState::new(true);

        state.chord_key_down(HidKeyCode::AltLeft);
        // Releasing a different toggle key consumes the pending chord.
        assert_eq!(state.chord_key_up(HidKeyCode::MetaRight), None);
        // The originally armed key no longer toggles either.
        assert_eq!(state.chord_key_up(HidKeyCode::AltLeft), None);
        assert!(state.captured());
    }

    // ── Interleaved non-toggle keys ───────────────────────────────────────────

    #[test]
    fn test_non_toggle_key_up_forfeits_the_pending_chord() {
        // Arrange – Alt is armed, then used as a shortcut modifier.
        let mut state = CaptureState::new(true);
        state.chord_key_down(HidKeyCode::AltLeft);

        // Act – releasing the shortcut key consumes the chord.
        state.note_key_up(HidKeyCode::KeyA);

        // Assert – the toggle key's own release no longer toggles.
        assert_eq!(state.pending_chord(), None);
        assert_eq!(state.chord_key_up(HidKeyCode::AltLeft), None);
        assert!(state.captured());
    }

    #[test]
    fn test_non_toggle_key_up_without_a_pending_chord_is_a_no_op() {
        let mut state = CaptureState::new(true);

        state.note_key_up(HidKeyCode::KeyA);
        state.note_key_up(HidKeyCode::Enter);

        assert_eq!(state.pending_chord(), None);
        assert!(state.captured());
    }

    #[test]
    fn test_non_toggle_key_down_leaves_the_chord_armed() {
        // Only releases forfeit; a key still held when the toggle key is
        // released does not block the toggle.
        let mut state = CaptureState::new(true);

        state.chord_key_down(HidKeyCode::AltLeft);
        // down(A) has no chord effect; up(AltLeft) arrives before up(A).
        assert_eq!(state.pending_chord(), Some(HidKeyCode::AltLeft));
        assert_eq!(state.chord_key_up(HidKeyCode::AltLeft), Some(false));
    }

    // ── Repeat handling ───────────────────────────────────────────────────────

    #[test]
    fn test_repeated_down_of_armed_key_keeps_the_chord_armed() {
        let mut state = CaptureState::new(true);

        state.chord_key_down(HidKeyCode::AltLeft);
        state.chord_key_down(HidKeyCode::AltLeft); // auto-repeat
        state.chord_key_down(HidKeyCode::AltLeft);

        assert_eq!(state.pending_chord(), Some(HidKeyCode::AltLeft));
        assert_eq!(state.chord_key_up(HidKeyCode::AltLeft), Some(false));
    }

    // ── Forced transitions ────────────────────────────────────────────────────

    #[test]
    fn test_set_captured_is_unconditional_and_idempotent() {
        let mut state = CaptureState::new(true);

        state.set_captured(false);
        assert!(!state.captured());
        state.set_captured(false);
        assert!(!state.captured());
        state.set_captured(true);
        assert!(state.captured());
    }

    #[test]
    fn test_initial_state_has_no_pending_chord() {
        assert_eq!(CaptureState::new(true).pending_chord(), None);
        assert_eq!(CaptureState::new(false).pending_chord(), None);
    }
}

//! OtgDispatcher: routes raw window events to the capability processors.
//!
//! This use case is the heart of the OTG front-end.  It receives one raw
//! event at a time from the windowing event loop, consults the
//! [`CaptureState`] machine, and either absorbs the event (capture-toggle
//! chords), drops it (uncaptured pointer input), or translates and forwards
//! it to at most one capability processor.
//!
//! # Architecture
//!
//! The dispatcher depends only on traits ([`WindowSurface`],
//! [`KeyProcessor`], [`MouseProcessor`]) and the pure capture state machine.
//! All infrastructure implementations are injected at construction time,
//! making the whole policy unit-testable without a live window.
//!
//! Processing is strictly single-threaded and synchronous: each event is
//! handled to completion, with at most one processor call and at most one
//! surface call per event, before the next is considered.

use std::sync::Arc;

use hidbridge_core::{
    is_capture_toggle_key, ButtonAction, CaptureState, HidKeyCode, HidMouseButton, KeyAction,
    KeyEvent, ModifierFlags, MouseButtonsState, MouseClickEvent, MouseMotionEvent,
    MouseScrollEvent, Sequence,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::infrastructure::processor::{KeyProcessor, MouseProcessor};
use crate::infrastructure::window::{RawEvent, WindowSurface};

/// Error type for the dispatch use case.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("processor rejected event: {0}")]
    Forward(String),
}

/// The modifier key state maintained across key-down/up events.
///
/// The windowing layer reports modifiers only in aggregate, so the
/// dispatcher reconstructs the per-side state from the key stream itself.
#[derive(Debug, Default, Clone, Copy)]
struct ModifierTracker {
    left_ctrl: bool,
    right_ctrl: bool,
    left_shift: bool,
    right_shift: bool,
    left_alt: bool,
    right_alt: bool,
    left_meta: bool,
    right_meta: bool,
}

impl ModifierTracker {
    fn to_flags(self) -> ModifierFlags {
        let pairs = [
            (self.left_ctrl, ModifierFlags::LEFT_CTRL),
            (self.left_shift, ModifierFlags::LEFT_SHIFT),
            (self.left_alt, ModifierFlags::LEFT_ALT),
            (self.left_meta, ModifierFlags::LEFT_META),
            (self.right_ctrl, ModifierFlags::RIGHT_CTRL),
            (self.right_shift, ModifierFlags::RIGHT_SHIFT),
            (self.right_alt, ModifierFlags::RIGHT_ALT),
            (self.right_meta, ModifierFlags::RIGHT_META),
        ];
        let mut flags = 0u8;
        for (held, bit) in pairs {
            if held {
                flags |= bit;
            }
        }
        ModifierFlags(flags)
    }

    fn update(&mut self, key: HidKeyCode, is_down: bool) {
        match key {
            HidKeyCode::ControlLeft => self.left_ctrl = is_down,
            HidKeyCode::ControlRight => self.right_ctrl = is_down,
            HidKeyCode::ShiftLeft => self.left_shift = is_down,
            HidKeyCode::ShiftRight => self.right_shift = is_down,
            HidKeyCode::AltLeft => self.left_alt = is_down,
            HidKeyCode::AltRight => self.right_alt = is_down,
            HidKeyCode::MetaLeft => self.left_meta = is_down,
            HidKeyCode::MetaRight => self.right_meta = is_down,
            _ => {}
        }
    }
}

/// The OTG event dispatch use case.
///
/// Owns the window surface exclusively and shares the optional capability
/// processors with the surrounding session.
pub struct OtgDispatcher {
    surface: Box<dyn WindowSurface>,
    keyboard: Option<Arc<dyn KeyProcessor>>,
    mouse: Option<Arc<dyn MouseProcessor>>,
    capture: CaptureState,
    buttons: MouseButtonsState,
    modifiers: ModifierTracker,
}

impl OtgDispatcher {
    /// Creates the dispatcher and, when mouse forwarding is enabled,
    /// engages pointer capture immediately.
    pub fn new(
        surface: Box<dyn WindowSurface>,
        keyboard: Option<Arc<dyn KeyProcessor>>,
        mouse: Option<Arc<dyn MouseProcessor>>,
    ) -> Self {
        let mouse_enabled = mouse.is_some();
        let mut dispatcher = Self {
            surface,
            keyboard,
            mouse,
            capture: CaptureState::new(mouse_enabled),
            buttons: MouseButtonsState::default(),
            modifiers: ModifierTracker::default(),
        };
        if mouse_enabled {
            // Capture on start.
            dispatcher.apply_grab(true);
        }
        dispatcher
    }

    /// Returns whether pointer capture is currently engaged.
    pub fn captured(&self) -> bool {
        self.capture.captured()
    }

    /// Mutable access to the owned surface, for event-loop plumbing that
    /// must reach the backend directly (pointer boundary hints).
    pub fn surface_mut(&mut self) -> &mut dyn WindowSurface {
        self.surface.as_mut()
    }

    /// Handles one raw event in delivery order.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Forward`] if a capability processor rejects
    /// the event.  Surface-level failures are degraded conditions and are
    /// logged instead.
    pub fn handle_event(&mut self, event: RawEvent) -> Result<(), DispatchError> {
        match event {
            RawEvent::Redraw => {
                if let Err(e) = self.surface.redraw() {
                    warn!("redraw failed: {e}");
                }
                Ok(())
            }
            RawEvent::FocusLost => {
                // Losing OS focus must release the grab regardless of prior
                // toggle state; a second focus-lost is a harmless repeat.
                if self.mouse.is_some() {
                    debug!("focus lost, releasing mouse capture");
                    self.set_capture(false);
                }
                Ok(())
            }
            RawEvent::Key {
                action,
                key,
                repeat,
            } => self.handle_key(action, key, repeat),
            RawEvent::PointerMotion { dx, dy } => self.handle_motion(dx, dy),
            RawEvent::Button { action, button } => self.handle_button(action, button),
            RawEvent::Scroll { hscroll, vscroll } => self.handle_scroll(hscroll, vscroll),
        }
    }

    // ── Private event handlers ────────────────────────────────────────────────

    fn handle_key(
        &mut self,
        action: KeyAction,
        key: HidKeyCode,
        repeat: bool,
    ) -> Result<(), DispatchError> {
        let is_down = action == KeyAction::Down;
        self.modifiers.update(key, is_down);

        if self.mouse.is_some() {
            if is_capture_toggle_key(key) {
                // Capture-toggle keys are never forwarded to the device.
                match action {
                    KeyAction::Down => self.capture.chord_key_down(key),
                    KeyAction::Up => {
                        if let Some(want) = self.capture.chord_key_up(key) {
                            info!(captured = want, "mouse capture toggled");
                            self.apply_grab(want);
                        }
                    }
                }
                return Ok(());
            }
            if !is_down {
                // Any other release forfeits an armed toggle chord.
                self.capture.note_key_up(key);
            }
        }

        if let Some(kp) = &self.keyboard {
            let evt = KeyEvent {
                action,
                keycode: key,
                scancode: key.as_u16(),
                repeat,
                mods_state: self.modifiers.to_flags(),
            };
            kp.process_key(&evt, Sequence::NONE)
                .map_err(DispatchError::Forward)?;
        }
        Ok(())
    }

    fn handle_motion(&mut self, dx: i32, dy: i32) -> Result<(), DispatchError> {
        if let Some(mp) = &self.mouse {
            // Uncaptured motion must never leak to the device.
            if self.capture.captured() {
                let evt = MouseMotionEvent {
                    dx,
                    dy,
                    buttons_state: self.buttons,
                };
                mp.process_motion(&evt).map_err(DispatchError::Forward)?;
            }
        }
        Ok(())
    }

    fn handle_button(
        &mut self,
        action: ButtonAction,
        button: HidMouseButton,
    ) -> Result<(), DispatchError> {
        // The forwarded bitmask reflects button state at dispatch time,
        // i.e. with this transition already applied.
        match action {
            ButtonAction::Press => self.buttons.press(button),
            ButtonAction::Release => self.buttons.release(button),
        }

        let Some(mp) = &self.mouse else {
            return Ok(());
        };

        if self.capture.captured() {
            let evt = MouseClickEvent {
                action,
                button,
                buttons_state: self.buttons,
            };
            mp.process_click(&evt).map_err(DispatchError::Forward)?;
        } else if action == ButtonAction::Release {
            // A click used to regain control is consumed, not delivered.
            // Button-down stays ignored while uncaptured; only the release
            // re-engages capture.
            debug!("click-to-recapture");
            self.set_capture(true);
        }
        Ok(())
    }

    fn handle_scroll(&mut self, hscroll: i32, vscroll: i32) -> Result<(), DispatchError> {
        if let Some(mp) = &self.mouse {
            if self.capture.captured() {
                let evt = MouseScrollEvent {
                    hscroll,
                    vscroll,
                    buttons_state: self.buttons,
                };
                mp.process_scroll(&evt).map_err(DispatchError::Forward)?;
            }
        }
        Ok(())
    }

    // ── Capture side effects ──────────────────────────────────────────────────

    fn set_capture(&mut self, want: bool) {
        self.capture.set_captured(want);
        self.apply_grab(want);
    }

    fn apply_grab(&mut self, want: bool) {
        if let Err(e) = self.surface.set_pointer_grab(want) {
            // Capture state keeps the requested value; the platform call is
            // best-effort.
            warn!("could not change pointer grab: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

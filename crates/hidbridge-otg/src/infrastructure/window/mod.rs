//! Window surface infrastructure for the OTG front-end.
//!
//! The surface is a minimal platform window showing a static icon; it has no
//! business logic.  The dispatcher drives it through the [`WindowSurface`]
//! trait, so unit tests can substitute [`mock::RecordingSurface`] and never
//! open a real window.
//!
//! [`RawEvent`] is the windowing-library-independent event representation
//! delivered to the dispatcher: key and button identifiers are already
//! translated to the canonical HID tables at this boundary, with unmapped
//! codes carried as the `Unknown` sentinel rather than dropped.

use hidbridge_core::{ButtonAction, HidKeyCode, HidMouseButton, KeyAction};
use thiserror::Error;

pub mod icon;
pub mod mock;
pub mod winit_surface;

/// A raw input event as delivered by the host's event loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// The window was exposed and must be repainted.
    Redraw,
    /// The window lost OS keyboard focus.
    FocusLost,
    /// A key transition.  `key` is `Unknown` for codes outside the table.
    Key {
        action: KeyAction,
        key: HidKeyCode,
        repeat: bool,
    },
    /// Relative pointer motion in surface pixels.
    PointerMotion { dx: i32, dy: i32 },
    /// A mouse button transition.
    Button {
        action: ButtonAction,
        button: HidMouseButton,
    },
    /// Wheel motion in notches; positive `vscroll` is away from the user.
    Scroll { hscroll: i32, vscroll: i32 },
}

/// Error type for window surface operations.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("could not create window: {0}")]
    CreateWindow(String),
    #[error("could not create draw surface: {0}")]
    CreatePresenter(String),
    #[error("could not set pointer grab to {wanted}: {reason}")]
    PointerGrab { wanted: bool, reason: String },
    #[error("could not present the window contents: {0}")]
    Present(String),
}

/// Trait abstracting the platform window owned by the OTG front-end.
///
/// The production implementation wraps a winit window; tests use
/// [`mock::RecordingSurface`].
pub trait WindowSurface {
    /// Repaints the static icon.  Failures are degraded conditions, not
    /// fatal: callers log and continue.
    fn redraw(&mut self) -> Result<(), SurfaceError>;

    /// Switches the platform pointer-grab mode.
    ///
    /// A failure here leaves the *requested* value as the surface's reported
    /// grab state; capture policy treats the platform call as best-effort.
    fn set_pointer_grab(&mut self, grab: bool) -> Result<(), SurfaceError>;

    /// Returns the most recently requested grab state.
    fn pointer_grab(&self) -> bool;

    /// Hint that the pointer crossed the window boundary.  Only the macOS
    /// recapture workaround consumes this; the default is a no-op.
    fn note_pointer_boundary(&mut self, _inside: bool) {}
}

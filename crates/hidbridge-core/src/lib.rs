//! # hidbridge-core
//!
//! Shared library for Hidbridge containing the normalized HID event model,
//! key/button code translation tables, and the mouse-capture state machine.
//!
//! This crate is used by the OTG front-end application and by any future
//! transport back-end. It has zero dependencies on OS APIs, UI frameworks,
//! or USB stacks.
//!
//! # Architecture overview (for beginners)
//!
//! Hidbridge lets a host computer drive the keyboard and mouse of a device
//! attached as a USB accessory.  In OTG mode the host has no video feed from
//! the device, so the host shows only a small icon window whose sole job is
//! to own keyboard focus and the pointer grab.  Every input event delivered
//! to that window is translated into a *normalized HID event* and handed to
//! a downstream processor that ultimately emits USB HID reports.
//!
//! This crate defines:
//!
//! - **`event`** – The normalized event model: keyboard events and the three
//!   mouse event variants (motion, click, scroll), plus the modifier and
//!   button bitmasks they carry.
//!
//! - **`keymap`** – Translation tables between raw code spaces and the
//!   canonical representation: USB HID Usage IDs.  Unmapped codes translate
//!   to an explicit `Unknown` sentinel, never to an error.
//!
//! - **`domain`** – Pure business logic with no OS dependencies.  The most
//!   important piece is the [`CaptureState`] machine deciding when pointer
//!   input is grabbed by the window and when a modifier-key chord toggles
//!   that grab.

pub mod domain;
pub mod event;
pub mod keymap;

// Re-export the most-used types at the crate root so callers can write
// `hidbridge_core::CaptureState` instead of the full module path.
pub use domain::capture::{is_capture_toggle_key, CaptureState};
pub use event::{
    ButtonAction, KeyAction, KeyEvent, ModifierFlags, MouseButtonsState, MouseClickEvent,
    MouseMotionEvent, MouseScrollEvent, Sequence,
};
pub use keymap::button::HidMouseButton;
pub use keymap::hid::HidKeyCode;

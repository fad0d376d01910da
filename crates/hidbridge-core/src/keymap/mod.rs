//! Code translation tables for keyboard and mouse event mapping.
//!
//! The canonical representation is USB HID Usage IDs (page 0x07) for keys
//! and HID boot-report bit positions for mouse buttons.  Windowing-layer
//! codes are translated to these tables at the capture boundary; every
//! lookup is total, with unmapped codes producing an `Unknown` sentinel
//! rather than an error.

pub mod button;
pub mod hid;

pub use button::HidMouseButton;
pub use hid::HidKeyCode;

//! Pure business logic with no OS dependencies.

pub mod capture;

pub use capture::{is_capture_toggle_key, CaptureState};

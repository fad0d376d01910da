//! Capability processors: the downstream sinks for normalized HID events.
//!
//! A session supplies zero, one, or both processors; the dispatcher treats
//! each as independently optional.  The processors own everything past the
//! normalization boundary, including retries and the USB report encoding —
//! from the dispatcher's perspective each accept operation is a single,
//! synchronous, non-blocking attempt.

use hidbridge_core::{KeyEvent, MouseClickEvent, MouseMotionEvent, MouseScrollEvent, Sequence};

pub mod mock;
pub mod trace;

/// Trait for the keyboard capability: accepts one normalized key event.
///
/// `sequence` is an opaque correlation token for acknowledgement-based
/// processors; OTG mode always passes [`Sequence::NONE`].
pub trait KeyProcessor: Send + Sync {
    fn process_key(&self, event: &KeyEvent, sequence: Sequence) -> Result<(), String>;
}

/// Trait for the mouse capability: one accept operation per normalized
/// mouse event variant.
pub trait MouseProcessor: Send + Sync {
    fn process_motion(&self, event: &MouseMotionEvent) -> Result<(), String>;
    fn process_click(&self, event: &MouseClickEvent) -> Result<(), String>;
    fn process_scroll(&self, event: &MouseScrollEvent) -> Result<(), String>;
}

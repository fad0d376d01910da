//! Tracing capability processors.
//!
//! These sinks log every accepted event at debug level.  They are the
//! default processors wired up by `main` and mark the seam where a USB
//! transport implementation plugs in: anything implementing
//! [`KeyProcessor`]/[`MouseProcessor`] can replace them without touching
//! the dispatcher.

use hidbridge_core::{KeyEvent, MouseClickEvent, MouseMotionEvent, MouseScrollEvent, Sequence};
use tracing::debug;

use super::{KeyProcessor, MouseProcessor};

/// A [`KeyProcessor`] that logs accepted events.
#[derive(Debug, Default)]
pub struct TraceKeyProcessor;

impl KeyProcessor for TraceKeyProcessor {
    fn process_key(&self, event: &KeyEvent, sequence: Sequence) -> Result<(), String> {
        debug!(
            action = ?event.action,
            keycode = ?event.keycode,
            repeat = event.repeat,
            mods = event.mods_state.0,
            seq = sequence.value(),
            "key event"
        );
        Ok(())
    }
}

/// A [`MouseProcessor`] that logs accepted events.
#[derive(Debug, Default)]
pub struct TraceMouseProcessor;

impl MouseProcessor for TraceMouseProcessor {
    fn process_motion(&self, event: &MouseMotionEvent) -> Result<(), String> {
        debug!(
            dx = event.dx,
            dy = event.dy,
            buttons = event.buttons_state.0,
            "mouse motion"
        );
        Ok(())
    }

    fn process_click(&self, event: &MouseClickEvent) -> Result<(), String> {
        debug!(
            action = ?event.action,
            button = ?event.button,
            buttons = event.buttons_state.0,
            "mouse click"
        );
        Ok(())
    }

    fn process_scroll(&self, event: &MouseScrollEvent) -> Result<(), String> {
        debug!(
            hscroll = event.hscroll,
            vscroll = event.vscroll,
            buttons = event.buttons_state.0,
            "mouse scroll"
        );
        Ok(())
    }
}

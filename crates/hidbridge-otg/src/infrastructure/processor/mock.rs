//! Recording capability processors for unit testing.

use std::sync::Mutex;

use hidbridge_core::{KeyEvent, MouseClickEvent, MouseMotionEvent, MouseScrollEvent, Sequence};

use super::{KeyProcessor, MouseProcessor};

/// A [`KeyProcessor`] that records every accepted event.
#[derive(Default)]
pub struct RecordingKeyProcessor {
    pub key_events: Mutex<Vec<(KeyEvent, Sequence)>>,
    pub should_fail: bool,
}

impl RecordingKeyProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyProcessor for RecordingKeyProcessor {
    fn process_key(&self, event: &KeyEvent, sequence: Sequence) -> Result<(), String> {
        if self.should_fail {
            return Err("injected failure".to_string());
        }
        self.key_events
            .lock()
            .expect("lock poisoned")
            .push((*event, sequence));
        Ok(())
    }
}

/// A [`MouseProcessor`] that records every accepted event per variant.
#[derive(Default)]
pub struct RecordingMouseProcessor {
    pub motion_events: Mutex<Vec<MouseMotionEvent>>,
    pub click_events: Mutex<Vec<MouseClickEvent>>,
    pub scroll_events: Mutex<Vec<MouseScrollEvent>>,
    pub should_fail: bool,
}

impl RecordingMouseProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of events accepted across all three variants.
    pub fn total_events(&self) -> usize {
        self.motion_events.lock().expect("lock poisoned").len()
            + self.click_events.lock().expect("lock poisoned").len()
            + self.scroll_events.lock().expect("lock poisoned").len()
    }
}

impl MouseProcessor for RecordingMouseProcessor {
    fn process_motion(&self, event: &MouseMotionEvent) -> Result<(), String> {
        if self.should_fail {
            return Err("injected failure".to_string());
        }
        self.motion_events
            .lock()
            .expect("lock poisoned")
            .push(*event);
        Ok(())
    }

    fn process_click(&self, event: &MouseClickEvent) -> Result<(), String> {
        if self.should_fail {
            return Err("injected failure".to_string());
        }
        self.click_events
            .lock()
            .expect("lock poisoned")
            .push(*event);
        Ok(())
    }

    fn process_scroll(&self, event: &MouseScrollEvent) -> Result<(), String> {
        if self.should_fail {
            return Err("injected failure".to_string());
        }
        self.scroll_events
            .lock()
            .expect("lock poisoned")
            .push(*event);
        Ok(())
    }
}

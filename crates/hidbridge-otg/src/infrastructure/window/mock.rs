//! Mock window surface for unit testing.
//!
//! Records every grab and redraw request so tests can assert on the exact
//! side effects of a dispatched event without opening a real window.

use std::sync::{Arc, Mutex};

use super::{SurfaceError, WindowSurface};

/// A recording implementation of [`WindowSurface`].
///
/// Cloning shares the underlying recordings, so a test can keep a handle
/// while the dispatcher owns the surface exclusively.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    grab_calls: Arc<Mutex<Vec<bool>>>,
    redraw_count: Arc<Mutex<u32>>,
    grabbed: Arc<Mutex<bool>>,
    /// When `true`, `set_pointer_grab` fails after recording the call.
    fail_grab: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose grab calls fail, for degraded-platform tests.
    pub fn failing_grab() -> Self {
        Self {
            fail_grab: true,
            ..Self::default()
        }
    }

    /// Every `set_pointer_grab` argument in call order.
    pub fn grab_calls(&self) -> Vec<bool> {
        self.grab_calls.lock().expect("lock poisoned").clone()
    }

    /// Number of redraws requested so far.
    pub fn redraw_count(&self) -> u32 {
        *self.redraw_count.lock().expect("lock poisoned")
    }
}

impl WindowSurface for RecordingSurface {
    fn redraw(&mut self) -> Result<(), SurfaceError> {
        *self.redraw_count.lock().expect("lock poisoned") += 1;
        Ok(())
    }

    fn set_pointer_grab(&mut self, grab: bool) -> Result<(), SurfaceError> {
        self.grab_calls.lock().expect("lock poisoned").push(grab);
        *self.grabbed.lock().expect("lock poisoned") = grab;
        if self.fail_grab {
            return Err(SurfaceError::PointerGrab {
                wanted: grab,
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    fn pointer_grab(&self) -> bool {
        *self.grabbed.lock().expect("lock poisoned")
    }
}

//! The production [`WindowSurface`] implementation on winit + softbuffer.
//!
//! The window exists only as a focus target: a small, non-resizable surface
//! showing the embedded icon.  Pointer capture uses the platform grab modes
//! (`Locked` where available, `Confined` as fallback) with the cursor hidden
//! while captured.

use std::num::NonZeroU32;
use std::sync::Arc;

use tracing::debug;
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event::{DeviceEvent, ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId, WindowLevel};

use hidbridge_core::{ButtonAction, HidKeyCode, KeyAction};

use super::{icon, RawEvent, SurfaceError, WindowSurface};
use crate::infrastructure::storage::config::WindowConfig;
use crate::infrastructure::translate::{button_to_hid, keycode_to_hid};

/// Default window size when the configuration leaves it unset.
pub const DEFAULT_WIDTH: u32 = 256;
pub const DEFAULT_HEIGHT: u32 = 256;

/// Pixel-delta wheels are quantized to notches of this many pixels.
const PIXELS_PER_NOTCH: f64 = 16.0;

/// A winit window paired with a softbuffer presenter.
pub struct WinitSurface {
    window: Arc<Window>,
    _context: softbuffer::Context<Arc<Window>>,
    surface: softbuffer::Surface<Arc<Window>, Arc<Window>>,
    grabbed: bool,
    // Consumed by the macOS warp-to-center workaround only.
    #[cfg_attr(not(target_os = "macos"), allow(dead_code))]
    cursor_inside: bool,
}

impl WinitSurface {
    /// Creates the window and its presenter from the window configuration.
    pub fn new(event_loop: &ActiveEventLoop, cfg: &WindowConfig) -> Result<Self, SurfaceError> {
        let width = cfg.width.unwrap_or(DEFAULT_WIDTH);
        let height = cfg.height.unwrap_or(DEFAULT_HEIGHT);

        let mut attrs = Window::default_attributes()
            .with_title(cfg.title.clone())
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(false)
            .with_decorations(!cfg.borderless)
            .with_window_level(if cfg.always_on_top {
                WindowLevel::AlwaysOnTop
            } else {
                WindowLevel::Normal
            });
        if let (Some(x), Some(y)) = (cfg.x, cfg.y) {
            attrs = attrs.with_position(LogicalPosition::new(x, y));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| SurfaceError::CreateWindow(e.to_string()))?,
        );
        let context = softbuffer::Context::new(Arc::clone(&window))
            .map_err(|e| SurfaceError::CreatePresenter(e.to_string()))?;
        let surface = softbuffer::Surface::new(&context, Arc::clone(&window))
            .map_err(|e| SurfaceError::CreatePresenter(e.to_string()))?;

        Ok(Self {
            window,
            _context: context,
            surface,
            grabbed: false,
            cursor_inside: true,
        })
    }

    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    /// A shared handle to the underlying window, for event-loop plumbing
    /// (minimize requests) that bypasses the dispatcher.
    pub fn window(&self) -> Arc<Window> {
        Arc::clone(&self.window)
    }
}

impl WindowSurface for WinitSurface {
    fn redraw(&mut self) -> Result<(), SurfaceError> {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Zero-sized (minimized) surfaces cannot be presented.
            return Ok(());
        };

        self.surface
            .resize(width, height)
            .map_err(|e| SurfaceError::Present(e.to_string()))?;
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| SurfaceError::Present(e.to_string()))?;
        icon::draw(&mut buffer, size.width, size.height);
        buffer
            .present()
            .map_err(|e| SurfaceError::Present(e.to_string()))
    }

    fn set_pointer_grab(&mut self, grab: bool) -> Result<(), SurfaceError> {
        self.grabbed = grab;

        if grab {
            // On macOS a grab only takes effect once the pointer is over the
            // window, so warp it to the center first when it is outside.
            #[cfg(target_os = "macos")]
            if !self.cursor_inside {
                let size = self.window.inner_size();
                let center = winit::dpi::PhysicalPosition::new(
                    f64::from(size.width) / 2.0,
                    f64::from(size.height) / 2.0,
                );
                if let Err(e) = self.window.set_cursor_position(center) {
                    debug!("could not warp pointer to window center: {e}");
                }
            }

            let result = self
                .window
                .set_cursor_grab(CursorGrabMode::Locked)
                .or_else(|_| self.window.set_cursor_grab(CursorGrabMode::Confined));
            match result {
                Ok(()) => {
                    self.window.set_cursor_visible(false);
                    debug!("pointer grab engaged");
                    Ok(())
                }
                Err(e) => Err(SurfaceError::PointerGrab {
                    wanted: true,
                    reason: e.to_string(),
                }),
            }
        } else {
            let result = self.window.set_cursor_grab(CursorGrabMode::None);
            self.window.set_cursor_visible(true);
            debug!("pointer grab released");
            result.map_err(|e| SurfaceError::PointerGrab {
                wanted: false,
                reason: e.to_string(),
            })
        }
    }

    fn pointer_grab(&self) -> bool {
        self.grabbed
    }

    fn note_pointer_boundary(&mut self, inside: bool) {
        self.cursor_inside = inside;
    }
}

/// Translates a winit window event into a [`RawEvent`], if it carries one.
///
/// Synthetic key events injected on focus change are discarded; they do not
/// correspond to physical key transitions.
pub fn raw_event_from_window(event: &WindowEvent) -> Option<RawEvent> {
    match event {
        WindowEvent::RedrawRequested => Some(RawEvent::Redraw),
        WindowEvent::Focused(false) => Some(RawEvent::FocusLost),
        WindowEvent::KeyboardInput {
            event, is_synthetic, ..
        } => {
            if *is_synthetic {
                return None;
            }
            let key = match event.physical_key {
                PhysicalKey::Code(code) => keycode_to_hid(code),
                PhysicalKey::Unidentified(_) => HidKeyCode::Unknown,
            };
            let action = match event.state {
                ElementState::Pressed => KeyAction::Down,
                ElementState::Released => KeyAction::Up,
            };
            Some(RawEvent::Key {
                action,
                key,
                repeat: event.repeat,
            })
        }
        WindowEvent::MouseInput { state, button, .. } => Some(RawEvent::Button {
            action: match state {
                ElementState::Pressed => ButtonAction::Press,
                ElementState::Released => ButtonAction::Release,
            },
            button: button_to_hid(*button),
        }),
        WindowEvent::MouseWheel { delta, .. } => {
            let (hscroll, vscroll) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (x.round() as i32, y.round() as i32),
                MouseScrollDelta::PixelDelta(pos) => (
                    (pos.x / PIXELS_PER_NOTCH).round() as i32,
                    (pos.y / PIXELS_PER_NOTCH).round() as i32,
                ),
            };
            Some(RawEvent::Scroll { hscroll, vscroll })
        }
        _ => None,
    }
}

/// Translates a winit device event into a [`RawEvent`], if it carries one.
///
/// Relative pointer motion arrives as a device event so that it keeps
/// flowing while the cursor is locked to the window.
pub fn raw_event_from_device(event: &DeviceEvent) -> Option<RawEvent> {
    match event {
        DeviceEvent::MouseMotion { delta: (dx, dy) } => Some(RawEvent::PointerMotion {
            dx: dx.round() as i32,
            dy: dy.round() as i32,
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_device_mouse_motion_becomes_pointer_motion() {
        let event = DeviceEvent::MouseMotion { delta: (5.4, -2.6) };

        let raw = raw_event_from_device(&event);

        assert_eq!(raw, Some(RawEvent::PointerMotion { dx: 5, dy: -3 }));
    }

    #[test]
    fn test_unrelated_device_events_are_ignored() {
        let event = DeviceEvent::Motion { axis: 0, value: 1.0 };

        assert_eq!(raw_event_from_device(&event), None);
    }

    #[test]
    fn test_focus_gain_is_not_a_raw_event() {
        assert_eq!(raw_event_from_window(&WindowEvent::Focused(true)), None);
        assert_eq!(
            raw_event_from_window(&WindowEvent::Focused(false)),
            Some(RawEvent::FocusLost)
        );
    }

    #[test]
    fn test_pixel_delta_wheel_is_quantized_to_notches() {
        let event = WindowEvent::MouseWheel {
            device_id: unsafe { winit::event::DeviceId::dummy() },
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -32.0)),
            phase: winit::event::TouchPhase::Moved,
        };

        let raw = raw_event_from_window(&event);

        assert_eq!(
            raw,
            Some(RawEvent::Scroll {
                hscroll: 0,
                vscroll: -2
            })
        );
    }
}

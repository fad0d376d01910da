//! hidbridge-otg library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does hidbridge-otg do? (for beginners)
//!
//! OTG mode drives a device attached to the host as a USB accessory.  The
//! host has *no video feed* from that device, so this front-end opens only a
//! small icon window.  The window exists to own keyboard focus and the
//! pointer grab; everything typed or moved while it is focused becomes a
//! normalized HID event forwarded toward the device.
//!
//! The application:
//!
//! 1. Loads the TOML configuration and applies CLI overrides.
//! 2. Creates the icon window (winit) with a software presenter (softbuffer).
//! 3. Feeds every windowing event through the [`OtgDispatcher`], which owns
//!    the mouse-capture state machine and the forwarding policy.
//! 4. Hands accepted events to the keyboard/mouse capability processors,
//!    where the USB transport plugs in.
//!
//! [`OtgDispatcher`]: application::dispatch::OtgDispatcher

/// Application layer: the event dispatch use case.
pub mod application;

/// Infrastructure layer: window surface, capability processors, code
/// translation, configuration storage, and platform adapters.
pub mod infrastructure;

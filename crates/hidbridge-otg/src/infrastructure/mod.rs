//! Infrastructure layer: everything that touches an OS API or a file.
//!
//! The application layer depends only on the traits defined here
//! ([`window::WindowSurface`], [`processor::KeyProcessor`],
//! [`processor::MouseProcessor`]); the concrete winit/softbuffer and
//! platform-specific implementations are injected at startup.

pub mod platform;
pub mod processor;
pub mod storage;
pub mod translate;
pub mod window;

//! Application layer: the OTG event dispatch use case.
//!
//! This layer contains the session policy (capture gating, chord handling,
//! event translation and routing) expressed purely against the traits
//! defined by the infrastructure layer.

pub mod dispatch;

pub use dispatch::{DispatchError, OtgDispatcher};

//! Platform-specific adapters.
//!
//! Everything here is conditionally compiled; the rest of the crate is
//! platform-neutral and must not depend on these modules directly except
//! through `cfg`-gated call sites in `main`.

#[cfg(target_os = "windows")]
pub mod windows_hook;

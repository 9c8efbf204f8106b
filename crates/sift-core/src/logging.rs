#![forbid(unsafe_code)]

//! Logging shim.
//!
//! With the `tracing` feature enabled this module re-exports the `tracing`
//! macros so downstream crates can log through `sift_core::debug!` without
//! taking a direct dependency. Without the feature only [`LOG_TARGET`] is
//! defined and call sites are expected to be `#[cfg(feature = "tracing")]`-gated.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, info, trace, warn};

/// Target used for events emitted by Sift state machines.
pub const LOG_TARGET: &str = "sift";

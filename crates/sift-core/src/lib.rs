// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: input events, debouncing, and logging.
//!
//! # Role in Sift
//! `sift-core` is the input layer. It owns the normalized event types that
//! widgets consume and the time-injected [`debounce::Debouncer`] that turns
//! a stream of rapid edits into one settled value.
//!
//! # Primary responsibilities
//! - **Event**: canonical input events (keys, paste, focus).
//! - **Debouncer**: "latest value wins" coalescing over a fixed window.
//! - **Logging**: `tracing` re-exports behind the `tracing` feature.
//!
//! # How it fits in the system
//! The widget crate (`sift-widgets`) consumes `sift_core::event::Event`
//! values and drives its state machines. Nothing in this crate reads the
//! clock on its own: every time-dependent call takes a `now` argument, so
//! the host event loop decides when timers fire.

pub mod debounce;
pub mod event;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};

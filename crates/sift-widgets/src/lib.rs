#![forbid(unsafe_code)]

//! Widget state for sift.
//!
//! # Role in sift
//! `sift-widgets` holds the search-and-select state machines. Each piece is
//! usable on its own; [`autocomplete::Autocomplete`] composes them into the
//! full widget.
//!
//! # How it fits in the system
//! Input arrives as `sift-core` events (or direct calls for pointer
//! clicks the host has already hit-tested). The widget never draws; the
//! host reads [`Autocomplete::rows`](autocomplete::Autocomplete::rows),
//! the selection, and the presentation props and renders them however it
//! likes.

pub mod autocomplete;
pub mod config;
pub mod dropdown;
pub mod filter;
pub mod navigator;
pub mod option;
pub mod selection;

pub use autocomplete::{Autocomplete, AutocompleteBuilder, OptionRow};
pub use config::{AutocompleteConfig, ConfigError, PresentationProps};
pub use dropdown::{Dropdown, WidgetBoundary};
pub use filter::{FilterEngine, FilterFn, FilterPass, ParseSearchModeError, SearchMode, default_filter};
pub use navigator::{NavAction, NavOutcome, Navigator};
pub use option::{SelectOption, options};
pub use selection::{Selection, SelectionChange};

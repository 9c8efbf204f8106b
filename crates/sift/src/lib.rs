#![forbid(unsafe_code)]

//! Sift public facade crate.
//!
//! Re-exports the event types, the debouncer, and the autocomplete widget
//! state from the internal crates, plus a prelude for day-to-day usage.
//!
//! ```
//! use sift::prelude::*;
//! use web_time::Instant;
//!
//! let mut widget = Autocomplete::builder(options(["Apple", "Banana", "Cherry"]))
//!     .multiple(true)
//!     .build();
//! let now = Instant::now();
//! widget.handle_event(&Event::Focus(FocusEvent::Gained), now);
//! widget.click_option(2);
//! assert_eq!(widget.selection(), options(["Cherry"]).as_slice());
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use sift_core::debounce::{DebounceConfig, Debouncer};
pub use sift_core::event::{
    Event, FocusEvent, FocusId, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent,
};

// --- Widget re-exports -----------------------------------------------------

pub use sift_widgets::{
    Autocomplete, AutocompleteBuilder, AutocompleteConfig, ConfigError, FilterFn, FilterPass,
    OptionRow, ParseSearchModeError, PresentationProps, SearchMode, SelectOption,
    SelectionChange, WidgetBoundary, default_filter, options,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for sift hosts.
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
    /// A search mode name was not recognised.
    InvalidSearchMode(ParseSearchModeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::InvalidSearchMode(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::InvalidSearchMode(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ParseSearchModeError> for Error {
    fn from(err: ParseSearchModeError) -> Self {
        Self::InvalidSearchMode(err)
    }
}

/// Standard result type for sift APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Autocomplete, AutocompleteConfig, Error, Event, FocusEvent, KeyCode, KeyEvent, Modifiers,
        Result, SearchMode, SelectOption, options,
    };

    pub use crate::{core, widgets};
}

pub use sift_core as core;
pub use sift_widgets as widgets;

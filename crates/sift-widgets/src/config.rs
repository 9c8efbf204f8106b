#![forbid(unsafe_code)]

//! Declarative configuration for an [`Autocomplete`](crate::autocomplete::Autocomplete).
//!
//! Captures the data half of the widget's props (everything except the
//! callbacks) so a host can load it from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # stations.toml
//! search_mode = "async"
//! multiple = true
//! debounce_ms = 300
//! label = "Async Search"
//! description = "Searching of MRT Stations"
//! ```
//!
//! ```
//! # #[cfg(feature = "config-file")]
//! # fn main() -> Result<(), sift_widgets::config::ConfigError> {
//! use sift_widgets::autocomplete::Autocomplete;
//! use sift_widgets::config::AutocompleteConfig;
//! use sift_widgets::filter::SearchMode;
//! use sift_widgets::option::SelectOption;
//!
//! let config = AutocompleteConfig::from_toml_str(
//!     "search_mode = \"async\"\nmultiple = true\ndebounce_ms = 300\n",
//! )?;
//! let widget = Autocomplete::builder([SelectOption::record("EW1", "Pasir Ris")])
//!     .config(config)
//!     .build();
//! assert_eq!(widget.search_mode(), SearchMode::Async);
//! assert!(widget.is_multiple());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "config-file"))]
//! # fn main() {}
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;

use sift_core::debounce::{DEFAULT_DEBOUNCE_MS, DebounceConfig, MAX_DEBOUNCE_MS};

use crate::filter::SearchMode;

/// Placeholder shown in an empty query field.
pub const DEFAULT_PLACEHOLDER: &str = "Type to search...";

/// Data configuration for an autocomplete widget.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutocompleteConfig {
    /// Immediate or debounced filtering.
    pub search_mode: SearchMode,

    /// Multi-select toggle semantics.
    pub multiple: bool,

    /// Debounce window for async mode, in milliseconds.
    pub debounce_ms: u64,

    /// Placeholder text for the query field.
    pub placeholder: String,

    /// Label above the field.
    pub label: Option<String>,

    /// Help text below the field.
    pub description: Option<String>,

    /// Render the field as disabled.
    pub disabled: bool,

    /// Render a loading indicator.
    pub loading: bool,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            search_mode: SearchMode::Sync,
            multiple: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            label: None,
            description: None,
            disabled: false,
            loading: false,
        }
    }
}

impl AutocompleteConfig {
    /// Set the search mode.
    #[must_use]
    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    /// Enable or disable multi-select.
    #[must_use]
    pub fn with_multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Set the debounce window.
    #[must_use]
    pub fn with_debounce_ms(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Debounce settings derived from `debounce_ms`, clamped.
    #[must_use]
    pub fn debounce(&self) -> DebounceConfig {
        DebounceConfig::from_millis(self.debounce_ms).validated()
    }

    /// Presentation-only pass-through fields.
    #[must_use]
    pub fn props(&self) -> PresentationProps {
        PresentationProps {
            placeholder: self.placeholder.clone(),
            label: self.label.clone(),
            description: self.description.clone(),
            disabled: self.disabled,
            loading: self.loading,
        }
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.debounce_ms > MAX_DEBOUNCE_MS {
            errors.push(format!(
                "debounce_ms must be at most {MAX_DEBOUNCE_MS}, got {}",
                self.debounce_ms
            ));
        }
        errors
    }

    /// Consume the config, returning it only if [`validate`](Self::validate)
    /// finds nothing.
    pub fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(s)
            .map_err(ConfigError::Toml)?
            .checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(s)
            .map_err(ConfigError::Json)?
            .checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }
}

/// Fields the state machine carries for the renderer but never reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresentationProps {
    /// Placeholder text.
    pub placeholder: String,
    /// Field label.
    pub label: Option<String>,
    /// Help text.
    pub description: Option<String>,
    /// Disabled styling.
    pub disabled: bool,
    /// Loading indicator.
    pub loading: bool,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

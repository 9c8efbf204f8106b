#![forbid(unsafe_code)]

//! Filter engine: query text to visible options.
//!
//! The engine runs either the caller's [`FilterFn`] or [`default_filter`],
//! a case-insensitive substring match over [`SelectOption::display_text`].
//! Which query triggers a pass depends on [`SearchMode`]:
//!
//! | Mode | Trigger | Empty query |
//! |------|---------|-------------|
//! | `Sync` | every query change | all options |
//! | `Async` | debounced query | empty list, no notification |
//!
//! In async mode an empty result for an empty query means "not searched
//! yet" rather than "nothing matched".

use std::fmt;
use std::str::FromStr;

use crate::option::SelectOption;

/// Caller-supplied filter: receives the full option set and the query.
///
/// Its result is used verbatim; the engine does not re-filter it.
pub type FilterFn = Box<dyn Fn(&[SelectOption], &str) -> Vec<SelectOption>>;

/// When filtering runs relative to query edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SearchMode {
    /// Filter on every keystroke.
    #[default]
    Sync,

    /// Filter once the query has settled for the debounce window.
    Async,
}

impl SearchMode {
    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Async => "async",
        }
    }

    /// Whether filtering waits on the debouncer.
    #[must_use]
    pub const fn is_debounced(self) -> bool {
        matches!(self, Self::Async)
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown search mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSearchModeError(String);

impl ParseSearchModeError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParseSearchModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown search mode {:?} (expected \"sync\" or \"async\")", self.0)
    }
}

impl std::error::Error for ParseSearchModeError {}

impl FromStr for SearchMode {
    type Err = ParseSearchModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            v if v.eq_ignore_ascii_case("sync") => Ok(Self::Sync),
            v if v.eq_ignore_ascii_case("async") => Ok(Self::Async),
            other => Err(ParseSearchModeError(other.to_owned())),
        }
    }
}

/// Case-insensitive substring test. `needle_lower` must already be lowercase.
pub(crate) fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    // Fast path for ASCII
    if haystack.is_ascii() && needle_lower.is_ascii() {
        let haystack = haystack.as_bytes();
        let needle = needle_lower.as_bytes();
        if needle.len() > haystack.len() {
            return false;
        }
        return haystack
            .windows(needle.len())
            .any(|window| window.iter().zip(needle).all(|(h, n)| h.to_ascii_lowercase() == *n));
    }
    haystack.to_lowercase().contains(needle_lower)
}

/// Default policy: keep options whose display text contains `query`,
/// ignoring case. Order is preserved.
#[must_use]
pub fn default_filter(options: &[SelectOption], query: &str) -> Vec<SelectOption> {
    let query_lower = query.to_lowercase();
    options
        .iter()
        .filter(|opt| contains_ignore_case(opt.display_text(), &query_lower))
        .cloned()
        .collect()
}

/// Result of asking the engine to filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPass {
    /// A pass ran; the caller's input-change hook should fire.
    Filtered(Vec<SelectOption>),

    /// Async mode with an empty query: the list is cleared without a pass.
    Skipped,
}

impl FilterPass {
    /// The resulting list (empty when skipped).
    #[must_use]
    pub fn into_options(self) -> Vec<SelectOption> {
        match self {
            Self::Filtered(options) => options,
            Self::Skipped => Vec::new(),
        }
    }

    /// Whether a filter pass actually ran.
    #[must_use]
    pub const fn ran(&self) -> bool {
        matches!(self, Self::Filtered(_))
    }
}

/// Mode plus optional custom predicate.
pub struct FilterEngine {
    mode: SearchMode,
    custom: Option<FilterFn>,
}

impl fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterEngine")
            .field("mode", &self.mode)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(SearchMode::default())
    }
}

impl FilterEngine {
    /// Create an engine using the default filter.
    #[must_use]
    pub fn new(mode: SearchMode) -> Self {
        Self { mode, custom: None }
    }

    /// Use a caller-supplied filter.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterFn) -> Self {
        self.custom = Some(filter);
        self
    }

    /// Replace (or remove) the custom filter.
    pub fn set_filter(&mut self, filter: Option<FilterFn>) {
        self.custom = filter;
    }

    /// Current search mode.
    #[must_use]
    pub const fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Whether a custom filter is installed.
    #[must_use]
    pub fn has_custom_filter(&self) -> bool {
        self.custom.is_some()
    }

    /// Filter `options` by `query` under the engine's mode.
    pub fn run(&self, options: &[SelectOption], query: &str) -> FilterPass {
        if self.mode == SearchMode::Async && query.is_empty() {
            return FilterPass::Skipped;
        }
        let filtered = match &self.custom {
            Some(filter) => filter(options, query),
            None => default_filter(options, query),
        };
        FilterPass::Filtered(filtered)
    }
}

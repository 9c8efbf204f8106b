#![forbid(unsafe_code)]

//! Selectable options.
//!
//! An option is either a bare label or a `{ value, name }` record. Both
//! variants expose the same two accessors: [`SelectOption::display_text`]
//! for what the user sees and [`SelectOption::key`] for identity.
//!
//! Equality is identity-based: two options are equal when they are the
//! same variant with the same key. A record's `name` is presentation only,
//! so `{ value: "EW1", name: "Pasir Ris" }` equals
//! `{ value: "EW1", name: "Pasir Ris (East)" }`.

use std::hash::{Hash, Hasher};

/// A selectable item.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum SelectOption {
    /// A plain label that is both its own key and its display text.
    Label(String),

    /// A record with a unique identifier and a display name.
    Record {
        /// Unique identifier.
        value: String,
        /// Display label.
        name: String,
    },
}

impl SelectOption {
    /// Create a label option.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label(text.into())
    }

    /// Create a record option.
    #[must_use]
    pub fn record(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Record {
            value: value.into(),
            name: name.into(),
        }
    }

    /// Text shown to the user and matched by the default filter.
    #[inline]
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Label(text) => text,
            Self::Record { name, .. } => name,
        }
    }

    /// Identity key used for equality and selection bookkeeping.
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Label(text) => text,
            Self::Record { value, .. } => value,
        }
    }

    /// Whether this is a record option.
    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }
}

impl PartialEq for SelectOption {
    fn eq(&self, other: &Self) -> bool {
        self.is_record() == other.is_record() && self.key() == other.key()
    }
}

impl Eq for SelectOption {}

impl Hash for SelectOption {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_record().hash(state);
        self.key().hash(state);
    }
}

impl std::fmt::Display for SelectOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_text())
    }
}

impl From<&str> for SelectOption {
    fn from(s: &str) -> Self {
        Self::Label(s.to_owned())
    }
}

impl From<String> for SelectOption {
    fn from(s: String) -> Self {
        Self::Label(s)
    }
}

impl<V: Into<String>, N: Into<String>> From<(V, N)> for SelectOption {
    fn from((value, name): (V, N)) -> Self {
        Self::record(value, name)
    }
}

/// Collect anything option-like into an option list.
#[must_use]
pub fn options<I, T>(items: I) -> Vec<SelectOption>
where
    I: IntoIterator<Item = T>,
    T: Into<SelectOption>,
{
    items.into_iter().map(Into::into).collect()
}

#![forbid(unsafe_code)]

//! Dropdown visibility.
//!
//! Opens on focus or typing. Closes on Escape, on a single-select pick,
//! or when focus moves to an element outside the widget's
//! [`WidgetBoundary`]. A blur towards the widget's own rows or chips
//! (clicking an entry moves focus onto it) keeps the list open.

use ahash::AHashSet;
use sift_core::event::FocusId;

/// The set of focusable elements that belong to one widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetBoundary {
    members: AHashSet<FocusId>,
}

impl WidgetBoundary {
    /// Create an empty boundary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a boundary from element ids.
    #[must_use]
    pub fn with_members(ids: impl IntoIterator<Item = FocusId>) -> Self {
        Self {
            members: ids.into_iter().collect(),
        }
    }

    /// Register an element as part of the widget.
    pub fn insert(&mut self, id: FocusId) -> bool {
        self.members.insert(id)
    }

    /// Unregister an element.
    pub fn remove(&mut self, id: FocusId) -> bool {
        self.members.remove(&id)
    }

    /// Whether `id` is inside the widget.
    #[must_use]
    pub fn contains(&self, id: FocusId) -> bool {
        self.members.contains(&id)
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no element is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Open/closed state of the option list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dropdown {
    open: bool,
}

impl Dropdown {
    /// Create a closed dropdown.
    #[must_use]
    pub const fn new() -> Self {
        Self { open: false }
    }

    /// Whether the dropdown is open.
    #[inline]
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the list should be drawn: open with at least one row.
    #[must_use]
    pub const fn is_list_visible(&self, len: usize) -> bool {
        self.open && len > 0
    }

    /// Focus entered the widget. Returns `true` if this opened it.
    pub fn on_focus_gained(&mut self) -> bool {
        self.set_open(true)
    }

    /// Focus left an element of the widget.
    ///
    /// Closes unless `next` is an element inside `boundary`. Returns `true`
    /// if this closed it.
    pub fn on_blur(&mut self, next: Option<FocusId>, boundary: &WidgetBoundary) -> bool {
        match next {
            Some(id) if boundary.contains(id) => false,
            _ => self.set_open(false),
        }
    }

    /// The query was edited.
    pub fn on_input(&mut self) -> bool {
        self.set_open(true)
    }

    /// Escape was pressed.
    pub fn on_cancel(&mut self) -> bool {
        self.set_open(false)
    }

    /// A selection completed; `close` comes from the selection change.
    pub fn on_selection(&mut self, close: bool) -> bool {
        close && self.set_open(false)
    }

    fn set_open(&mut self, open: bool) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }
}

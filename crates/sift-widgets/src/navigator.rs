#![forbid(unsafe_code)]

//! Keyboard navigation over the filtered list.
//!
//! The navigator tracks the highlighted ("active") row. Unlike
//! `select_next`/`select_previous` on a plain list, movement wraps:
//!
//! ```text
//!   Next:      none → 0 → 1 → … → len-1 → 0
//!   Previous:  none → len-1 → … → 1 → 0 → len-1
//! ```
//!
//! The navigator knows nothing about whether the dropdown is open; the
//! controller only forwards keys while the list is visible.

use sift_core::event::{KeyCode, KeyEvent};

/// A key interpreted as list navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    /// Highlight the next row (ArrowDown).
    Next,
    /// Highlight the previous row (ArrowUp).
    Previous,
    /// Toggle the highlighted row (Enter).
    Confirm,
    /// Close the dropdown (Escape).
    Cancel,
}

impl NavAction {
    /// Map a key event to a navigation action.
    ///
    /// Releases and chords with Ctrl/Alt/Super are not navigation.
    #[must_use]
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        if !key.is_actionable() || key.has_command_modifier() {
            return None;
        }
        match key.code {
            KeyCode::Down => Some(Self::Next),
            KeyCode::Up => Some(Self::Previous),
            KeyCode::Enter => Some(Self::Confirm),
            KeyCode::Escape => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// What the navigator did with an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Not handled; the host may apply default behavior.
    Ignored,
    /// The highlight moved to this row.
    Moved(usize),
    /// The row at this index should be toggled.
    Confirm(usize),
    /// The dropdown should close.
    Cancel,
}

impl NavOutcome {
    /// Whether the key was consumed (the host suppresses its default action).
    #[must_use]
    pub const fn is_handled(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Active-row state machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    active: Option<usize>,
}

impl Navigator {
    /// Create a navigator with nothing highlighted.
    #[must_use]
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// Currently highlighted row.
    #[inline]
    #[must_use = "use the active index (if any)"]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Clear the highlight.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Highlight `index`, or clear when it is out of range.
    pub fn set_active(&mut self, index: Option<usize>, len: usize) {
        self.active = index.filter(|&i| i < len);
    }

    /// Advance by one, wrapping past the end. Returns the new index.
    pub fn next(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let next = match self.active {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.active = Some(next);
        self.active
    }

    /// Step back by one, wrapping from the start (or none) to the end.
    pub fn previous(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let prev = match self.active {
            Some(i) if i > 0 => (i - 1).min(len - 1),
            _ => len - 1,
        };
        self.active = Some(prev);
        self.active
    }

    /// Apply `action` to a list of `len` rows.
    ///
    /// An empty list ignores everything. Confirm without a valid highlight
    /// is ignored so Enter falls through to the host.
    pub fn apply(&mut self, action: NavAction, len: usize) -> NavOutcome {
        if len == 0 {
            return NavOutcome::Ignored;
        }
        match action {
            NavAction::Next => self.next(len).map_or(NavOutcome::Ignored, NavOutcome::Moved),
            NavAction::Previous => self
                .previous(len)
                .map_or(NavOutcome::Ignored, NavOutcome::Moved),
            NavAction::Confirm => match self.active {
                Some(i) if i < len => NavOutcome::Confirm(i),
                _ => NavOutcome::Ignored,
            },
            NavAction::Cancel => NavOutcome::Cancel,
        }
    }
}

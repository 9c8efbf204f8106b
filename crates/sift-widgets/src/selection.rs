#![forbid(unsafe_code)]

//! Selection bookkeeping with toggle semantics.
//!
//! | Mode | Toggle `x` present | Toggle `x` absent |
//! |------|--------------------|-------------------|
//! | multi | remove `x` | append `x` |
//! | single | clear | replace with `[x]` |
//!
//! Selections are ordered and never contain duplicates (by
//! [`SelectOption`] identity). In single mode the length is at most one.

use crate::option::SelectOption;

/// Pure toggle: the selection that results from toggling `option`.
#[must_use]
pub fn toggle(option: &SelectOption, current: &[SelectOption], multiple: bool) -> Vec<SelectOption> {
    let present = current.contains(option);
    match (multiple, present) {
        (true, true) => current.iter().filter(|o| *o != option).cloned().collect(),
        (true, false) => {
            let mut next = current.to_vec();
            next.push(option.clone());
            next
        }
        (false, true) => Vec::new(),
        (false, false) => vec![option.clone()],
    }
}

/// Record of one selection change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// The selection after the change.
    pub selection: Vec<SelectOption>,
    /// The option that became selected, if any.
    pub added: Option<SelectOption>,
    /// Options that were deselected.
    pub removed: Vec<SelectOption>,
    /// Whether the dropdown should close (a single-select pick).
    pub close_dropdown: bool,
}

/// Ordered, duplicate-free selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: Vec<SelectOption>,
    multiple: bool,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new(multiple: bool) -> Self {
        Self {
            items: Vec::new(),
            multiple,
        }
    }

    /// Create a selection from an initial value.
    ///
    /// Duplicates are dropped and, in single mode, only the first option is
    /// kept.
    #[must_use]
    pub fn with_initial(multiple: bool, initial: impl IntoIterator<Item = SelectOption>) -> Self {
        let mut selection = Self::new(multiple);
        selection.replace(initial);
        selection
    }

    /// Replace the whole selection, normalising it as [`with_initial`] does.
    ///
    /// [`with_initial`]: Self::with_initial
    pub fn replace(&mut self, items: impl IntoIterator<Item = SelectOption>) {
        self.items.clear();
        for item in items {
            if !self.multiple && !self.items.is_empty() {
                break;
            }
            if !self.items.contains(&item) {
                self.items.push(item);
            }
        }
    }

    /// Toggle `option` and describe what changed.
    pub fn toggle(&mut self, option: &SelectOption) -> SelectionChange {
        let next = toggle(option, &self.items, self.multiple);
        let removed: Vec<SelectOption> = self
            .items
            .iter()
            .filter(|o| !next.contains(*o))
            .cloned()
            .collect();
        let added = (!self.items.contains(option)).then(|| option.clone());
        self.items = next;

        SelectionChange {
            selection: self.items.clone(),
            close_dropdown: !self.multiple,
            added,
            removed,
        }
    }

    /// Whether `option` is selected.
    #[must_use]
    pub fn contains(&self, option: &SelectOption) -> bool {
        self.items.contains(option)
    }

    /// Selected options in selection order.
    #[must_use]
    pub fn as_slice(&self) -> &[SelectOption] {
        &self.items
    }

    /// Option at `index` in selection order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SelectOption> {
        self.items.get(index)
    }

    /// Number of selected options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether multi-select semantics apply.
    #[must_use]
    pub const fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

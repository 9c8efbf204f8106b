#![forbid(unsafe_code)]

//! Autocomplete controller.
//!
//! Composes the [`FilterEngine`], [`Selection`], [`Navigator`] and
//! [`Dropdown`] into one search-and-select widget state.
//!
//! # Pipeline
//!
//! ```text
//!  keystroke ──▶ query ──┬── Sync ─────────────────────────▶ filter ──▶ reset active ──▶ on_input_change
//!                        └── Async ──▶ Debouncer ──tick()──▶ filter ──▶ reset active ──▶ on_input_change
//!
//!  Enter / click ──▶ Selection::toggle ──▶ on_change ──▶ (single mode) close dropdown
//! ```
//!
//! The only suspension point is the debouncer. The host loop asks
//! [`Autocomplete::next_deadline`] when to wake up and calls
//! [`Autocomplete::tick`] then; every other transition completes inside the
//! call that triggered it.
//!
//! # Example
//!
//! ```
//! use web_time::Instant;
//! use sift_core::event::{KeyCode, KeyEvent};
//! use sift_widgets::autocomplete::Autocomplete;
//! use sift_widgets::option::options;
//!
//! let now = Instant::now();
//! let mut widget = Autocomplete::builder(options(["Apple", "Banana", "Cherry"])).build();
//!
//! widget.focus();
//! widget.set_query("an", now);
//! assert_eq!(widget.filtered(), options(["Banana"]).as_slice());
//!
//! widget.handle_key(&KeyEvent::new(KeyCode::Down), now);
//! widget.handle_key(&KeyEvent::new(KeyCode::Enter), now);
//! assert_eq!(widget.selection(), options(["Banana"]).as_slice());
//! assert!(!widget.is_open()); // single-select closes on pick
//! ```

use std::borrow::Cow;
use std::fmt;

use sift_core::debounce::{DebounceConfig, Debouncer};
use sift_core::event::{Event, FocusEvent, FocusId, KeyCode, KeyEvent};
use unicode_segmentation::UnicodeSegmentation;
use web_time::Instant;

use crate::config::{AutocompleteConfig, PresentationProps};
use crate::dropdown::{Dropdown, WidgetBoundary};
use crate::filter::{FilterEngine, FilterFn, SearchMode};
use crate::navigator::{NavAction, NavOutcome, Navigator};
use crate::option::SelectOption;
use crate::selection::{Selection, SelectionChange};

/// Called with the full selection after every toggle.
///
/// Both modes receive a slice; in single mode it has length 0 or 1.
pub type ChangeFn = Box<dyn FnMut(&[SelectOption])>;

/// Called with the query after every filter pass.
pub type InputChangeFn = Box<dyn FnMut(&str)>;

/// Produces the label drawn for an option.
pub type RenderFn = Box<dyn Fn(&SelectOption) -> String>;

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`Autocomplete`].
pub struct AutocompleteBuilder {
    options: Vec<SelectOption>,
    config: AutocompleteConfig,
    debounce: Option<DebounceConfig>,
    value: Vec<SelectOption>,
    filter: Option<FilterFn>,
    on_change: Option<ChangeFn>,
    on_input_change: Option<InputChangeFn>,
    render_option: Option<RenderFn>,
    boundary: WidgetBoundary,
}

impl fmt::Debug for AutocompleteBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteBuilder")
            .field("options", &self.options.len())
            .field("config", &self.config)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl AutocompleteBuilder {
    fn new(options: Vec<SelectOption>) -> Self {
        Self {
            options,
            config: AutocompleteConfig::default(),
            debounce: None,
            value: Vec::new(),
            filter: None,
            on_change: None,
            on_input_change: None,
            render_option: None,
            boundary: WidgetBoundary::new(),
        }
    }

    /// Replace all data configuration at once.
    #[must_use]
    pub fn config(mut self, config: AutocompleteConfig) -> Self {
        self.config = config;
        self
    }

    /// Immediate or debounced filtering.
    #[must_use]
    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.config.search_mode = mode;
        self
    }

    /// Enable multi-select toggle semantics.
    #[must_use]
    pub fn multiple(mut self, multiple: bool) -> Self {
        self.config.multiple = multiple;
        self
    }

    /// Initial selection.
    #[must_use]
    pub fn value(mut self, value: impl IntoIterator<Item = SelectOption>) -> Self {
        self.value = value.into_iter().collect();
        self
    }

    /// Override the default substring filter.
    #[must_use]
    pub fn filter_options(
        mut self,
        filter: impl Fn(&[SelectOption], &str) -> Vec<SelectOption> + 'static,
    ) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Selection change hook.
    #[must_use]
    pub fn on_change(mut self, f: impl FnMut(&[SelectOption]) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Filter pass hook.
    #[must_use]
    pub fn on_input_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_input_change = Some(Box::new(f));
        self
    }

    /// Override the default label (string or record name).
    #[must_use]
    pub fn render_option(mut self, f: impl Fn(&SelectOption) -> String + 'static) -> Self {
        self.render_option = Some(Box::new(f));
        self
    }

    /// Debounce settings; overrides `config.debounce_ms`.
    ///
    /// The delay is clamped to the valid range on [`build`](Self::build).
    /// Pass [`DebounceConfig::from_env`] to honour `SIFT_DEBOUNCE_MS`.
    #[must_use]
    pub fn debounce(mut self, debounce: DebounceConfig) -> Self {
        self.debounce = Some(debounce);
        self
    }

    /// Focusable elements that count as "inside" the widget for blur.
    #[must_use]
    pub fn boundary(mut self, boundary: WidgetBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Placeholder text.
    #[must_use]
    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.config.placeholder = text.into();
        self
    }

    /// Field label.
    #[must_use]
    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.config.label = Some(text.into());
        self
    }

    /// Help text.
    #[must_use]
    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.config.description = Some(text.into());
        self
    }

    /// Disabled styling.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.config.disabled = disabled;
        self
    }

    /// Loading indicator.
    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.config.loading = loading;
        self
    }

    /// Mount the widget.
    ///
    /// Runs the initial filter pass: in sync mode every option is listed and
    /// `on_input_change("")` fires once; in async mode the list starts empty.
    #[must_use]
    pub fn build(self) -> Autocomplete {
        let debounce = self
            .debounce
            .map_or_else(|| self.config.debounce(), DebounceConfig::validated);
        let mut engine = FilterEngine::new(self.config.search_mode);
        engine.set_filter(self.filter);

        let mut widget = Autocomplete {
            options: self.options,
            query: String::new(),
            settled_query: String::new(),
            filtered: Vec::new(),
            selection: Selection::with_initial(self.config.multiple, self.value),
            navigator: Navigator::new(),
            dropdown: Dropdown::new(),
            boundary: self.boundary,
            engine,
            debouncer: Debouncer::new(debounce, String::new()),
            on_change: self.on_change,
            on_input_change: self.on_input_change,
            render_option: self.render_option,
            props: self.config.props(),
        };
        widget.refilter(true);
        #[cfg(feature = "tracing")]
        widget.log_transition("mount");
        widget
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One visible row of the dropdown, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow<'a> {
    /// Position in the filtered list.
    pub index: usize,
    /// The option itself.
    pub option: &'a SelectOption,
    /// Rendered label.
    pub label: Cow<'a, str>,
    /// Keyboard highlight.
    pub active: bool,
    /// Already in the selection.
    pub selected: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Search-and-select widget state.
pub struct Autocomplete {
    options: Vec<SelectOption>,
    query: String,
    /// Query the last async pass ran against.
    settled_query: String,
    filtered: Vec<SelectOption>,
    selection: Selection,
    navigator: Navigator,
    dropdown: Dropdown,
    boundary: WidgetBoundary,
    engine: FilterEngine,
    debouncer: Debouncer<String>,
    on_change: Option<ChangeFn>,
    on_input_change: Option<InputChangeFn>,
    render_option: Option<RenderFn>,
    props: PresentationProps,
}

impl fmt::Debug for Autocomplete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autocomplete")
            .field("mode", &self.engine.mode())
            .field("query", &self.query)
            .field("filtered", &self.filtered.len())
            .field("selection", &self.selection)
            .field("active", &self.navigator.active())
            .field("open", &self.dropdown.is_open())
            .field("debounce_pending", &self.debouncer.is_pending())
            .finish_non_exhaustive()
    }
}

impl Autocomplete {
    /// Start building a widget over `options`.
    #[must_use]
    pub fn builder(options: impl IntoIterator<Item = SelectOption>) -> AutocompleteBuilder {
        AutocompleteBuilder::new(options.into_iter().collect())
    }

    // --- Query path --------------------------------------------------------

    /// Replace the query text, as if the user edited the field.
    ///
    /// Opens the dropdown and clears the highlight. In sync mode the list is
    /// refiltered immediately; in async mode the debounce window restarts.
    /// Returns `false` if the text did not change.
    pub fn set_query(&mut self, text: impl Into<String>, now: Instant) -> bool {
        let text = text.into();
        if text == self.query {
            return false;
        }
        self.query = text;
        self.dropdown.on_input();
        self.navigator.reset();
        match self.engine.mode() {
            SearchMode::Sync => self.refilter(true),
            SearchMode::Async => self.debouncer.feed(self.query.clone(), now),
        }
        #[cfg(feature = "tracing")]
        self.log_transition("query");
        true
    }

    /// Fire the debounced filter pass if its window has elapsed.
    ///
    /// Returns `true` if a pass ran (or the list was cleared for an empty
    /// query). Always `false` in sync mode.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(settled) = self.debouncer.poll(now) else {
            return false;
        };
        self.settled_query = settled;
        self.refilter(true);
        #[cfg(feature = "tracing")]
        self.log_transition("debounce_fire");
        true
    }

    /// When the host should call [`tick`](Self::tick) next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Replace the option set and refilter.
    ///
    /// Sync mode runs a full pass (with notification). Async mode re-applies
    /// the last settled query without notifying, so a host that fetches in
    /// `on_input_change` and then calls this does not loop.
    pub fn set_options(&mut self, options: impl IntoIterator<Item = SelectOption>) {
        self.options = options.into_iter().collect();
        self.refilter(!self.engine.mode().is_debounced());
        #[cfg(feature = "tracing")]
        self.log_transition("options");
    }

    /// Replace (or remove) the custom filter and refilter like
    /// [`set_options`](Self::set_options).
    pub fn set_filter(&mut self, filter: Option<FilterFn>) {
        self.engine.set_filter(filter);
        self.refilter(!self.engine.mode().is_debounced());
    }

    fn refilter(&mut self, notify: bool) {
        let query = match self.engine.mode() {
            SearchMode::Sync => self.query.clone(),
            SearchMode::Async => self.settled_query.clone(),
        };
        let pass = self.engine.run(&self.options, &query);
        let ran = pass.ran();
        self.filtered = pass.into_options();
        self.navigator.reset();
        if ran
            && notify
            && let Some(on_input_change) = self.on_input_change.as_mut()
        {
            on_input_change(&query);
        }
    }

    // --- Selection path ----------------------------------------------------

    /// Toggle `option` in the selection and notify `on_change`.
    ///
    /// The option need not be in the filtered list.
    pub fn toggle(&mut self, option: &SelectOption) -> SelectionChange {
        let change = self.selection.toggle(option);
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&change.selection);
        }
        self.dropdown.on_selection(change.close_dropdown);
        #[cfg(feature = "tracing")]
        self.log_transition("toggle");
        change
    }

    /// Pointer click on the filtered row at `index`.
    pub fn click_option(&mut self, index: usize) -> Option<SelectionChange> {
        let option = self.filtered.get(index)?.clone();
        Some(self.toggle(&option))
    }

    /// Pointer click on the selected chip at `index` (deselects it).
    pub fn click_chip(&mut self, index: usize) -> Option<SelectionChange> {
        let option = self.selection.get(index)?.clone();
        Some(self.toggle(&option))
    }

    /// Replace the selection without notifying (controlled value update).
    pub fn set_selection(&mut self, value: impl IntoIterator<Item = SelectOption>) {
        self.selection.replace(value);
    }

    // --- Keyboard path -----------------------------------------------------

    /// Handle a key press on the query field.
    ///
    /// Navigation keys act only while the list is visible. Printable
    /// characters and Backspace edit the query. Returns `true` when the key
    /// was consumed and its default action should be suppressed.
    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> bool {
        if !key.is_actionable() {
            return false;
        }
        if let Some(action) = NavAction::from_key(key) {
            return self.navigate(action);
        }
        if key.has_command_modifier() {
            return false;
        }
        match key.code {
            KeyCode::Char(ch) if !ch.is_control() => {
                let mut text = self.query.clone();
                text.push(ch);
                self.set_query(text, now)
            }
            KeyCode::Backspace => {
                let Some((idx, _)) = self.query.grapheme_indices(true).next_back() else {
                    return false;
                };
                let text = self.query[..idx].to_owned();
                self.set_query(text, now)
            }
            _ => false,
        }
    }

    fn navigate(&mut self, action: NavAction) -> bool {
        if !self.is_list_visible() {
            return false;
        }
        let outcome = self.navigator.apply(action, self.filtered.len());
        match outcome {
            NavOutcome::Ignored | NavOutcome::Moved(_) => {}
            NavOutcome::Confirm(index) => {
                let option = self.filtered[index].clone();
                self.toggle(&option);
            }
            NavOutcome::Cancel => {
                self.dropdown.on_cancel();
            }
        }
        #[cfg(feature = "tracing")]
        {
            if outcome.is_handled() {
                self.log_transition("navigate");
            }
        }
        outcome.is_handled()
    }

    /// Append pasted text to the query. Line breaks become spaces.
    pub fn handle_paste(&mut self, text: &str, now: Instant) -> bool {
        let cleaned: String = text
            .chars()
            .filter_map(|c| match c {
                '\n' | '\r' | '\t' => Some(' '),
                c if c.is_control() => None,
                c => Some(c),
            })
            .collect();
        if cleaned.is_empty() {
            return false;
        }
        let text = format!("{}{cleaned}", self.query);
        self.set_query(text, now)
    }

    /// Highlight a row under the pointer (or clear with `None`).
    pub fn highlight(&mut self, index: Option<usize>) {
        self.navigator.set_active(index, self.filtered.len());
    }

    // --- Focus path --------------------------------------------------------

    /// The widget gained focus. Returns `true` if the dropdown opened.
    pub fn focus(&mut self) -> bool {
        let opened = self.dropdown.on_focus_gained();
        #[cfg(feature = "tracing")]
        {
            if opened {
                self.log_transition("focus");
            }
        }
        opened
    }

    /// Focus left an element of the widget towards `next`.
    ///
    /// Closes the dropdown unless `next` is inside the widget boundary.
    pub fn blur(&mut self, next: Option<FocusId>) -> bool {
        let closed = self.dropdown.on_blur(next, &self.boundary);
        #[cfg(feature = "tracing")]
        {
            if closed {
                self.log_transition("blur");
            }
        }
        closed
    }

    /// Register a focusable element as part of this widget.
    pub fn boundary_mut(&mut self) -> &mut WidgetBoundary {
        &mut self.boundary
    }

    /// Route any input event. Returns `true` if it was consumed.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key, now),
            Event::Paste(paste) => self.handle_paste(&paste.text, now),
            Event::Focus(FocusEvent::Gained) => self.focus(),
            Event::Focus(FocusEvent::Lost { next }) => self.blur(*next),
        }
    }

    // --- Accessors ---------------------------------------------------------

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Full option set.
    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// Options currently listed.
    #[must_use]
    pub fn filtered(&self) -> &[SelectOption] {
        &self.filtered
    }

    /// Selected options in selection order.
    #[must_use]
    pub fn selection(&self) -> &[SelectOption] {
        self.selection.as_slice()
    }

    /// Whether `option` is selected.
    #[must_use]
    pub fn is_selected(&self, option: &SelectOption) -> bool {
        self.selection.contains(option)
    }

    /// Keyboard-highlighted row.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.navigator.active()
    }

    /// Keyboard-highlighted option.
    #[must_use]
    pub fn active_option(&self) -> Option<&SelectOption> {
        self.navigator.active().and_then(|i| self.filtered.get(i))
    }

    /// Whether the dropdown is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.dropdown.is_open()
    }

    /// Whether the list should be drawn (open and non-empty).
    #[must_use]
    pub fn is_list_visible(&self) -> bool {
        self.dropdown.is_list_visible(self.filtered.len())
    }

    /// Whether a debounced pass is waiting.
    #[must_use]
    pub fn is_search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Search mode.
    #[must_use]
    pub fn search_mode(&self) -> SearchMode {
        self.engine.mode()
    }

    /// Whether multi-select semantics apply.
    #[must_use]
    pub fn is_multiple(&self) -> bool {
        self.selection.is_multiple()
    }

    /// Presentation pass-through fields.
    #[must_use]
    pub fn props(&self) -> &PresentationProps {
        &self.props
    }

    /// Mutable presentation fields (e.g. toggling `loading` while a
    /// lookup is in flight).
    pub fn props_mut(&mut self) -> &mut PresentationProps {
        &mut self.props
    }

    /// Label for `option`: the custom renderer, else its display text.
    #[must_use]
    pub fn render_label<'a>(&self, option: &'a SelectOption) -> Cow<'a, str> {
        match &self.render_option {
            Some(render) => Cow::Owned(render(option)),
            None => Cow::Borrowed(option.display_text()),
        }
    }

    /// Rows to draw, empty while the list is hidden.
    pub fn rows(&self) -> impl Iterator<Item = OptionRow<'_>> + '_ {
        let visible = self.is_list_visible();
        let active = self.navigator.active();
        self.filtered
            .iter()
            .enumerate()
            .filter(move |_| visible)
            .map(move |(index, option)| OptionRow {
                index,
                option,
                label: self.render_label(option),
                active: active == Some(index),
                selected: self.selection.contains(option),
            })
    }

    #[cfg(feature = "tracing")]
    fn log_transition(&self, action: &str) {
        tracing::debug!(
            target: sift_core::logging::LOG_TARGET,
            message = "autocomplete.transition",
            action,
            mode = self.engine.mode().as_str(),
            query_len = self.query.len(),
            filtered = self.filtered.len(),
            active = self.navigator.active(),
            selected = self.selection.len(),
            open = self.dropdown.is_open(),
            debounce_pending = self.debouncer.is_pending()
        );
    }
}

#![forbid(unsafe_code)]

//! End-to-end autocomplete scenarios.
//!
//! Proves that:
//! 1. Sync typing filters on every keystroke and Enter picks the highlight
//! 2. Multi-select clicks toggle, notify each time, and keep the list open
//! 3. Single-select picks close the list; typing reopens it with no highlight
//! 4. Async typing within the debounce window triggers exactly one pass
//! 5. Async lookups driven from `on_input_change` round-trip through
//!    `set_options` without re-triggering themselves
//!
//! Run:
//!   cargo test -p sift-widgets --test autocomplete_scenarios

use std::cell::RefCell;
use std::rc::Rc;

use sift_core::event::{Event, FocusEvent, KeyCode, KeyEvent};
use sift_widgets::{Autocomplete, SearchMode, SelectOption, WidgetBoundary, options};
use web_time::{Duration, Instant};

const INPUT: u64 = 1;
const LIST: u64 = 2;
const OUTSIDE: u64 = 100;

fn fruits() -> Vec<SelectOption> {
    options(["Apple", "Banana", "Cherry"])
}

fn press(w: &mut Autocomplete, code: KeyCode, now: Instant) -> bool {
    w.handle_event(&Event::Key(KeyEvent::new(code)), now)
}

fn type_text(w: &mut Autocomplete, text: &str, now: Instant) {
    for ch in text.chars() {
        press(w, KeyCode::Char(ch), now);
    }
}

/// Shared recorder for callback invocations.
fn recorder<T>() -> (Rc<RefCell<Vec<T>>>, Rc<RefCell<Vec<T>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    (Rc::clone(&log), log)
}

// ============================================================================
// 1. Sync filtering
// ============================================================================

#[test]
fn sync_typing_then_enter_selects_banana() {
    let now = Instant::now();
    let (changes, sink) = recorder::<Vec<SelectOption>>();
    let mut w = Autocomplete::builder(fruits())
        .on_change(move |sel| sink.borrow_mut().push(sel.to_vec()))
        .build();

    w.handle_event(&Event::Focus(FocusEvent::Gained), now);
    type_text(&mut w, "an", now);
    assert_eq!(w.filtered(), options(["Banana"]).as_slice());

    assert!(press(&mut w, KeyCode::Down, now));
    assert_eq!(w.active_index(), Some(0));
    assert!(press(&mut w, KeyCode::Enter, now));

    assert_eq!(w.selection(), options(["Banana"]).as_slice());
    assert_eq!(*changes.borrow(), vec![options(["Banana"])]);
    assert!(!w.is_open());
}

#[test]
fn each_keystroke_notifies_input_change() {
    let now = Instant::now();
    let (queries, sink) = recorder::<String>();
    let mut w = Autocomplete::builder(fruits())
        .on_input_change(move |q| sink.borrow_mut().push(q.to_owned()))
        .build();

    type_text(&mut w, "ch", now);
    press(&mut w, KeyCode::Backspace, now);
    assert_eq!(*queries.borrow(), vec!["", "c", "ch", "c"]);
    assert_eq!(w.filtered(), options(["Cherry"]).as_slice());
}

#[test]
fn empty_query_lists_everything_in_order() {
    let now = Instant::now();
    let mut w = Autocomplete::builder(fruits()).build();
    type_text(&mut w, "zz", now);
    assert!(w.filtered().is_empty());
    press(&mut w, KeyCode::Backspace, now);
    press(&mut w, KeyCode::Backspace, now);
    assert_eq!(w.filtered(), fruits().as_slice());
}

// ============================================================================
// 2. Multi-select
// ============================================================================

#[test]
fn multi_click_twice_deselects_and_keeps_open() {
    let (changes, sink) = recorder::<Vec<SelectOption>>();
    let mut w = Autocomplete::builder(options(["A", "B", "C"]))
        .multiple(true)
        .boundary(WidgetBoundary::with_members([INPUT, LIST]))
        .on_change(move |sel| sink.borrow_mut().push(sel.to_vec()))
        .build();

    w.focus();
    // Clicking a row moves focus onto the list, which is inside the widget.
    assert!(!w.blur(Some(LIST)));
    w.click_option(0);
    w.click_option(0);

    assert!(w.selection().is_empty());
    assert_eq!(*changes.borrow(), vec![options(["A"]), Vec::new()]);
    assert!(w.is_open());
}

#[test]
fn multi_enter_accumulates_in_selection_order() {
    let now = Instant::now();
    let mut w = Autocomplete::builder(fruits()).multiple(true).build();
    w.focus();

    press(&mut w, KeyCode::Up, now); // Cherry
    press(&mut w, KeyCode::Enter, now);
    press(&mut w, KeyCode::Down, now); // wraps to Apple
    press(&mut w, KeyCode::Enter, now);

    assert_eq!(w.selection(), options(["Cherry", "Apple"]).as_slice());
    assert!(w.is_open());
    assert_eq!(w.active_index(), Some(0));
}

#[test]
fn selection_survives_filtering_out() {
    let now = Instant::now();
    let mut w = Autocomplete::builder(fruits()).multiple(true).build();
    w.focus();
    w.click_option(0);
    type_text(&mut w, "ch", now);

    assert_eq!(w.filtered(), options(["Cherry"]).as_slice());
    assert!(w.is_selected(&SelectOption::from("Apple")));
    assert_eq!(w.click_chip(0).map(|c| c.selection), Some(Vec::new()));
}

// ============================================================================
// 3. Single-select and dropdown visibility
// ============================================================================

#[test]
fn single_pick_closes_and_typing_reopens() {
    let now = Instant::now();
    let mut w = Autocomplete::builder(fruits()).build();
    w.focus();
    press(&mut w, KeyCode::Down, now);
    press(&mut w, KeyCode::Down, now);
    press(&mut w, KeyCode::Enter, now);

    assert_eq!(w.selection(), options(["Banana"]).as_slice());
    assert!(!w.is_open());
    assert_eq!(w.rows().count(), 0);

    type_text(&mut w, "a", now);
    assert!(w.is_open());
    assert_eq!(w.active_index(), None);
}

#[test]
fn single_pick_of_selected_option_clears_and_closes() {
    let now = Instant::now();
    let mut w = Autocomplete::builder(fruits())
        .value([SelectOption::from("Cherry")])
        .build();
    w.focus();
    type_text(&mut w, "err", now);
    let change = w.click_option(0).expect("cherry is listed");

    assert!(change.selection.is_empty());
    assert!(change.close_dropdown);
    assert!(!w.is_open());
}

#[test]
fn blur_outside_closes_but_keeps_query_and_selection() {
    let now = Instant::now();
    let mut w = Autocomplete::builder(fruits())
        .multiple(true)
        .boundary(WidgetBoundary::with_members([INPUT, LIST]))
        .build();
    w.focus();
    type_text(&mut w, "e", now);
    w.click_option(1);

    assert!(w.handle_event(&Event::Focus(FocusEvent::lost_to(OUTSIDE)), now));
    assert!(!w.is_open());
    assert_eq!(w.query(), "e");
    assert_eq!(w.selection(), options(["Cherry"]).as_slice());

    assert!(w.handle_event(&Event::Focus(FocusEvent::Gained), now));
    assert!(w.is_list_visible());
}

// ============================================================================
// 4. Async debounced search
// ============================================================================

#[test]
fn async_burst_runs_one_pass_with_final_query() {
    let t0 = Instant::now();
    let (calls, sink) = recorder::<String>();
    let mut w = Autocomplete::builder(options(["xa", "xyz", "y"]))
        .search_mode(SearchMode::Async)
        .filter_options(move |opts, q| {
            sink.borrow_mut().push(q.to_owned());
            sift_widgets::default_filter(opts, q)
        })
        .build();

    press(&mut w, KeyCode::Char('x'), t0);
    press(&mut w, KeyCode::Char('y'), t0 + Duration::from_millis(200));
    assert!(calls.borrow().is_empty());

    assert!(!w.tick(t0 + Duration::from_millis(600)));
    assert_eq!(w.next_deadline(), Some(t0 + Duration::from_millis(700)));
    assert!(w.tick(t0 + Duration::from_millis(700)));

    assert_eq!(*calls.borrow(), vec!["xy"]);
    assert_eq!(w.filtered(), options(["xyz"]).as_slice());
    assert!(!w.tick(t0 + Duration::from_secs(5)));
}

#[test]
fn async_list_hidden_until_settled() {
    let t0 = Instant::now();
    let mut w = Autocomplete::builder(fruits())
        .search_mode(SearchMode::Async)
        .build();
    w.focus();
    assert!(!w.is_list_visible());
    assert!(!press(&mut w, KeyCode::Down, t0));

    type_text(&mut w, "b", t0);
    assert!(w.is_open());
    assert!(!w.is_list_visible());

    w.tick(t0 + Duration::from_millis(500));
    assert!(w.is_list_visible());
    assert!(press(&mut w, KeyCode::Down, t0));
}

#[test]
fn async_lookup_round_trip() {
    let t0 = Instant::now();
    let (lookups, sink) = recorder::<String>();
    let mut w = Autocomplete::builder(Vec::new())
        .search_mode(SearchMode::Async)
        .on_input_change(move |q| sink.borrow_mut().push(q.to_owned()))
        .build();
    w.focus();

    type_text(&mut w, "jur", t0);
    w.tick(t0 + Duration::from_millis(500));
    assert_eq!(*lookups.borrow(), vec!["jur"]);

    // Host answers the lookup.
    w.props_mut().loading = true;
    w.set_options([
        SelectOption::record("EW24", "Jurong East"),
        SelectOption::record("NS1", "Jurong East"),
        SelectOption::record("EW27", "Boon Lay"),
    ]);
    w.props_mut().loading = false;

    assert_eq!(w.filtered().len(), 2);
    assert_eq!(*lookups.borrow(), vec!["jur"]);

    press(&mut w, KeyCode::Down, t0);
    press(&mut w, KeyCode::Down, t0);
    press(&mut w, KeyCode::Enter, t0);
    assert_eq!(w.selection(), &[SelectOption::record("NS1", "Jurong East")]);
}

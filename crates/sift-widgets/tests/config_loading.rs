#![forbid(unsafe_code)]

//! Loading widget configuration and option sets from disk.
//!
//! Run:
//!   cargo test -p sift-widgets --features config-file --test config_loading

use std::io::Write;

use sift_widgets::{Autocomplete, AutocompleteConfig, ConfigError, SearchMode, SelectOption};
use tempfile::NamedTempFile;
use web_time::{Duration, Instant};

fn write_temp(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn toml_file_round_trips_into_widget() {
    let file = write_temp(
        r#"
search_mode = "async"
multiple = true
debounce_ms = 300
label = "Async Search"
description = "Searching of MRT Stations"
"#,
        ".toml",
    );

    let config = AutocompleteConfig::from_toml_file(file.path()).expect("valid config");
    assert_eq!(config.search_mode, SearchMode::Async);
    assert!(config.multiple);
    assert_eq!(config.debounce_ms, 300);
    assert_eq!(config.placeholder, "Type to search...");

    let t0 = Instant::now();
    let mut w = Autocomplete::builder([SelectOption::record("EW1", "Pasir Ris")])
        .config(config)
        .build();
    w.set_query("pa", t0);
    assert_eq!(w.next_deadline(), Some(t0 + Duration::from_millis(300)));
    assert_eq!(w.props().label.as_deref(), Some("Async Search"));
}

#[test]
fn empty_toml_yields_defaults() {
    let config = AutocompleteConfig::from_toml_str("").expect("defaults");
    assert_eq!(config, AutocompleteConfig::default());
}

#[test]
fn json_file_loads() {
    let file = write_temp(
        r#"{ "multiple": true, "placeholder": "Pick fruits", "disabled": true }"#,
        ".json",
    );
    let config = AutocompleteConfig::from_json_file(file.path()).expect("valid config");
    assert_eq!(config.search_mode, SearchMode::Sync);
    assert_eq!(config.placeholder, "Pick fruits");
    assert!(config.disabled);
}

#[test]
fn unknown_mode_is_a_parse_error() {
    let err = AutocompleteConfig::from_toml_str(r#"search_mode = "eventually""#).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn oversized_debounce_fails_validation() {
    let err = AutocompleteConfig::from_json_str(r#"{ "debounce_ms": 600000 }"#).unwrap_err();
    match err {
        ConfigError::Validation(errors) => assert_eq!(errors.len(), 1),
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = AutocompleteConfig::from_toml_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn option_sets_deserialize_from_mixed_json() {
    let opts: Vec<SelectOption> = serde_json::from_str(
        r#"["Apple", { "value": "EW1", "name": "Pasir Ris" }, "Banana"]"#,
    )
    .expect("valid options");
    assert_eq!(
        opts,
        vec![
            SelectOption::from("Apple"),
            SelectOption::record("EW1", "Pasir Ris"),
            SelectOption::from("Banana"),
        ]
    );
    assert_eq!(opts[1].display_text(), "Pasir Ris");

    let back = serde_json::to_string(&opts).expect("serialize");
    assert_eq!(back, r#"["Apple",{"value":"EW1","name":"Pasir Ris"},"Banana"]"#);
}

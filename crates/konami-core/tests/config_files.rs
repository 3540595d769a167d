#![forbid(unsafe_code)]

//! Loading `KonamiOptions` from TOML and JSON files.
//!
//! Built only with the `config` feature:
//! `cargo test -p konami-core --features config` (or `--all-features`).

use konami_core::{ConfigError, KonamiOptions};

#[test]
fn toml_fields_map_onto_options() {
    let opts = KonamiOptions::from_toml_str(
        r#"
        log_events = true
        activation_code = "iddqd"

        [[cheats]]
        code = "IDKFA"
        name = "all weapons"
        message = "Very Happy Ammo Added"
        message_timeout_ms = 5000
        "#,
    )
    .unwrap();

    assert_eq!(opts.log_events, Some(true));
    assert!(opts.show_messages.is_none());
    assert_eq!(opts.activation_code.as_deref(), Some("iddqd"));
    let cheat = &opts.cheats[0];
    assert_eq!(cheat.code(), "IDKFA");
    assert_eq!(cheat.name(), Some("all weapons"));
    assert_eq!(cheat.message(), Some("Very Happy Ammo Added"));
    assert_eq!(cheat.message_timeout().as_millis(), 5000);
}

#[test]
fn json_loads() {
    let opts = KonamiOptions::from_json_str(
        r#"{"show_messages": false, "cheats": [{"code": "abc", "message": "hi"}]}"#,
    )
    .unwrap();
    assert_eq!(opts.show_messages, Some(false));
    assert_eq!(opts.cheats.len(), 1);
}

#[test]
fn bad_toml_is_an_error() {
    let err = KonamiOptions::from_toml_str("log_events = \"nope").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn from_file_picks_format_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let json = dir.path().join("cheats.JSON");
    std::fs::write(&json, r#"{"log_events": true}"#).unwrap();
    assert_eq!(KonamiOptions::from_file(&json).unwrap().log_events, Some(true));

    let toml_path = dir.path().join("cheats.toml");
    std::fs::write(&toml_path, "show_messages = false\n").unwrap();
    assert_eq!(
        KonamiOptions::from_file(&toml_path).unwrap().show_messages,
        Some(false)
    );
}

#[test]
fn missing_file_is_io_error() {
    let err = KonamiOptions::from_file("/nonexistent/konami.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

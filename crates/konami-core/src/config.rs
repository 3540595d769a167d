#![forbid(unsafe_code)]

//! Service configuration.
//!
//! [`KonamiOptions`] carries everything [`CheatService::configure`] accepts.
//! Unset flags leave the service's current value alone; cheats are added one
//! by one on top of what is already registered.
//!
//! # Environment Variables
//!
//! | Variable | Type | Description |
//! |----------|------|-------------|
//! | `KONAMI_LOG_EVENTS` | bool | Log every fired cheat |
//! | `KONAMI_SHOW_MESSAGES` | bool | Present cheat messages |
//! | `KONAMI_IGNORE_FORM_ELEMENTS` | bool | Match even while a form field has focus |
//! | `KONAMI_ACTIVATION_CODE` | string | Code that enables the service |
//! | `KONAMI_DEACTIVATION_CODE` | string | Code that disables the service |
//!
//! Booleans accept `1`/`true`/`yes`/`on` and `0`/`false`/`no`/`off`.
//!
//! # Files
//!
//! With the `config` feature, options load from TOML or JSON. File cheats
//! must carry a message since callbacks cannot be written down:
//!
//! ```toml
//! log_events = true
//! activation_code = "iddqd"
//!
//! [[cheats]]
//! code = "idkfa"
//! name = "all weapons"
//! message = "Very Happy Ammo Added"
//! message_timeout_ms = 5000
//! ```
//!
//! [`CheatService::configure`]: crate::service::CheatService::configure

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::cheat::Cheat;

/// Options accepted by [`CheatService::configure`](crate::service::CheatService::configure).
#[derive(Debug, Clone, Default)]
pub struct KonamiOptions {
    /// Log every fired cheat.
    pub log_events: Option<bool>,

    /// Present cheat messages through the message dialog.
    pub show_messages: Option<bool>,

    /// Match keys even while a form-like element has focus.
    pub ignore_form_elements: Option<bool>,

    /// Code that enables the service. Setting it starts the service disabled.
    pub activation_code: Option<String>,

    /// Code that disables the service.
    pub deactivation_code: Option<String>,

    /// Cheats to register.
    pub cheats: Vec<Cheat>,
}

impl KonamiOptions {
    /// Empty options; configuring with them changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log flag.
    #[must_use]
    pub fn with_log_events(mut self, on: bool) -> Self {
        self.log_events = Some(on);
        self
    }

    /// Set the message flag.
    #[must_use]
    pub fn with_show_messages(mut self, on: bool) -> Self {
        self.show_messages = Some(on);
        self
    }

    /// Set the form-focus flag.
    #[must_use]
    pub fn with_ignore_form_elements(mut self, on: bool) -> Self {
        self.ignore_form_elements = Some(on);
        self
    }

    /// Set the activation code.
    #[must_use]
    pub fn with_activation_code(mut self, code: impl Into<String>) -> Self {
        self.activation_code = Some(code.into());
        self
    }

    /// Set the deactivation code.
    #[must_use]
    pub fn with_deactivation_code(mut self, code: impl Into<String>) -> Self {
        self.deactivation_code = Some(code.into());
        self
    }

    /// Add a cheat.
    #[must_use]
    pub fn with_cheat(mut self, cheat: Cheat) -> Self {
        self.cheats.push(cheat);
        self
    }

    /// Load options from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load options through an arbitrary variable lookup.
    ///
    /// Unparseable booleans and empty codes are skipped.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |name: &str| lookup(name).as_deref().and_then(parse_bool);
        let code = |name: &str| lookup(name).filter(|v| !v.is_empty());

        Self {
            log_events: flag("KONAMI_LOG_EVENTS"),
            show_messages: flag("KONAMI_SHOW_MESSAGES"),
            ignore_form_elements: flag("KONAMI_IGNORE_FORM_ELEMENTS"),
            activation_code: code("KONAMI_ACTIVATION_CODE"),
            deactivation_code: code("KONAMI_DEACTIVATION_CODE"),
            cheats: Vec::new(),
        }
    }

    /// Overlay `other` on top of `self`: set fields win, cheats append.
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.log_events = other.log_events.or(self.log_events);
        self.show_messages = other.show_messages.or(self.show_messages);
        self.ignore_form_elements = other.ignore_form_elements.or(self.ignore_form_elements);
        self.activation_code = other.activation_code.or(self.activation_code);
        self.deactivation_code = other.deactivation_code.or(self.deactivation_code);
        self.cheats.extend(other.cheats);
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

/// On-disk form of [`KonamiOptions`].
#[cfg(feature = "config")]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsFile {
    /// See [`KonamiOptions::log_events`].
    pub log_events: Option<bool>,
    /// See [`KonamiOptions::show_messages`].
    pub show_messages: Option<bool>,
    /// See [`KonamiOptions::ignore_form_elements`].
    pub ignore_form_elements: Option<bool>,
    /// See [`KonamiOptions::activation_code`].
    pub activation_code: Option<String>,
    /// See [`KonamiOptions::deactivation_code`].
    pub deactivation_code: Option<String>,
    /// Message-only cheats.
    pub cheats: Vec<CheatEntry>,
}

/// A message cheat as written in a config file.
#[cfg(feature = "config")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheatEntry {
    /// Code to type.
    pub code: String,
    /// Optional log label.
    #[serde(default)]
    pub name: Option<String>,
    /// Message shown when the cheat fires.
    pub message: String,
    /// Display duration in milliseconds.
    #[serde(default)]
    pub message_timeout_ms: Option<u64>,
}

#[cfg(feature = "config")]
impl From<CheatEntry> for Cheat {
    fn from(entry: CheatEntry) -> Self {
        let mut cheat = Cheat::new(entry.code).with_message(entry.message);
        if let Some(name) = entry.name {
            cheat = cheat.with_name(name);
        }
        if let Some(ms) = entry.message_timeout_ms {
            cheat = cheat.with_message_timeout(web_time::Duration::from_millis(ms));
        }
        cheat
    }
}

#[cfg(feature = "config")]
impl From<OptionsFile> for KonamiOptions {
    fn from(file: OptionsFile) -> Self {
        Self {
            log_events: file.log_events,
            show_messages: file.show_messages,
            ignore_form_elements: file.ignore_form_elements,
            activation_code: file.activation_code,
            deactivation_code: file.deactivation_code,
            cheats: file.cheats.into_iter().map(Cheat::from).collect(),
        }
    }
}

#[cfg(feature = "config")]
impl KonamiOptions {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: OptionsFile = toml::from_str(s)?;
        Ok(file.into())
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let file: OptionsFile = serde_json::from_str(s)?;
        Ok(file.into())
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from a file, picking the format by extension (`.json` or TOML).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::from_json_file(path),
            _ => Self::from_toml_file(path),
        }
    }
}

/// Errors that can occur when loading options from a file.
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parse error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// JSON parse error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn default_sets_nothing() {
        let opts = KonamiOptions::default();
        assert!(opts.log_events.is_none());
        assert!(opts.show_messages.is_none());
        assert!(opts.ignore_form_elements.is_none());
        assert!(opts.activation_code.is_none());
        assert!(opts.cheats.is_empty());
    }

    #[test]
    fn builder_chain() {
        let opts = KonamiOptions::new()
            .with_log_events(true)
            .with_show_messages(false)
            .with_ignore_form_elements(true)
            .with_activation_code("on")
            .with_deactivation_code("off")
            .with_cheat(Cheat::new("x").with_message("m"));

        assert_eq!(opts.log_events, Some(true));
        assert_eq!(opts.show_messages, Some(false));
        assert_eq!(opts.ignore_form_elements, Some(true));
        assert_eq!(opts.activation_code.as_deref(), Some("on"));
        assert_eq!(opts.deactivation_code.as_deref(), Some("off"));
        assert_eq!(opts.cheats.len(), 1);
    }

    #[test]
    fn lookup_reads_all_variables() {
        let opts = KonamiOptions::from_lookup(lookup(&[
            ("KONAMI_LOG_EVENTS", "1"),
            ("KONAMI_SHOW_MESSAGES", "false"),
            ("KONAMI_IGNORE_FORM_ELEMENTS", "Yes"),
            ("KONAMI_ACTIVATION_CODE", "IDDQD"),
            ("KONAMI_DEACTIVATION_CODE", "idkfa"),
        ]));

        assert_eq!(opts.log_events, Some(true));
        assert_eq!(opts.show_messages, Some(false));
        assert_eq!(opts.ignore_form_elements, Some(true));
        assert_eq!(opts.activation_code.as_deref(), Some("IDDQD"));
        assert_eq!(opts.deactivation_code.as_deref(), Some("idkfa"));
    }

    #[test]
    fn lookup_skips_bad_values() {
        let opts = KonamiOptions::from_lookup(lookup(&[
            ("KONAMI_LOG_EVENTS", "maybe"),
            ("KONAMI_ACTIVATION_CODE", ""),
        ]));
        assert!(opts.log_events.is_none());
        assert!(opts.activation_code.is_none());
    }

    #[test]
    fn merged_prefers_later_values() {
        let base = KonamiOptions::new()
            .with_log_events(false)
            .with_show_messages(true)
            .with_cheat(Cheat::new("a").with_message("m"));
        let over = KonamiOptions::new()
            .with_log_events(true)
            .with_cheat(Cheat::new("b").with_message("m"));

        let opts = base.merged(over);
        assert_eq!(opts.log_events, Some(true));
        assert_eq!(opts.show_messages, Some(true));
        let codes: Vec<_> = opts.cheats.iter().map(Cheat::code).collect();
        assert_eq!(codes, ["a", "b"]);
    }

    #[test]
    fn parse_bool_forms() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" on "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("Off"), Some(false));
        assert_eq!(parse_bool(""), None);
    }
}

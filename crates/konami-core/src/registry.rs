#![forbid(unsafe_code)]

//! Cheat registry: normalized code → [`Cheat`], plus the derived code list
//! the matcher scans, plus the two special code designations.
//!
//! # Invariants
//!
//! - Every key in the map is lowercase and equals the stored cheat's code.
//! - The derived code list holds exactly the map's keys (sorted), refreshed
//!   on every mutation.
//! - The activation and deactivation codes cannot be registered through
//!   [`CheatRegistry::add`]; they are backed by built-in entries.

use ahash::AHashMap;

use crate::cheat::{Cheat, CheatError};
use crate::event::CheatEventKind;

/// Read-only view of registered codes used by the matcher.
pub trait CodeIndex {
    /// The registered code equal to `input`, if any.
    fn exact(&self, input: &str) -> Option<&str>;

    /// Whether some registered code starts with `input`.
    fn has_prefix(&self, input: &str) -> bool;
}

impl CodeIndex for [String] {
    fn exact(&self, input: &str) -> Option<&str> {
        self.iter().map(String::as_str).find(|code| *code == input)
    }

    fn has_prefix(&self, input: &str) -> bool {
        self.iter().any(|code| code.starts_with(input))
    }
}

impl CodeIndex for [&str] {
    fn exact(&self, input: &str) -> Option<&str> {
        self.iter().copied().find(|code| *code == input)
    }

    fn has_prefix(&self, input: &str) -> bool {
        self.iter().any(|code| code.starts_with(input))
    }
}

/// All registered cheats.
#[derive(Debug, Default)]
pub struct CheatRegistry {
    cheats: AHashMap<String, Cheat>,
    codes: Vec<String>,
    activation_code: Option<String>,
    deactivation_code: Option<String>,
}

impl CheatRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cheat, replacing any cheat with the same code.
    pub fn add(&mut self, cheat: Cheat) -> Result<(), CheatError> {
        if cheat.code().is_empty() {
            return Err(CheatError::EmptyCode);
        }
        let cheat = cheat.into_normalized();
        if self.is_special(cheat.code()) {
            return Err(CheatError::ReservedCode(cheat.code().to_owned()));
        }
        cheat.validate()?;

        tracing::debug!(
            target: "konami.registry",
            code = cheat.code(),
            action = cheat.has_action(),
            message = cheat.has_message(),
            "cheat registered"
        );
        self.cheats.insert(cheat.code().to_owned(), cheat);
        self.refresh_codes();
        Ok(())
    }

    /// Remove the cheat registered under `code`.
    ///
    /// Returns whether an entry was present. Removing an unknown code is not
    /// an error.
    pub fn remove(&mut self, code: &str) -> Result<bool, CheatError> {
        if code.is_empty() {
            return Err(CheatError::EmptyCode);
        }
        let removed = self.cheats.remove(&code.to_lowercase()).is_some();
        self.refresh_codes();
        Ok(removed)
    }

    /// Remove every cheat, built-in entries included.
    ///
    /// Special code designations are kept, so those codes stay reserved.
    pub fn clear(&mut self) {
        self.cheats.clear();
        self.refresh_codes();
    }

    /// Look up a cheat by code (case-insensitive).
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Cheat> {
        if code.is_empty() {
            return None;
        }
        self.cheats.get(&code.to_lowercase())
    }

    /// All registered codes, sorted.
    #[must_use]
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Number of registered cheats (built-in entries included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cheats.len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cheats.is_empty()
    }

    /// Designate the activation code and register its built-in entry.
    ///
    /// A previously designated activation code loses its built-in entry
    /// unless it is still the deactivation code.
    pub fn designate_activation(&mut self, code: &str) {
        let code = code.to_lowercase();
        let previous = self.activation_code.replace(code.clone());
        self.retire(previous, &code, self.deactivation_code.clone());
        self.cheats.insert(code.clone(), Cheat::builtin(&code));
        self.refresh_codes();
    }

    /// Designate the deactivation code and register its built-in entry.
    ///
    /// A previously designated deactivation code loses its built-in entry
    /// unless it is still the activation code.
    pub fn designate_deactivation(&mut self, code: &str) {
        let code = code.to_lowercase();
        let previous = self.deactivation_code.replace(code.clone());
        self.retire(previous, &code, self.activation_code.clone());
        self.cheats.insert(code.clone(), Cheat::builtin(&code));
        self.refresh_codes();
    }

    /// The designated activation code.
    #[must_use]
    pub fn activation_code(&self) -> Option<&str> {
        self.activation_code.as_deref()
    }

    /// The designated deactivation code.
    #[must_use]
    pub fn deactivation_code(&self) -> Option<&str> {
        self.deactivation_code.as_deref()
    }

    /// Whether `code` is the activation or deactivation code.
    #[must_use]
    pub fn is_special(&self, code: &str) -> bool {
        self.kind_of(code).is_special()
    }

    /// Event kind a match on `code` produces.
    ///
    /// Activation wins when both designations name the same code.
    #[must_use]
    pub fn kind_of(&self, code: &str) -> CheatEventKind {
        let code = code.to_lowercase();
        if self.activation_code.as_deref() == Some(code.as_str()) {
            CheatEventKind::Activation
        } else if self.deactivation_code.as_deref() == Some(code.as_str()) {
            CheatEventKind::Deactivation
        } else {
            CheatEventKind::CheatTriggered
        }
    }

    fn retire(&mut self, previous: Option<String>, current: &str, other: Option<String>) {
        if let Some(previous) = previous
            && previous != current
            && other.as_deref() != Some(previous.as_str())
        {
            self.cheats.remove(&previous);
        }
    }

    fn refresh_codes(&mut self) {
        self.codes = self.cheats.keys().cloned().collect();
        self.codes.sort_unstable();
    }
}

impl CodeIndex for CheatRegistry {
    fn exact(&self, input: &str) -> Option<&str> {
        self.codes.exact(input)
    }

    fn has_prefix(&self, input: &str) -> bool {
        self.codes.has_prefix(input)
    }
}

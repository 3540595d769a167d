#![forbid(unsafe_code)]

//! Rolling-buffer matcher for typed cheat codes.
//!
//! The [`SequenceMatcher`] turns a stream of key names into
//! [`MatchOutcome`]s. It holds the characters typed in the current attempt
//! and decides, per key, between an exact match, a partial match, or a dead
//! sequence.
//!
//! # State Machine
//!
//! ```text
//!            append key
//!  buffer ─────────────▶ exact code? ──yes──▶ Exact(code), buffer = ""
//!                            │ no
//!                            ▼
//!                     prefix of a code? ──yes──▶ Partial, buffer kept
//!                            │ no
//!                            ▼
//!                  buffer == key alone? ──yes──▶ NoMatch, buffer = ""
//!                            │ no
//!                            ▼
//!               buffer = key, check again once (exact / partial / NoMatch)
//! ```
//!
//! The retry runs at most once per key. A key that breaks a long partial
//! sequence can still start a new one, but the matcher never searches for
//! longer suffixes of what was typed.
//!
//! # Example
//!
//! ```
//! use konami_core::matcher::{MatchOutcome, SequenceMatcher};
//!
//! let codes: &[&str] = &["hello"];
//! let mut matcher = SequenceMatcher::new();
//!
//! for key in ["H", "e", "l", "l"] {
//!     assert_eq!(matcher.feed(key, codes), MatchOutcome::Partial);
//! }
//! assert_eq!(matcher.feed("o", codes), MatchOutcome::Exact("hello".into()));
//! assert_eq!(matcher.buffer(), "");
//! ```

use crate::registry::CodeIndex;

/// Result of feeding one key to the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The key was empty and left the buffer untouched.
    Ignored,
    /// Nothing matches; the buffer is empty.
    NoMatch,
    /// The buffer is a prefix of at least one code and was kept.
    Partial,
    /// The buffer equals this code; the buffer was cleared.
    Exact(String),
}

impl MatchOutcome {
    /// The matched code, for [`MatchOutcome::Exact`].
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Exact(code) => Some(code),
            _ => None,
        }
    }
}

/// Stateful matcher over a rolling input buffer.
#[derive(Debug, Clone, Default)]
pub struct SequenceMatcher {
    buffer: String,
}

impl SequenceMatcher {
    /// Create a matcher with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key name and resolve it against `codes`.
    ///
    /// The key is lowercased before it is appended. Codes in `codes` are
    /// expected to be lowercase already.
    pub fn feed<C>(&mut self, key: &str, codes: &C) -> MatchOutcome
    where
        C: CodeIndex + ?Sized,
    {
        if key.is_empty() {
            return MatchOutcome::Ignored;
        }
        let key = key.to_lowercase();

        self.buffer.push_str(&key);
        if let Some(outcome) = self.resolve(codes) {
            return outcome;
        }

        let fresh_attempt = self.buffer == key;
        self.buffer.clear();
        if fresh_attempt {
            return MatchOutcome::NoMatch;
        }

        // One retry from the key alone.
        self.buffer.push_str(&key);
        self.resolve(codes).unwrap_or_else(|| {
            self.buffer.clear();
            MatchOutcome::NoMatch
        })
    }

    /// The characters typed in the current attempt.
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Drop the current attempt.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    fn resolve<C>(&mut self, codes: &C) -> Option<MatchOutcome>
    where
        C: CodeIndex + ?Sized,
    {
        if let Some(code) = codes.exact(&self.buffer) {
            let code = code.to_owned();
            self.buffer.clear();
            return Some(MatchOutcome::Exact(code));
        }
        if codes.has_prefix(&self.buffer) {
            return Some(MatchOutcome::Partial);
        }
        None
    }
}

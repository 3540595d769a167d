#![forbid(unsafe_code)]

//! Cheat definitions.
//!
//! A [`Cheat`] binds a code (the key names a user types in sequence) to a
//! behavior: an action callback, a message shown to the user, or both.
//!
//! ```
//! use konami_core::cheat::Cheat;
//! use std::time::Duration;
//!
//! let cheat = Cheat::new("IDDQD")
//!     .with_name("god mode")
//!     .with_message("Degreelessness mode on")
//!     .with_message_timeout(Duration::from_secs(5))
//!     .with_action(|cheat| println!("{} fired", cheat.code()));
//! assert!(cheat.has_action());
//! ```

use std::fmt;
use std::sync::Arc;

use web_time::Duration;

/// Default time a cheat message stays on screen.
pub const DEFAULT_MESSAGE_TIMEOUT_MS: u64 = 3000;

/// Callback run when a cheat fires. It receives the triggered cheat.
///
/// Panics raised by the callback are not caught; they unwind through the
/// keystroke call that matched the cheat.
pub type CheatAction = Arc<dyn Fn(&Cheat) + Send + Sync>;

/// Reasons a cheat cannot be registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheatError {
    /// The code is empty.
    #[error("cheat code must not be empty")]
    EmptyCode,
    /// The code is the designated activation or deactivation code.
    #[error("cheat code `{0}` is reserved for activation/deactivation")]
    ReservedCode(String),
    /// Neither an action nor a message was given.
    #[error("cheat `{0}` needs an action or a message")]
    MissingBehavior(String),
}

/// A registered (code → behavior) binding.
#[derive(Clone)]
pub struct Cheat {
    code: String,
    name: Option<String>,
    action: Option<CheatAction>,
    message: Option<String>,
    message_timeout: Option<Duration>,
}

impl Cheat {
    /// Create a cheat for `code`. The code is lowercased when registered.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: None,
            action: None,
            message: None,
            message_timeout: None,
        }
    }

    /// Label used in log lines instead of the code.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Callback run when the cheat fires.
    #[must_use]
    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Cheat) + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Use an already shared callback.
    #[must_use]
    pub fn with_shared_action(mut self, action: CheatAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Message shown to the user when the cheat fires.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// How long the message stays visible.
    #[must_use]
    pub fn with_message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = Some(timeout);
        self
    }

    /// The cheat code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Optional display name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Upper-cased name, or the upper-cased code when no name is set.
    #[must_use]
    pub fn label(&self) -> String {
        self.name.as_deref().unwrap_or(&self.code).to_uppercase()
    }

    /// The message, if any (may be blank).
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether there is a message with visible content.
    #[must_use]
    pub fn has_message(&self) -> bool {
        self.message.as_deref().is_some_and(|m| !m.trim().is_empty())
    }

    /// Effective display duration. Unset or zero falls back to the default.
    #[must_use]
    pub fn message_timeout(&self) -> Duration {
        self.message_timeout
            .filter(|t| !t.is_zero())
            .unwrap_or(Duration::from_millis(DEFAULT_MESSAGE_TIMEOUT_MS))
    }

    /// Whether an action callback is attached.
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    /// Run the action callback, if any.
    pub fn run_action(&self) {
        if let Some(action) = &self.action {
            action(self);
        }
    }

    /// Behavior-less entry backing an activation or deactivation code.
    pub(crate) fn builtin(code: &str) -> Self {
        Self::new(code.to_lowercase())
    }

    pub(crate) fn validate(&self) -> Result<(), CheatError> {
        if self.code.is_empty() {
            return Err(CheatError::EmptyCode);
        }
        if self.action.is_none() && self.message.is_none() {
            return Err(CheatError::MissingBehavior(self.code.clone()));
        }
        Ok(())
    }

    pub(crate) fn into_normalized(mut self) -> Self {
        self.code = self.code.to_lowercase();
        self
    }
}

impl fmt::Debug for Cheat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cheat")
            .field("code", &self.code)
            .field("name", &self.name)
            .field("action", &self.action.is_some())
            .field("message", &self.message)
            .field("message_timeout", &self.message_timeout)
            .finish()
    }
}

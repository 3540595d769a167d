#![forbid(unsafe_code)]

//! The cheat-code service.
//!
//! [`CheatService`] owns the registry, the sequence matcher, the enabled
//! gate, the event bus and the message dialog. The host constructs one at
//! startup and feeds it every key press; the service decides whether a cheat
//! fires and reports what happened.
//!
//! # Trigger order
//!
//! When a code matches and the service is enabled (or the code is special):
//!
//! 1. the activation/deactivation default action flips the enabled flag,
//! 2. the cheat's own action runs,
//! 3. a [`CheatEvent`] goes to every subscriber,
//! 4. the trigger is logged when `log_events` is on,
//! 5. the message is handed to the dialog when `show_messages` is on.
//!
//! Action and listener panics unwind through the key call unchanged.
//!
//! # Example
//!
//! ```
//! use konami_core::{Cheat, CheatEventKind, CheatService, FeedOutcome, KonamiOptions};
//!
//! let mut service = CheatService::new();
//! service.configure(
//!     KonamiOptions::new()
//!         .with_activation_code("on")
//!         .with_cheat(Cheat::new("HELLO").with_message("Hi!")),
//! );
//! let events = service.subscribe_channel();
//!
//! // Disabled until the activation code is typed.
//! for key in ["h", "e", "l", "l", "o"] {
//!     service.on_key(key, false);
//! }
//! assert!(events.try_recv().is_err());
//!
//! service.on_key("o", false);
//! assert_eq!(
//!     service.on_key("n", false),
//!     FeedOutcome::Triggered(CheatEventKind::Activation)
//! );
//! for key in ["h", "e", "l", "l", "o"] {
//!     service.on_key(key, false);
//! }
//! assert_eq!(events.try_iter().count(), 2);
//! ```

use std::sync::mpsc;

use web_time::Instant;

use crate::cheat::{Cheat, CheatError};
use crate::config::KonamiOptions;
use crate::event::{CheatEvent, CheatEventKind, EventBus, ListenerId};
use crate::focus::FocusKind;
use crate::key::{KeyCode, KeyEvent};
use crate::matcher::{MatchOutcome, SequenceMatcher};
use crate::message::{DialogAction, Message, MessageDialog};
use crate::registry::CheatRegistry;

/// What a key press led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// The key was not considered (form focus, non-press, empty key).
    Ignored,
    /// Nothing matched; the buffer is empty.
    NoMatch,
    /// The typed keys are a prefix of some code.
    Partial,
    /// A cheat matched but the service is disabled.
    Suppressed,
    /// A cheat matched and fired.
    Triggered(CheatEventKind),
}

impl FeedOutcome {
    /// Whether a cheat fired.
    #[must_use]
    pub const fn fired(self) -> bool {
        matches!(self, Self::Triggered(_))
    }
}

/// Keyboard cheat-code service.
#[derive(Debug)]
pub struct CheatService {
    registry: CheatRegistry,
    matcher: SequenceMatcher,
    bus: EventBus,
    dialog: MessageDialog,
    pending_actions: Vec<DialogAction>,
    enabled: bool,
    log_events: bool,
    show_messages: bool,
    ignore_form_elements: bool,
}

impl Default for CheatService {
    fn default() -> Self {
        Self::new()
    }
}

impl CheatService {
    /// Create an enabled service with no cheats.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: CheatRegistry::new(),
            matcher: SequenceMatcher::new(),
            bus: EventBus::new(),
            dialog: MessageDialog::new(),
            pending_actions: Vec::new(),
            enabled: true,
            log_events: false,
            show_messages: true,
            ignore_form_elements: false,
        }
    }

    /// Create a service and apply `options`.
    #[must_use]
    pub fn with_options(options: KonamiOptions) -> Self {
        let mut service = Self::new();
        service.configure(options);
        service
    }

    /// Use a custom message dialog (e.g. a different show delay).
    #[must_use]
    pub fn with_dialog(mut self, dialog: MessageDialog) -> Self {
        self.dialog = dialog;
        self
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Apply options on top of the current configuration.
    ///
    /// Unset flags keep their value. Cheats are added individually; the ones
    /// that cannot be registered are returned (and logged) while the rest
    /// still register.
    pub fn configure(&mut self, options: KonamiOptions) -> Vec<CheatError> {
        let KonamiOptions {
            log_events,
            show_messages,
            ignore_form_elements,
            activation_code,
            deactivation_code,
            cheats,
        } = options;

        if let Some(on) = log_events {
            self.log_events = on;
        }
        if let Some(on) = show_messages {
            self.show_messages = on;
        }
        if let Some(on) = ignore_form_elements {
            self.ignore_form_elements = on;
        }

        if let Some(code) = activation_code.filter(|c| !c.is_empty()) {
            self.enabled = false;
            self.registry.designate_activation(&code);
        }
        if let Some(code) = deactivation_code.filter(|c| !c.is_empty()) {
            self.registry.designate_deactivation(&code);
        }

        let mut rejected = Vec::new();
        for cheat in cheats {
            if let Err(err) = self.add_cheat(cheat) {
                tracing::warn!(target: "konami.service", error = %err, "cheat rejected");
                rejected.push(err);
            }
        }

        tracing::debug!(
            target: "konami.service",
            enabled = self.enabled,
            log_events = self.log_events,
            show_messages = self.show_messages,
            ignore_form_elements = self.ignore_form_elements,
            cheats = self.registry.len(),
            rejected = rejected.len(),
            "service configured"
        );
        rejected
    }

    /// Enable regular cheats. Returns the new state.
    pub fn enable(&mut self) -> bool {
        self.enabled = true;
        self.enabled
    }

    /// Disable regular cheats. Returns the new state.
    pub fn disable(&mut self) -> bool {
        self.enabled = false;
        self.enabled
    }

    /// Whether regular cheats fire.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether fired cheats are logged.
    #[must_use]
    pub fn log_events(&self) -> bool {
        self.log_events
    }

    /// Set whether fired cheats are logged.
    pub fn set_log_events(&mut self, on: bool) {
        self.log_events = on;
    }

    /// Whether cheat messages are presented.
    #[must_use]
    pub fn show_messages(&self) -> bool {
        self.show_messages
    }

    /// Set whether cheat messages are presented.
    pub fn set_show_messages(&mut self, on: bool) {
        self.show_messages = on;
    }

    /// Whether keys are matched even while a form element has focus.
    #[must_use]
    pub fn ignore_form_elements(&self) -> bool {
        self.ignore_form_elements
    }

    /// Set whether keys are matched while a form element has focus.
    pub fn set_ignore_form_elements(&mut self, on: bool) {
        self.ignore_form_elements = on;
    }

    /// The designated activation code.
    #[must_use]
    pub fn activation_code(&self) -> Option<&str> {
        self.registry.activation_code()
    }

    /// The designated deactivation code.
    #[must_use]
    pub fn deactivation_code(&self) -> Option<&str> {
        self.registry.deactivation_code()
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a cheat, replacing any cheat with the same code.
    pub fn add_cheat(&mut self, cheat: Cheat) -> Result<(), CheatError> {
        self.registry.add(cheat)
    }

    /// Remove a cheat. Returns whether it was registered.
    pub fn remove_cheat(&mut self, code: &str) -> Result<bool, CheatError> {
        self.registry.remove(code)
    }

    /// Remove every cheat.
    pub fn clear_cheats(&mut self) {
        self.registry.clear();
    }

    /// Look up a cheat by code (case-insensitive).
    #[must_use]
    pub fn cheat(&self, code: &str) -> Option<&Cheat> {
        self.registry.get(code)
    }

    /// The underlying registry.
    #[must_use]
    pub fn registry(&self) -> &CheatRegistry {
        &self.registry
    }

    // -----------------------------------------------------------------------
    // Events
    // -----------------------------------------------------------------------

    /// Add an event listener.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&CheatEvent) + Send + 'static,
    {
        self.bus.subscribe(listener)
    }

    /// Receive events through a channel.
    pub fn subscribe_channel(&mut self) -> mpsc::Receiver<CheatEvent> {
        self.bus.subscribe_channel()
    }

    /// Remove an event listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.bus.unsubscribe(id)
    }

    // -----------------------------------------------------------------------
    // Key input
    // -----------------------------------------------------------------------

    /// Feed a raw key name, using the current time.
    pub fn on_key(&mut self, raw_key: &str, form_focused: bool) -> FeedOutcome {
        self.on_key_at(raw_key, form_focused, Instant::now())
    }

    /// Feed a raw key name at `now`.
    pub fn on_key_at(&mut self, raw_key: &str, form_focused: bool, now: Instant) -> FeedOutcome {
        if form_focused && !self.ignore_form_elements {
            return FeedOutcome::Ignored;
        }

        match self.matcher.feed(raw_key, &self.registry) {
            MatchOutcome::Ignored => FeedOutcome::Ignored,
            MatchOutcome::NoMatch => FeedOutcome::NoMatch,
            MatchOutcome::Partial => FeedOutcome::Partial,
            MatchOutcome::Exact(code) => self.trigger(&code, now),
        }
    }

    /// Feed a structured key event.
    ///
    /// Only presses are matched. Escape also closes a visible message.
    pub fn feed(&mut self, event: &KeyEvent, focus: FocusKind, now: Instant) -> FeedOutcome {
        if !event.is_press() {
            return FeedOutcome::Ignored;
        }
        if event.code == KeyCode::Escape {
            self.dismiss_message();
        }
        self.on_key_at(&event.key_name(), focus.is_form_like(), now)
    }

    /// Characters typed in the current attempt.
    #[must_use]
    pub fn buffer(&self) -> &str {
        self.matcher.buffer()
    }

    /// Drop the current attempt.
    pub fn reset_buffer(&mut self) {
        self.matcher.reset();
    }

    // -----------------------------------------------------------------------
    // Messages
    // -----------------------------------------------------------------------

    /// Advance message timers and collect what the host should render.
    pub fn tick(&mut self, now: Instant) -> Vec<DialogAction> {
        let mut actions = std::mem::take(&mut self.pending_actions);
        actions.extend(self.dialog.tick(now));
        actions
    }

    /// Close the visible message, if any.
    pub fn dismiss_message(&mut self) {
        if let Some(action) = self.dialog.dismiss() {
            self.pending_actions.push(action);
        }
    }

    /// The message on screen, if any.
    #[must_use]
    pub fn visible_message(&self) -> Option<&Message> {
        self.dialog.visible()
    }

    /// The message dialog.
    #[must_use]
    pub fn dialog(&self) -> &MessageDialog {
        &self.dialog
    }

    // -----------------------------------------------------------------------
    // Trigger
    // -----------------------------------------------------------------------

    fn trigger(&mut self, code: &str, now: Instant) -> FeedOutcome {
        let Some(cheat) = self.registry.get(code).cloned() else {
            return FeedOutcome::NoMatch;
        };
        let kind = self.registry.kind_of(code);

        if !self.enabled && !kind.is_special() {
            tracing::debug!(target: "konami.service", code, "cheat suppressed while disabled");
            return FeedOutcome::Suppressed;
        }

        match kind {
            CheatEventKind::Activation => self.enabled = true,
            CheatEventKind::Deactivation => self.enabled = false,
            CheatEventKind::CheatTriggered => {}
        }
        cheat.run_action();

        let event = CheatEvent { kind, cheat };
        self.bus.emit(&event);
        self.after_trigger(&event, now);

        FeedOutcome::Triggered(kind)
    }

    fn after_trigger(&mut self, event: &CheatEvent, now: Instant) {
        if self.log_events {
            tracing::info!(
                target: "konami.service",
                code = event.cheat.code(),
                kind = %event.kind,
                "[Konami Cheat Triggered]: {}",
                event.cheat.label()
            );
        }

        if self.show_messages
            && let Some(message) = Message::from_cheat(&event.cheat)
            && let Some(hidden) = self.dialog.present(message, now)
        {
            self.pending_actions.push(hidden);
        }
    }
}

#![forbid(unsafe_code)]

//! Message dialog timing for fired cheats.
//!
//! The dialog shows one message at a time. [`MessageDialog::present`] hides
//! whatever is on screen, then schedules the new message after a short show
//! delay; the message auto-dismisses once its timeout elapses. A second
//! `present` replaces the pending deadline, so at most one dismissal is ever
//! scheduled.
//!
//! Time is supplied by the host through [`MessageDialog::tick`], which
//! returns the [`DialogAction`]s to render. Drawing the dialog is the host's
//! job.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use konami_core::message::{DialogAction, Message, MessageDialog};
//!
//! let mut dialog = MessageDialog::new();
//! let t0 = Instant::now();
//!
//! dialog.present(Message::new("god", "God mode", Duration::from_secs(3)), t0);
//! let actions = dialog.tick(t0 + Duration::from_millis(200));
//! assert!(matches!(actions.as_slice(), [DialogAction::Show(_)]));
//!
//! let actions = dialog.tick(t0 + Duration::from_millis(3200));
//! assert!(matches!(actions.as_slice(), [DialogAction::Hide(_)]));
//! ```

use web_time::{Duration, Instant};

use crate::cheat::Cheat;

/// Delay between a present request and the message appearing.
pub const DEFAULT_SHOW_DELAY_MS: u64 = 200;

/// A message to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Code of the cheat that produced the message.
    pub code: String,
    /// Text or markup to show.
    pub text: String,
    /// How long the message stays visible.
    pub timeout: Duration,
}

impl Message {
    /// Create a message.
    #[must_use]
    pub fn new(code: impl Into<String>, text: impl Into<String>, timeout: Duration) -> Self {
        Self {
            code: code.into(),
            text: text.into(),
            timeout,
        }
    }

    /// Message for a cheat, if it has visible text.
    #[must_use]
    pub fn from_cheat(cheat: &Cheat) -> Option<Self> {
        if !cheat.has_message() {
            return None;
        }
        let text = cheat.message()?;
        Some(Self::new(cheat.code(), text, cheat.message_timeout()))
    }
}

/// What the host should do with the dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    /// Put this message on screen.
    Show(Message),
    /// Take this message off screen.
    Hide(Message),
}

#[derive(Debug, Clone)]
enum DialogState {
    Hidden,
    // `None` deadlines lie beyond what `Instant` can represent.
    Scheduled {
        message: Message,
        show_at: Option<Instant>,
    },
    Visible {
        message: Message,
        hide_at: Option<Instant>,
    },
}

/// Single-slot message dialog with delayed show and auto-dismiss.
#[derive(Debug, Clone)]
pub struct MessageDialog {
    state: DialogState,
    show_delay: Duration,
}

impl Default for MessageDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageDialog {
    /// Create a hidden dialog with the default show delay.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: DialogState::Hidden,
            show_delay: Duration::from_millis(DEFAULT_SHOW_DELAY_MS),
        }
    }

    /// Use a custom show delay.
    #[must_use]
    pub fn with_show_delay(mut self, delay: Duration) -> Self {
        self.show_delay = delay;
        self
    }

    /// Request `message` to be shown.
    ///
    /// A visible message is hidden at once (returned as
    /// [`DialogAction::Hide`]); a scheduled one is replaced.
    pub fn present(&mut self, message: Message, now: Instant) -> Option<DialogAction> {
        let hidden = self.take_visible();
        self.state = DialogState::Scheduled {
            message,
            show_at: now.checked_add(self.show_delay),
        };
        hidden
    }

    /// Close the dialog now, cancelling any scheduled message.
    pub fn dismiss(&mut self) -> Option<DialogAction> {
        let hidden = self.take_visible();
        self.state = DialogState::Hidden;
        hidden
    }

    /// Advance to `now`, returning the transitions that happened.
    pub fn tick(&mut self, now: Instant) -> Vec<DialogAction> {
        let mut actions = Vec::new();

        if let DialogState::Scheduled {
            message,
            show_at: Some(show_at),
        } = &self.state
            && now >= *show_at
        {
            let hide_at = show_at.checked_add(message.timeout);
            let message = message.clone();
            actions.push(DialogAction::Show(message.clone()));
            self.state = DialogState::Visible { message, hide_at };
        }

        if let DialogState::Visible {
            message,
            hide_at: Some(hide_at),
        } = &self.state
            && now >= *hide_at
        {
            actions.push(DialogAction::Hide(message.clone()));
            self.state = DialogState::Hidden;
        }

        actions
    }

    /// The message on screen, if any.
    #[must_use]
    pub fn visible(&self) -> Option<&Message> {
        match &self.state {
            DialogState::Visible { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether a message is waiting for its show delay.
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        matches!(self.state, DialogState::Scheduled { .. })
    }

    /// Deadline of the pending transition, if any.
    ///
    /// A message whose timeout overflows `Instant` has no deadline and stays
    /// up until dismissed.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        match &self.state {
            DialogState::Hidden => None,
            DialogState::Scheduled { show_at, .. } => *show_at,
            DialogState::Visible { hide_at, .. } => *hide_at,
        }
    }

    fn take_visible(&mut self) -> Option<DialogAction> {
        match std::mem::replace(&mut self.state, DialogState::Hidden) {
            DialogState::Visible { message, .. } => Some(DialogAction::Hide(message)),
            other => {
                self.state = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_200: Duration = Duration::from_millis(200);

    fn msg(code: &str, ms: u64) -> Message {
        Message::new(code, format!("{code} on"), Duration::from_millis(ms))
    }

    #[test]
    fn shows_after_delay() {
        let mut dialog = MessageDialog::new();
        let t = Instant::now();

        assert!(dialog.present(msg("a", 1000), t).is_none());
        assert!(dialog.is_scheduled());
        assert!(dialog.tick(t + MS_100).is_empty());

        let actions = dialog.tick(t + MS_200);
        assert_eq!(actions, vec![DialogAction::Show(msg("a", 1000))]);
        assert_eq!(dialog.visible(), Some(&msg("a", 1000)));
    }

    #[test]
    fn hides_after_timeout() {
        let mut dialog = MessageDialog::new();
        let t = Instant::now();
        dialog.present(msg("a", 1000), t);
        dialog.tick(t + MS_200);

        assert!(dialog.tick(t + Duration::from_millis(1199)).is_empty());
        let actions = dialog.tick(t + Duration::from_millis(1200));
        assert_eq!(actions, vec![DialogAction::Hide(msg("a", 1000))]);
        assert!(dialog.visible().is_none());
        assert!(dialog.next_deadline().is_none());
    }

    #[test]
    fn late_tick_shows_and_hides() {
        let mut dialog = MessageDialog::new();
        let t = Instant::now();
        dialog.present(msg("a", 500), t);

        let actions = dialog.tick(t + Duration::from_secs(5));
        assert_eq!(
            actions,
            vec![
                DialogAction::Show(msg("a", 500)),
                DialogAction::Hide(msg("a", 500)),
            ]
        );
    }

    #[test]
    fn present_while_visible_restarts() {
        let mut dialog = MessageDialog::new();
        let t = Instant::now();
        dialog.present(msg("a", 1000), t);
        dialog.tick(t + MS_200);

        let t2 = t + Duration::from_millis(900);
        let hidden = dialog.present(msg("b", 1000), t2);
        assert_eq!(hidden, Some(DialogAction::Hide(msg("a", 1000))));

        assert_eq!(dialog.next_deadline(), Some(t2 + MS_200));
        assert!(dialog.tick(t2 + MS_100).is_empty());

        let shown = dialog.tick(t2 + MS_200);
        assert_eq!(shown, vec![DialogAction::Show(msg("b", 1000))]);
        assert_eq!(
            dialog.next_deadline(),
            Some(t2 + MS_200 + Duration::from_millis(1000))
        );

        // The first message's dismissal deadline is gone.
        assert!(dialog.tick(t + Duration::from_millis(1200)).is_empty());
        assert_eq!(dialog.visible(), Some(&msg("b", 1000)));
    }

    #[test]
    fn present_while_scheduled_replaces() {
        let mut dialog = MessageDialog::new();
        let t = Instant::now();
        dialog.present(msg("a", 1000), t);
        assert!(dialog.present(msg("b", 1000), t + MS_100).is_none());

        let actions = dialog.tick(t + Duration::from_millis(300));
        assert_eq!(actions, vec![DialogAction::Show(msg("b", 1000))]);
    }

    #[test]
    fn dismiss_hides_and_cancels() {
        let mut dialog = MessageDialog::new();
        let t = Instant::now();
        dialog.present(msg("a", 1000), t);
        dialog.tick(t + MS_200);

        assert_eq!(dialog.dismiss(), Some(DialogAction::Hide(msg("a", 1000))));
        assert!(dialog.dismiss().is_none());

        dialog.present(msg("b", 1000), t);
        assert!(dialog.dismiss().is_none());
        assert!(dialog.tick(t + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn custom_show_delay() {
        let mut dialog = MessageDialog::new().with_show_delay(Duration::ZERO);
        let t = Instant::now();
        dialog.present(msg("a", 1000), t);
        assert_eq!(dialog.tick(t), vec![DialogAction::Show(msg("a", 1000))]);
    }

    #[test]
    fn unbounded_timeout_stays_until_dismissed() {
        let mut dialog = MessageDialog::new();
        let t = Instant::now();
        let forever = Message::new("a", "a on", Duration::MAX);
        dialog.present(forever.clone(), t);

        assert_eq!(dialog.tick(t + MS_200), vec![DialogAction::Show(forever.clone())]);
        assert!(dialog.next_deadline().is_none());
        assert!(dialog.tick(t + Duration::from_secs(86_400)).is_empty());
        assert_eq!(dialog.visible(), Some(&forever));
        assert_eq!(dialog.dismiss(), Some(DialogAction::Hide(forever)));
    }

    #[test]
    fn unbounded_show_delay_never_shows() {
        let mut dialog = MessageDialog::new().with_show_delay(Duration::MAX);
        let t = Instant::now();
        dialog.present(msg("a", 1000), t);

        assert!(dialog.is_scheduled());
        assert!(dialog.next_deadline().is_none());
        assert!(dialog.tick(t + Duration::from_secs(86_400)).is_empty());
        assert!(dialog.dismiss().is_none());
    }

    #[test]
    fn message_from_cheat() {
        let cheat = Cheat::new("abc").with_message("hello");
        let message = Message::from_cheat(&cheat).unwrap();
        assert_eq!(message.code, "abc");
        assert_eq!(message.text, "hello");
        assert_eq!(message.timeout, Duration::from_millis(3000));

        assert!(Message::from_cheat(&Cheat::new("abc").with_message(" ")).is_none());
        assert!(Message::from_cheat(&Cheat::new("abc").with_action(|_| {})).is_none());
    }
}

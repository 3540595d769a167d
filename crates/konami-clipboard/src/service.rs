#![forbid(unsafe_code)]

//! Copy service: boolean copy calls over a [`ClipboardWriter`], plus the
//! per-target feedback window.
//!
//! # Feedback timeline
//!
//! ```text
//! 0 ms          400 ms          800 ms
//! |-- Rising ----|-- Fading -----|  released by tick()
//! ```
//!
//! While a target's feedback runs the target is busy and further copies of
//! it return `false`. Drawing the icon is the host's job; the service only
//! reports where each target is on the timeline.

use ahash::AHashMap;
use web_time::{Duration, Instant};

use crate::options::CopyOptions;
use crate::writer::ClipboardWriter;

/// Total length of the copy feedback.
pub const FEEDBACK_WINDOW_MS: u64 = 800;
/// Offset at which the feedback icon starts fading.
pub const FEEDBACK_FADE_MS: u64 = 400;

/// Something on screen whose text can be copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyTarget {
    /// Stable host identifier, used for the busy guard.
    pub id: String,
    /// Rendered text of the target.
    pub text: String,
}

impl CopyTarget {
    /// Create a target.
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Where a feedback icon is on its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackPhase {
    /// Icon fading in and moving up.
    Rising,
    /// Icon fading out.
    Fading,
}

/// A running copy feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFeedback {
    /// Target the feedback belongs to.
    pub target_id: String,
    /// Icon size to draw.
    pub icon_size: u16,
    /// Icon color to draw.
    pub icon_color: String,
    /// When the copy happened.
    pub started_at: Instant,
}

impl CopyFeedback {
    /// Phase at `now`, or `None` once the window is over.
    #[must_use]
    pub fn phase(&self, now: Instant) -> Option<FeedbackPhase> {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= Duration::from_millis(FEEDBACK_WINDOW_MS) {
            None
        } else if elapsed >= Duration::from_millis(FEEDBACK_FADE_MS) {
            Some(FeedbackPhase::Fading)
        } else {
            Some(FeedbackPhase::Rising)
        }
    }

    /// When the target is released.
    #[must_use]
    pub fn ends_at(&self) -> Instant {
        self.started_at + Duration::from_millis(FEEDBACK_WINDOW_MS)
    }
}

/// Copy-to-clipboard helper reporting success as a boolean.
#[derive(Debug)]
pub struct CopyService<W: ClipboardWriter> {
    writer: W,
    options: CopyOptions,
    busy: AHashMap<String, CopyFeedback>,
}

impl<W: ClipboardWriter> CopyService<W> {
    /// Wrap `writer` with default options.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            options: CopyOptions::defaults(),
            busy: AHashMap::new(),
        }
    }

    /// Replace the options with `options` layered over the defaults.
    pub fn configure(&mut self, options: CopyOptions) {
        self.options = CopyOptions::defaults().merged(&options);
    }

    /// Current effective options.
    #[must_use]
    pub fn options(&self) -> &CopyOptions {
        &self.options
    }

    /// Copy `text`. No feedback is started.
    pub fn copy_text(&mut self, text: &str) -> bool {
        match self.writer.write_text(text) {
            Ok(()) => {
                tracing::debug!(
                    target: "konami.clipboard",
                    writer = %self.writer.name(),
                    len = text.len(),
                    "text copied"
                );
                true
            }
            Err(err) => {
                tracing::debug!(
                    target: "konami.clipboard",
                    writer = %self.writer.name(),
                    error = %err,
                    "copy failed"
                );
                false
            }
        }
    }

    /// Copy a target's text at the current time.
    pub fn copy_target(&mut self, target: &CopyTarget, options: Option<&CopyOptions>) -> bool {
        self.copy_target_at(target, options, Instant::now())
    }

    /// Copy a target's text at `now`.
    ///
    /// `options` are layered over the configured ones for this call only.
    /// A busy target is refused. With animation on, the target is held
    /// busy for the feedback window even if the write fails.
    pub fn copy_target_at(
        &mut self,
        target: &CopyTarget,
        options: Option<&CopyOptions>,
        now: Instant,
    ) -> bool {
        if target.id.is_empty() {
            return false;
        }
        if self.busy.contains_key(&target.id) {
            tracing::debug!(target: "konami.clipboard", id = %target.id, "target busy");
            return false;
        }

        let options = match options {
            Some(over) => self.options.merged(over),
            None => self.options.clone(),
        };
        if options.animation() {
            self.busy.insert(
                target.id.clone(),
                CopyFeedback {
                    target_id: target.id.clone(),
                    icon_size: options.icon_size(),
                    icon_color: options.icon_color().to_owned(),
                    started_at: now,
                },
            );
        }

        self.copy_text(&target.text)
    }

    /// Release targets whose feedback is over. Returns their ids.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        let mut released = Vec::new();
        self.busy.retain(|id, feedback| {
            let running = feedback.phase(now).is_some();
            if !running {
                released.push(id.clone());
            }
            running
        });
        released.sort_unstable();
        released
    }

    /// Whether `id` is inside its feedback window.
    #[must_use]
    pub fn is_busy(&self, id: &str) -> bool {
        self.busy.contains_key(id)
    }

    /// Running feedbacks, for the host to draw.
    pub fn feedback(&self) -> impl Iterator<Item = &CopyFeedback> {
        self.busy.values()
    }

    /// The wrapped writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// The wrapped writer, mutably.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Unwrap the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::MemoryClipboard;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn copy_text_reports_success() {
        let mut service = CopyService::new(MemoryClipboard::new());
        assert!(service.copy_text("cheat"));
        assert_eq!(service.writer().contents(), Some("cheat"));
    }

    #[test]
    fn copy_text_failure_is_false() {
        let mut service = CopyService::new(MemoryClipboard::unavailable());
        assert!(!service.copy_text("cheat"));

        let mut service = CopyService::new(MemoryClipboard::new());
        assert!(!service.copy_text(""));
    }

    #[test]
    fn busy_target_refused_until_released() {
        let mut service = CopyService::new(MemoryClipboard::new());
        let target = CopyTarget::new("code-1", "iddqd");
        let t = Instant::now();

        assert!(service.copy_target_at(&target, None, t));
        assert!(service.is_busy("code-1"));
        assert!(!service.copy_target_at(&target, None, t + ms(100)));
        assert_eq!(service.writer().writes(), 1);

        assert!(service.tick(t + ms(799)).is_empty());
        assert_eq!(service.tick(t + ms(800)), vec!["code-1".to_string()]);
        assert!(service.copy_target_at(&target, None, t + ms(900)));
    }

    #[test]
    fn other_targets_are_independent() {
        let mut service = CopyService::new(MemoryClipboard::new());
        let t = Instant::now();
        assert!(service.copy_target_at(&CopyTarget::new("a", "1"), None, t));
        assert!(service.copy_target_at(&CopyTarget::new("b", "2"), None, t));
        assert_eq!(service.feedback().count(), 2);
    }

    #[test]
    fn no_animation_means_no_busy_window() {
        let mut service = CopyService::new(MemoryClipboard::new());
        service.configure(CopyOptions::new().with_animation(false));
        let target = CopyTarget::new("a", "text");
        let t = Instant::now();

        assert!(service.copy_target_at(&target, None, t));
        assert!(service.copy_target_at(&target, None, t));
        assert!(!service.is_busy("a"));
    }

    #[test]
    fn per_call_options_override_configured() {
        let mut service = CopyService::new(MemoryClipboard::new());
        service.configure(CopyOptions::new().with_icon_color("#0f0"));
        let t = Instant::now();

        let over = CopyOptions::new().with_icon_size(32);
        service.copy_target_at(&CopyTarget::new("a", "x"), Some(&over), t);

        let feedback = service.feedback().next().unwrap();
        assert_eq!(feedback.icon_size, 32);
        assert_eq!(feedback.icon_color, "#0f0");
        assert_eq!(service.options().icon_size(), 16);
    }

    #[test]
    fn configure_resets_to_defaults_first() {
        let mut service = CopyService::new(MemoryClipboard::new());
        service.configure(CopyOptions::new().with_icon_size(40));
        service.configure(CopyOptions::new().with_animation(false));

        assert_eq!(service.options().icon_size(), 16);
        assert!(!service.options().animation());
    }

    #[test]
    fn failed_write_still_holds_target() {
        let mut service = CopyService::new(MemoryClipboard::unavailable());
        let target = CopyTarget::new("a", "x");
        let t = Instant::now();

        assert!(!service.copy_target_at(&target, None, t));
        assert!(service.is_busy("a"));
    }

    #[test]
    fn empty_target_id_is_refused() {
        let mut service = CopyService::new(MemoryClipboard::new());
        assert!(!service.copy_target(&CopyTarget::new("", "x"), None));
        assert_eq!(service.writer().writes(), 0);
    }

    #[test]
    fn feedback_phases() {
        let t = Instant::now();
        let feedback = CopyFeedback {
            target_id: "a".into(),
            icon_size: 16,
            icon_color: "#fff".into(),
            started_at: t,
        };
        assert_eq!(feedback.phase(t), Some(FeedbackPhase::Rising));
        assert_eq!(feedback.phase(t + ms(400)), Some(FeedbackPhase::Fading));
        assert_eq!(feedback.phase(t + ms(800)), None);
        assert_eq!(feedback.ends_at(), t + ms(800));
    }
}

#![forbid(unsafe_code)]

//! Clipboard writer interface and the in-memory writer.

use std::borrow::Cow;
use std::io::{self, Write};

use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::mux::Multiplexer;

/// Errors a clipboard writer can report.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// Writing to the output failed.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The writer cannot take this text.
    #[error("clipboard unsupported: {0}")]
    Unsupported(String),
    /// There was nothing to copy.
    #[error("nothing to copy")]
    Empty,
}

/// Something that can place text on a clipboard.
pub trait ClipboardWriter {
    /// Short name used in log lines.
    fn name(&self) -> Cow<'_, str>;

    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

impl<T: ClipboardWriter + ?Sized> ClipboardWriter for Box<T> {
    fn name(&self) -> Cow<'_, str> {
        (**self).name()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).write_text(text)
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Process-local clipboard.
///
/// Used when no terminal clipboard is reachable, and in tests. An
/// unavailable instance rejects every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
    unavailable: bool,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard that rejects every write.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// The last copied text.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Drop the stored text.
    pub fn clear(&mut self) {
        self.contents = None;
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn name(&self) -> Cow<'_, str> {
        "memory".into()
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unsupported("memory clipboard disabled".into()));
        }
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }
        self.contents = Some(text.to_owned());
        self.writes += 1;
        Ok(())
    }
}

// =============================================================================
// OSC 52
// =============================================================================

/// Largest encoded payload most terminals accept.
pub const DEFAULT_MAX_PAYLOAD: usize = 100_000;

/// Which selection buffer OSC 52 targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    /// The system clipboard (`c`).
    #[default]
    Clipboard,
    /// The primary selection (`p`).
    Primary,
}

impl Selection {
    const fn param(self) -> &'static str {
        match self {
            Self::Clipboard => "c",
            Self::Primary => "p",
        }
    }
}

/// Clipboard writer that emits OSC 52 to a terminal.
///
/// ```
/// use konami_clipboard::{ClipboardWriter, Osc52Clipboard};
///
/// let mut clip = Osc52Clipboard::new(Vec::new());
/// clip.write_text("hi").unwrap();
/// assert_eq!(clip.get_ref().as_slice(), b"\x1b]52;c;aGk=\x07");
/// ```
#[derive(Debug)]
pub struct Osc52Clipboard<W: Write> {
    out: W,
    selection: Selection,
    mux: Multiplexer,
    max_payload: usize,
}

impl<W: Write> Osc52Clipboard<W> {
    /// Write to `out` with no multiplexer wrapping.
    pub fn new(out: W) -> Self {
        Self {
            out,
            selection: Selection::Clipboard,
            mux: Multiplexer::None,
            max_payload: DEFAULT_MAX_PAYLOAD,
        }
    }

    /// Target another selection buffer.
    #[must_use]
    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Wrap the sequence for a multiplexer.
    #[must_use]
    pub fn with_multiplexer(mut self, mux: Multiplexer) -> Self {
        self.mux = mux;
        self
    }

    /// Limit the encoded payload size.
    #[must_use]
    pub fn with_max_payload(mut self, max: usize) -> Self {
        self.max_payload = max;
        self
    }

    /// The underlying output.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Unwrap the underlying output.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn sequence(&self, payload: &str) -> Vec<u8> {
        let mut seq = Vec::with_capacity(payload.len() + 8);
        seq.extend_from_slice(b"\x1b]52;");
        seq.extend_from_slice(self.selection.param().as_bytes());
        seq.push(b';');
        seq.extend_from_slice(payload.as_bytes());
        seq.push(0x07);
        seq
    }
}

impl<W: Write> ClipboardWriter for Osc52Clipboard<W> {
    fn name(&self) -> Cow<'_, str> {
        match self.mux {
            Multiplexer::None => "osc52".into(),
            Multiplexer::Tmux => "osc52+tmux".into(),
            Multiplexer::Screen => "osc52+screen".into(),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }
        let payload = STANDARD.encode(text);
        if payload.len() > self.max_payload {
            return Err(ClipboardError::Unsupported(format!(
                "payload of {} bytes exceeds {} byte limit",
                payload.len(),
                self.max_payload
            )));
        }
        let seq = self.sequence(&payload);
        self.mux.write_wrapped(&mut self.out, &seq)?;
        self.out.flush()?;
        Ok(())
    }
}

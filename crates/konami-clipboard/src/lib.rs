#![forbid(unsafe_code)]

//! Clipboard: the copy-to-clipboard collaborator for Konami hosts.
//!
//! # Role in Konami
//! `konami-clipboard` places text on the clipboard and tells the host, with
//! a plain boolean, whether that worked. Terminal hosts write OSC 52 (wrapped
//! for tmux/screen when needed); tests and headless hosts use the in-memory
//! writer.
//!
//! # Primary responsibilities
//! - **ClipboardWriter**: the writer seam, with OSC 52 and memory writers.
//! - **CopyService**: boolean `copy_text` / `copy_target`, option layering,
//!   and the per-target feedback window driven by `tick`.
//!
//! ```
//! use konami_clipboard::{CopyService, CopyTarget, MemoryClipboard};
//!
//! let mut copy = CopyService::new(MemoryClipboard::new());
//! assert!(copy.copy_target(&CopyTarget::new("msg", "30 lives"), None));
//! assert_eq!(copy.writer().contents(), Some("30 lives"));
//! ```

pub mod mux;
pub mod options;
pub mod service;
pub mod writer;

pub use mux::Multiplexer;
pub use options::{CopyOptions, DEFAULT_ANIMATION, DEFAULT_ICON_COLOR, DEFAULT_ICON_SIZE};
pub use service::{
    CopyFeedback, CopyService, CopyTarget, FEEDBACK_FADE_MS, FEEDBACK_WINDOW_MS, FeedbackPhase,
};
pub use writer::{
    ClipboardError, ClipboardWriter, DEFAULT_MAX_PAYLOAD, MemoryClipboard, Osc52Clipboard,
    Selection,
};

#![forbid(unsafe_code)]

//! Core: cheat-code matching, registry, events, and message timing.
//!
//! # Role in Konami
//! `konami-core` is the keystroke layer. The host feeds it key presses; it
//! keeps the rolling input buffer, decides when a registered code has been
//! typed, gates regular cheats behind an optional activation code, notifies
//! listeners, and times the message dialog.
//!
//! # Primary responsibilities
//! - **CheatService**: the entry point owning all state below.
//! - **CheatRegistry**: normalized code → cheat, with reserved special codes.
//! - **SequenceMatcher**: rolling-buffer exact/prefix matching.
//! - **EventBus**: ordered listeners and channel subscribers.
//! - **MessageDialog**: delayed show and auto-dismiss, driven by `tick`.
//! - **KonamiOptions**: programmatic, environment, and (feature `config`)
//!   file-based configuration.
//!
//! # How it fits in the system
//! Rendering is left to the host. `konami-clipboard` covers the copy
//! collaborator and `konami-demo` wires both into a terminal loop.

pub mod cheat;
pub mod config;
pub mod event;
pub mod focus;
pub mod key;
pub mod matcher;
pub mod message;
pub mod registry;
pub mod service;

pub use cheat::{Cheat, CheatAction, CheatError, DEFAULT_MESSAGE_TIMEOUT_MS};
pub use config::KonamiOptions;
#[cfg(feature = "config")]
pub use config::{CheatEntry, ConfigError, OptionsFile};
pub use event::{CheatEvent, CheatEventKind, EventBus, ListenerId};
pub use focus::FocusKind;
pub use key::{KONAMI_CODE, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use matcher::{MatchOutcome, SequenceMatcher};
pub use message::{DEFAULT_SHOW_DELAY_MS, DialogAction, Message, MessageDialog};
pub use registry::{CheatRegistry, CodeIndex};
pub use service::{CheatService, FeedOutcome};

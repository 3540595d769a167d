#![forbid(unsafe_code)]

//! Key input types and key-name normalization.
//!
//! Cheat codes are matched against a string built from key *names*, the same
//! names a browser reports in `KeyboardEvent.key`, lowercased. A structured
//! [`KeyEvent`] is turned into one of those names with
//! [`KeyCode::key_name`], so a code may be spelled as a concatenation of key
//! names:
//!
//! ```
//! use konami_core::key::{KeyCode, KeyEvent};
//!
//! assert_eq!(KeyEvent::new(KeyCode::Up).key_name(), "arrowup");
//! assert_eq!(KeyEvent::new(KeyCode::Char('B')).key_name(), "b");
//! assert_eq!(KeyEvent::new(KeyCode::F(5)).key_name(), "f5");
//! ```
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the source cannot tell
//! - Only `Press` events take part in matching
//! - `Modifiers` use bitflags for easy combination

use std::borrow::Cow;

use bitflags::bitflags;

/// The classic Konami code, spelled as concatenated key names.
pub const KONAMI_CODE: &str =
    "ArrowUpArrowUpArrowDownArrowDownArrowLeftArrowRightArrowLeftArrowRightBA";

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this event is a key press (the only kind that is matched).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press)
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Lowercased key name used for matching.
    #[must_use]
    pub fn key_name(&self) -> Cow<'static, str> {
        self.code.key_name()
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Delete key.
    Delete,

    /// Insert key.
    Insert,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F24).
    F(u8),
}

impl KeyCode {
    /// Browser-style key name, lowercased.
    ///
    /// Characters are lowercased with full Unicode case folding, so `'Ä'`
    /// yields `"ä"`.
    #[must_use]
    pub fn key_name(self) -> Cow<'static, str> {
        match self {
            Self::Char(c) => Cow::Owned(c.to_lowercase().collect()),
            Self::Enter => Cow::Borrowed("enter"),
            Self::Escape => Cow::Borrowed("escape"),
            Self::Backspace => Cow::Borrowed("backspace"),
            Self::Tab => Cow::Borrowed("tab"),
            Self::Delete => Cow::Borrowed("delete"),
            Self::Insert => Cow::Borrowed("insert"),
            Self::Home => Cow::Borrowed("home"),
            Self::End => Cow::Borrowed("end"),
            Self::PageUp => Cow::Borrowed("pageup"),
            Self::PageDown => Cow::Borrowed("pagedown"),
            Self::Up => Cow::Borrowed("arrowup"),
            Self::Down => Cow::Borrowed("arrowdown"),
            Self::Left => Cow::Borrowed("arrowleft"),
            Self::Right => Cow::Borrowed("arrowright"),
            Self::F(n) => Cow::Owned(format!("f{n}")),
        }
    }
}

impl From<char> for KeyCode {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#![forbid(unsafe_code)]

//! Multiplexer passthrough for the clipboard escape sequence.
//!
//! tmux and GNU screen swallow OSC sequences they do not understand. The
//! clipboard sequence reaches the outer terminal only when wrapped in a DCS
//! passthrough block:
//!
//! ```text
//! tmux:   ESC P tmux; <sequence, every ESC doubled> ESC \
//! screen: ESC P <sequence> ESC \
//! ```
//!
//! Zellij and bare terminals take the sequence as-is.

use std::io::{self, Write};

const ESC: u8 = 0x1b;

/// String Terminator: ESC \
const ST: &[u8] = b"\x1b\\";

/// Terminal multiplexer the process runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Multiplexer {
    /// No multiplexer, or one that needs no wrapping.
    #[default]
    None,
    /// tmux (`$TMUX` set).
    Tmux,
    /// GNU screen (`$STY` set).
    Screen,
}

impl Multiplexer {
    /// Detect from the process environment.
    #[must_use]
    pub fn detect() -> Self {
        Self::detect_with(|name| std::env::var_os(name).is_some_and(|v| !v.is_empty()))
    }

    /// Detect through an arbitrary "is this variable set" lookup.
    #[must_use]
    pub fn detect_with<F>(is_set: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        if is_set("TMUX") {
            Self::Tmux
        } else if is_set("STY") {
            Self::Screen
        } else {
            Self::None
        }
    }

    /// Write `sequence` wrapped for this multiplexer.
    pub fn write_wrapped<W: Write>(self, w: &mut W, sequence: &[u8]) -> io::Result<()> {
        match self {
            Self::None => w.write_all(sequence),
            Self::Tmux => {
                w.write_all(b"\x1bPtmux;")?;
                for chunk in sequence.split_inclusive(|b| *b == ESC) {
                    w.write_all(chunk)?;
                    if chunk.last() == Some(&ESC) {
                        w.write_all(&[ESC])?;
                    }
                }
                w.write_all(ST)
            }
            Self::Screen => {
                w.write_all(b"\x1bP")?;
                w.write_all(sequence)?;
                w.write_all(ST)
            }
        }
    }
}

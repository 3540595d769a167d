//! Raw-mode lifecycle for the demo loop.

use std::io::{self, Write};

/// Enables raw mode on creation and restores the terminal on drop,
/// including during a panic unwind.
pub struct RawMode {
    _private: (),
}

impl RawMode {
    pub fn enter() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        tracing::debug!("terminal raw mode enabled");
        Ok(Self { _private: () })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(err) = crossterm::terminal::disable_raw_mode() {
            tracing::warn!(error = %err, "failed to leave raw mode");
        }
    }
}

/// Print lines with explicit carriage returns; raw mode drops the implicit one.
pub fn print_lines<W: Write>(out: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        write!(out, "{line}\r\n")?;
    }
    out.flush()
}

#![forbid(unsafe_code)]

//! Konami Demo
//!
//! Type cheat codes in a raw-mode terminal and watch the service react.
//!
//! # Running
//!
//! ```sh
//! cargo run -p konami-demo
//! KONAMI_ACTIVATION_CODE=unlock KONAMI_LOG_EVENTS=1 RUST_LOG=konami=info cargo run -p konami-demo
//! KONAMI_CONFIG=cheats.toml cargo run -p konami-demo
//! ```
//!
//! # Controls
//!
//! - Arrow keys / letters: type codes (the Konami code is registered by default)
//! - Esc: close the visible message
//! - Ctrl+Y: copy the last message through OSC 52
//! - Ctrl+C: quit

mod app;
mod input;
mod terminal;

use std::io;

use crossterm::event::{self, Event};
use konami_clipboard::{Multiplexer, Osc52Clipboard};
use konami_core::{ConfigError, KonamiOptions};
use tracing_subscriber::EnvFilter;
use web_time::{Duration, Instant};

use app::{Control, Demo};
use terminal::{RawMode, print_lines};

/// Upper bound on how long the loop waits for input.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to load {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// Environment options layered over the optional `KONAMI_CONFIG` file.
fn load_options() -> Result<KonamiOptions, DemoError> {
    let env = KonamiOptions::from_env();
    let Some(path) = std::env::var_os("KONAMI_CONFIG") else {
        return Ok(env);
    };
    let file = KonamiOptions::from_file(&path).map_err(|source| DemoError::Config {
        path: path.to_string_lossy().into_owned(),
        source,
    })?;
    tracing::info!(path = %path.to_string_lossy(), cheats = file.cheats.len(), "config loaded");
    Ok(file.merged(env))
}

fn run() -> Result<(), DemoError> {
    let options = load_options()?;
    let clipboard = Osc52Clipboard::new(io::stdout()).with_multiplexer(Multiplexer::detect());
    let mut demo = Demo::new(options, clipboard);

    let _raw = RawMode::enter()?;
    let mut stdout = io::stdout();

    loop {
        print_lines(&mut stdout, &demo.take_output())?;

        let now = Instant::now();
        let wait = demo
            .next_deadline()
            .map_or(POLL_INTERVAL, |at| at.saturating_duration_since(now))
            .min(POLL_INTERVAL);

        if event::poll(wait)?
            && let Event::Key(raw) = event::read()?
            && let Some(key) = input::map_key(&raw)
            && key.is_press()
            && demo.handle_key(&key, Instant::now()) == Control::Quit
        {
            break;
        }
        demo.tick(Instant::now());
    }

    print_lines(&mut stdout, &demo.take_output())?;
    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("konami-demo: {err}");
        std::process::exit(1);
    }
}

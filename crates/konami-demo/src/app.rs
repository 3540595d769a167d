//! Demo state: the cheat service, the copy service, and the lines to print.
//!
//! Kept free of terminal I/O so the key handling can be tested headless.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;

use konami_clipboard::{ClipboardWriter, CopyService, CopyTarget};
use konami_core::{
    Cheat, CheatEvent, CheatService, DialogAction, FocusKind, KONAMI_CODE, KeyEvent,
    KonamiOptions, Message,
};
use web_time::{Duration, Instant};

/// Whether the loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Cheats registered when the configuration brings none.
pub fn default_cheats(god_mode: &Arc<AtomicBool>) -> Vec<Cheat> {
    let flag = Arc::clone(god_mode);
    vec![
        Cheat::new(KONAMI_CODE)
            .with_name("konami")
            .with_message("30 extra lives"),
        Cheat::new("iddqd")
            .with_name("god mode")
            .with_message("Degreelessness mode toggled")
            .with_message_timeout(Duration::from_millis(1500))
            .with_action(move |_| {
                flag.fetch_xor(true, Ordering::SeqCst);
            }),
        Cheat::new("hello").with_message("Hello there"),
    ]
}

pub struct Demo<W: ClipboardWriter> {
    service: CheatService,
    copy: CopyService<W>,
    events: Receiver<CheatEvent>,
    last_message: Option<Message>,
    god_mode: Arc<AtomicBool>,
    output: Vec<String>,
}

impl<W: ClipboardWriter> Demo<W> {
    pub fn new(mut options: KonamiOptions, writer: W) -> Self {
        let god_mode = Arc::new(AtomicBool::new(false));
        if options.cheats.is_empty() {
            options.cheats = default_cheats(&god_mode);
        }

        let mut service = CheatService::new();
        for err in service.configure(options) {
            tracing::warn!(error = %err, "skipping cheat");
        }
        let events = service.subscribe_channel();

        let mut demo = Self {
            service,
            copy: CopyService::new(writer),
            events,
            last_message: None,
            god_mode,
            output: Vec::new(),
        };
        demo.banner();
        demo
    }

    fn banner(&mut self) {
        let codes = self.service.registry().codes().join(", ");
        self.output.push(format!("cheats: {codes}"));
        if let Some(code) = self.service.activation_code() {
            self.output.push(format!("locked: type \"{code}\" to unlock"));
        }
        self.output
            .push("Esc closes a message, Ctrl+Y copies it, Ctrl+C quits".to_string());
    }

    /// Handle one key press.
    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> Control {
        if key.ctrl() && key.is_char('c') {
            return Control::Quit;
        }
        if key.ctrl() && key.is_char('y') {
            self.copy_last_message(now);
            return Control::Continue;
        }

        self.service.feed(key, FocusKind::None, now);
        let fired: Vec<CheatEvent> = self.events.try_iter().collect();
        for event in fired {
            self.output.push(format!(
                "{}: {} (enabled: {}, god mode: {})",
                event.kind,
                event.cheat.label(),
                self.service.is_enabled(),
                self.god_mode.load(Ordering::SeqCst),
            ));
        }
        Control::Continue
    }

    /// Advance message and copy timers.
    pub fn tick(&mut self, now: Instant) {
        for action in self.service.tick(now) {
            match action {
                DialogAction::Show(message) => {
                    self.output.push(format!("┌ {} ┐", message.text));
                    self.last_message = Some(message);
                }
                DialogAction::Hide(message) => {
                    self.output.push(format!("└ {} closed ┘", message.code));
                }
            }
        }
        self.copy.tick(now);
    }

    fn copy_last_message(&mut self, now: Instant) {
        let Some(message) = &self.last_message else {
            self.output.push("nothing to copy".to_string());
            return;
        };
        let target = CopyTarget::new(message.code.clone(), message.text.clone());
        let line = if self.copy.copy_target_at(&target, None, now) {
            format!("copied \"{}\"", message.text)
        } else {
            "copy failed".to_string()
        };
        self.output.push(line);
    }

    /// Lines produced since the last call.
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    /// Earliest time `tick` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.service.dialog().next_deadline()
    }

    #[cfg(test)]
    pub fn copy_service(&self) -> &CopyService<W> {
        &self.copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use konami_clipboard::MemoryClipboard;
    use konami_core::KeyCode;

    fn press(demo: &mut Demo<MemoryClipboard>, keys: &str, now: Instant) {
        for c in keys.chars() {
            demo.handle_key(&KeyEvent::new(KeyCode::Char(c)), now);
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c)).with_modifiers(konami_core::Modifiers::CTRL)
    }

    #[test]
    fn defaults_registered_when_config_has_none() {
        let mut demo = Demo::new(KonamiOptions::new(), MemoryClipboard::new());
        let banner = demo.take_output();
        assert!(banner[0].contains("iddqd"));
        assert!(banner[0].contains("hello"));
    }

    #[test]
    fn cheat_prints_event_and_message() {
        let mut demo = Demo::new(KonamiOptions::new(), MemoryClipboard::new());
        demo.take_output();
        let t = Instant::now();

        press(&mut demo, "iddqd", t);
        let lines = demo.take_output();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("CHEAT_TRIGGERED: GOD MODE"));
        assert!(lines[0].contains("god mode: true"));

        demo.tick(t + Duration::from_millis(200));
        assert_eq!(demo.take_output(), vec!["┌ Degreelessness mode toggled ┐"]);
    }

    #[test]
    fn ctrl_y_copies_last_message() {
        let mut demo = Demo::new(KonamiOptions::new(), MemoryClipboard::new());
        let t = Instant::now();

        demo.handle_key(&ctrl('y'), t);
        assert_eq!(demo.take_output().last().map(String::as_str), Some("nothing to copy"));

        press(&mut demo, "hello", t);
        demo.tick(t + Duration::from_millis(200));
        demo.take_output();
        demo.handle_key(&ctrl('y'), t + Duration::from_millis(300));

        assert_eq!(demo.take_output(), vec!["copied \"Hello there\""]);
        assert_eq!(demo.copy_service().writer().contents(), Some("Hello there"));
    }

    #[test]
    fn ctrl_c_quits() {
        let mut demo = Demo::new(KonamiOptions::new(), MemoryClipboard::new());
        assert_eq!(demo.handle_key(&ctrl('c'), Instant::now()), Control::Quit);
        assert_eq!(
            demo.handle_key(&KeyEvent::new(KeyCode::Char('c')), Instant::now()),
            Control::Continue
        );
    }

    #[test]
    fn activation_code_locks_until_typed() {
        let options = KonamiOptions::new()
            .with_activation_code("go")
            .with_cheat(Cheat::new("hi").with_message("hi"));
        let mut demo = Demo::new(options, MemoryClipboard::new());
        assert!(demo.take_output()[1].contains("\"go\""));
        let t = Instant::now();

        press(&mut demo, "hi", t);
        assert!(demo.take_output().is_empty());

        press(&mut demo, "gohi", t);
        let lines = demo.take_output();
        assert!(lines[0].starts_with("ACTIVATION: GO"));
        assert!(lines[1].starts_with("CHEAT_TRIGGERED: HI"));
    }
}

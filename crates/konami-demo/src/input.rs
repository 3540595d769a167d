//! crossterm key events → `konami_core` key events.

use crossterm::event as ct;
use konami_core::{KeyCode, KeyEvent, KeyEventKind, Modifiers};

/// Map a crossterm key event. Keys without a browser-style name are dropped.
pub fn map_key(event: &ct::KeyEvent) -> Option<KeyEvent> {
    let code = map_code(event.code)?;
    Some(
        KeyEvent::new(code)
            .with_modifiers(map_modifiers(event.modifiers))
            .with_kind(map_kind(event.kind)),
    )
}

fn map_code(code: ct::KeyCode) -> Option<KeyCode> {
    Some(match code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Esc => KeyCode::Escape,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Tab | ct::KeyCode::BackTab => KeyCode::Tab,
        ct::KeyCode::Delete => KeyCode::Delete,
        ct::KeyCode::Insert => KeyCode::Insert,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        ct::KeyCode::PageUp => KeyCode::PageUp,
        ct::KeyCode::PageDown => KeyCode::PageDown,
        ct::KeyCode::Up => KeyCode::Up,
        ct::KeyCode::Down => KeyCode::Down,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    })
}

fn map_modifiers(mods: ct::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if mods.contains(ct::KeyModifiers::SHIFT) {
        out |= Modifiers::SHIFT;
    }
    if mods.contains(ct::KeyModifiers::ALT) {
        out |= Modifiers::ALT;
    }
    if mods.contains(ct::KeyModifiers::CONTROL) {
        out |= Modifiers::CTRL;
    }
    if mods.intersects(ct::KeyModifiers::SUPER | ct::KeyModifiers::META) {
        out |= Modifiers::SUPER;
    }
    out
}

fn map_kind(kind: ct::KeyEventKind) -> KeyEventKind {
    match kind {
        ct::KeyEventKind::Press => KeyEventKind::Press,
        ct::KeyEventKind::Repeat => KeyEventKind::Repeat,
        ct::KeyEventKind::Release => KeyEventKind::Release,
    }
}

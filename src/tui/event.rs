//! Terminal input, translated into core [`Key`]s.
//!
//! Only key presses are forwarded; repeats and releases (reported by
//! terminals with the keyboard enhancement protocol) are dropped.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode as CtKeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

use crate::core::key::{Key, KeyCode, Modifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    Key(Key),
    /// Pasted text; each character is fed to the active screen as typing.
    Paste(String),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            warn!("Failed to poll terminal events: {}", e);
            return None;
        }
    }
    let event = match event::read() {
        Ok(event) => event,
        Err(e) => {
            warn!("Failed to read terminal event: {}", e);
            return None;
        }
    };
    match event {
        Event::Key(key_event) => {
            debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code, key_event.modifiers
            );
            translate_key(key_event).map(TuiEvent::Key)
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(..) => Some(TuiEvent::Resize),
        _ => None,
    }
}

pub fn translate_key(event: KeyEvent) -> Option<Key> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    let code = match event.code {
        CtKeyCode::Char(c) => KeyCode::Char(c),
        CtKeyCode::Enter => KeyCode::Enter,
        CtKeyCode::Esc => KeyCode::Esc,
        CtKeyCode::Tab => KeyCode::Tab,
        CtKeyCode::BackTab => KeyCode::BackTab,
        CtKeyCode::Backspace => KeyCode::Backspace,
        CtKeyCode::Delete => KeyCode::Delete,
        CtKeyCode::Left => KeyCode::Left,
        CtKeyCode::Right => KeyCode::Right,
        CtKeyCode::Up => KeyCode::Up,
        CtKeyCode::Down => KeyCode::Down,
        CtKeyCode::Home => KeyCode::Home,
        CtKeyCode::End => KeyCode::End,
        CtKeyCode::PageUp => KeyCode::PageUp,
        CtKeyCode::PageDown => KeyCode::PageDown,
        _ => return None,
    };
    let mods = Modifiers {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        alt: event.modifiers.contains(KeyModifiers::ALT),
        // Shift is already folded into the character for printable keys.
        shift: event.modifiers.contains(KeyModifiers::SHIFT) && !matches!(code, KeyCode::Char(_)),
    };
    Some(Key { code, mods })
}

/// Pasted text as a run of plain character keys. Newlines are dropped.
pub fn paste_keys(text: &str) -> impl Iterator<Item = Key> + '_ {
    text.chars()
        .filter(|c| !c.is_control())
        .map(Key::char)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn event(code: CtKeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_ctrl_chars_keep_modifier() {
        let key = translate_key(event(
            CtKeyCode::Char('w'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        ));
        assert_eq!(key, Some(Key::ctrl('w')));
    }

    #[test]
    fn test_shifted_char_is_plain() {
        let key = translate_key(event(
            CtKeyCode::Char('A'),
            KeyModifiers::SHIFT,
            KeyEventKind::Press,
        ));
        assert_eq!(key, Some(Key::char('A')));
    }

    #[test]
    fn test_release_is_ignored() {
        let key = translate_key(event(
            CtKeyCode::Enter,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(key, None);
    }

    #[test]
    fn test_alt_backspace() {
        let key = translate_key(event(
            CtKeyCode::Backspace,
            KeyModifiers::ALT,
            KeyEventKind::Press,
        ));
        assert_eq!(key, Some(Key::alt(KeyCode::Backspace)));
    }

    #[test]
    fn test_paste_drops_newlines() {
        let keys: Vec<Key> = paste_keys("~/a\nb").collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(keys[3], Key::char('b'));
    }
}

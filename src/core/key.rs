//! # Keys
//!
//! A closed key type for the core. The TUI adapter translates terminal events
//! into `Key` values so every handler matches on an enum the compiler can check,
//! never on key-name strings.

/// Physical key, without modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Modifier flags held while the key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        alt: false,
        shift: false,
    };
    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        alt: false,
        shift: false,
    };
    pub const ALT: Modifiers = Modifiers {
        ctrl: false,
        alt: true,
        shift: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl Key {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::NONE,
        }
    }

    pub const fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            mods: Modifiers::CTRL,
        }
    }

    pub const fn alt(code: KeyCode) -> Self {
        Self {
            code,
            mods: Modifiers::ALT,
        }
    }

    pub const fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }

    /// A printable character typed without Ctrl or Alt.
    pub fn plain_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.mods.ctrl && !self.mods.alt => Some(c),
            _ => None,
        }
    }

    pub fn is_ctrl(&self, c: char) -> bool {
        self.mods.ctrl && self.code == KeyCode::Char(c)
    }

    pub fn is_up(&self) -> bool {
        matches!(self.code, KeyCode::Up) || self.plain_char() == Some('k')
    }

    pub fn is_down(&self) -> bool {
        matches!(self.code, KeyCode::Down) || self.plain_char() == Some('j')
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Key::new(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_char_ignores_ctrl() {
        assert_eq!(Key::char('a').plain_char(), Some('a'));
        assert_eq!(Key::ctrl('a').plain_char(), None);
        assert!(Key::ctrl('w').is_ctrl('w'));
    }

    #[test]
    fn test_vim_style_navigation() {
        assert!(Key::char('j').is_down());
        assert!(Key::new(KeyCode::Up).is_up());
        assert!(!Key::ctrl('k').is_up());
    }
}

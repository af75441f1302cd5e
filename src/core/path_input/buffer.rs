//! Character-addressed line buffer with a cursor.
//!
//! Positions count `char`s, not bytes, so editing a path such as `~/café/` moves
//! one glyph at a time. Every mutation clamps the cursor to `0..=len`.

use crate::core::key::{Key, KeyCode};

pub const SEPARATOR: char = '/';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: Vec<char>,
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `text` with the cursor at the end.
    pub fn from_text(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let cursor = chars.len();
        Self { chars, cursor }
    }

    pub fn text(&self) -> String {
        self.chars.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Text before the cursor, for rendering the caret column.
    pub fn before_cursor(&self) -> String {
        self.chars[..self.cursor].iter().collect()
    }

    pub fn set_text(&mut self, text: &str) {
        *self = Self::from_text(text);
    }

    pub fn clear(&mut self) {
        self.chars.clear();
        self.cursor = 0;
    }

    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.chars.len());
    }

    pub fn insert(&mut self, c: char) {
        self.chars.insert(self.cursor, c);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for c in s.chars() {
            self.insert(c);
        }
    }

    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.chars.remove(self.cursor);
        true
    }

    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.chars.len() {
            return false;
        }
        self.chars.remove(self.cursor);
        true
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.set_cursor(self.cursor + 1);
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.chars.len();
    }

    /// Delete everything before the cursor.
    pub fn delete_to_start(&mut self) {
        self.chars.drain(..self.cursor);
        self.cursor = 0;
    }

    /// Delete the path segment before the cursor.
    ///
    /// Trailing separators directly before the cursor are consumed first, then
    /// characters back to (not including) the previous separator, or to the
    /// start of the buffer when there is none.
    pub fn delete_word(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let mut start = self.cursor;
        while start > 0 && self.chars[start - 1] == SEPARATOR {
            start -= 1;
        }
        while start > 0 && self.chars[start - 1] != SEPARATOR {
            start -= 1;
        }
        self.chars.drain(start..self.cursor);
        self.cursor = start;
        true
    }

    /// Replace the chars in `start..end` with `text`, leaving the cursor after it.
    pub fn splice(&mut self, start: usize, end: usize, text: &str) {
        let end = end.min(self.chars.len());
        let start = start.min(end);
        let inserted: Vec<char> = text.chars().collect();
        let inserted_len = inserted.len();
        self.chars.splice(start..end, inserted);
        self.cursor = start + inserted_len;
    }

    /// Apply a plain editing key. Returns false when the key is not an editing key.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if key.is_ctrl('w') || (key.mods.alt && key.code == KeyCode::Backspace) {
            self.delete_word();
            return true;
        }
        if key.is_ctrl('a') {
            self.move_home();
            return true;
        }
        if key.is_ctrl('e') {
            self.move_end();
            return true;
        }
        if key.is_ctrl('u') {
            self.delete_to_start();
            return true;
        }
        if let Some(c) = key.plain_char() {
            self.insert(c);
            return true;
        }
        match key.code {
            KeyCode::Backspace => {
                self.backspace();
            }
            KeyCode::Delete => {
                self.delete();
            }
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_cursor_in_bounds(buf: &LineBuffer) {
        assert!(buf.cursor() <= buf.len(), "cursor {} > len {}", buf.cursor(), buf.len());
    }

    #[test]
    fn test_insert_is_char_accurate() {
        let mut buf = LineBuffer::new();
        for c in "café/ü".chars() {
            buf.insert(c);
        }
        assert_eq!(buf.len(), 6);
        buf.move_left();
        buf.move_left();
        buf.insert('x');
        assert_eq!(buf.text(), "caféx/ü");
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn test_delete_word_removes_last_segment() {
        let mut buf = LineBuffer::from_text("/tmp/foo/bar");
        buf.delete_word();
        assert_eq!(buf.text(), "/tmp/foo/");
        assert_eq!(buf.cursor(), 9);
    }

    #[test]
    fn test_delete_word_skips_trailing_separators() {
        let mut buf = LineBuffer::from_text("/tmp/foo//");
        buf.delete_word();
        assert_eq!(buf.text(), "/tmp/");
    }

    #[test]
    fn test_delete_word_without_separator_clears_to_start() {
        let mut buf = LineBuffer::from_text("projects");
        buf.delete_word();
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_delete_word_at_start_is_noop() {
        let mut buf = LineBuffer::from_text("/tmp/foo");
        buf.move_home();
        assert!(!buf.delete_word());
        assert_eq!(buf.text(), "/tmp/foo");
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_delete_word_mid_buffer_keeps_tail() {
        let mut buf = LineBuffer::from_text("/tmp/foo/bar");
        buf.set_cursor(8);
        buf.delete_word();
        assert_eq!(buf.text(), "/tmp//bar");
        assert_eq!(buf.cursor(), 5);
    }

    #[test]
    fn test_backspace_until_empty() {
        let mut buf = LineBuffer::from_text("~/ñandú");
        for _ in 0..20 {
            buf.backspace();
            assert_cursor_in_bounds(&buf);
        }
        assert!(buf.is_empty());
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_cursor_stays_in_bounds_for_mixed_edits() {
        let mut buf = LineBuffer::new();
        let keys = [
            Key::char('a'),
            Key::new(KeyCode::Left),
            Key::new(KeyCode::Left),
            Key::new(KeyCode::Delete),
            Key::new(KeyCode::Delete),
            Key::char('/'),
            Key::new(KeyCode::End),
            Key::new(KeyCode::Right),
            Key::ctrl('w'),
            Key::ctrl('w'),
            Key::new(KeyCode::Home),
            Key::new(KeyCode::Backspace),
            Key::char('z'),
            Key::ctrl('e'),
            Key::ctrl('u'),
        ];
        for key in keys {
            buf.handle_key(key);
            assert_cursor_in_bounds(&buf);
        }
    }

    #[test]
    fn test_splice_places_cursor_after_insert() {
        let mut buf = LineBuffer::from_text("~/pro");
        buf.splice(2, 5, "projects/");
        assert_eq!(buf.text(), "~/projects/");
        assert_eq!(buf.cursor(), 11);
    }

    #[test]
    fn test_ctrl_u_deletes_to_start() {
        let mut buf = LineBuffer::from_text("abc/def");
        buf.set_cursor(4);
        buf.handle_key(Key::ctrl('u'));
        assert_eq!(buf.text(), "def");
        assert_eq!(buf.cursor(), 0);
    }
}

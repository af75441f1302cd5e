//! Tab completion over directory names.

use std::path::{Path, PathBuf};

use super::buffer::{LineBuffer, SEPARATOR};
use crate::core::fs::{FileSystem, resolve_path};

/// Where a completion applies: the directory to list, the prefix to match,
/// and the char span of the buffer the chosen name replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionTarget {
    pub dir: PathBuf,
    pub prefix: String,
    /// First char index of the replaced span. The span runs to the end of the buffer.
    pub replace_start: usize,
    /// Text inserted before the matched name (`~/` when completing from empty input).
    pub lead: String,
}

impl CompletionTarget {
    /// Split the buffer by its last separator into `(parent, prefix)`.
    pub fn from_buffer(buffer: &LineBuffer, home: &Path) -> Self {
        let text = buffer.text();
        let chars: Vec<char> = text.chars().collect();

        if chars.is_empty() {
            return Self {
                dir: home.to_path_buf(),
                prefix: String::new(),
                replace_start: 0,
                lead: format!("~{SEPARATOR}"),
            };
        }
        if text == "~" {
            return Self {
                dir: home.to_path_buf(),
                prefix: String::new(),
                replace_start: 1,
                lead: SEPARATOR.to_string(),
            };
        }

        match chars.iter().rposition(|&c| c == SEPARATOR) {
            Some(idx) => {
                let parent: String = chars[..=idx].iter().collect();
                Self {
                    dir: resolve_path(&parent, home),
                    prefix: chars[idx + 1..].iter().collect(),
                    replace_start: idx + 1,
                    lead: String::new(),
                }
            }
            None => Self {
                dir: resolve_path(".", home),
                prefix: text,
                replace_start: 0,
                lead: String::new(),
            },
        }
    }

    pub fn candidates(&self, fs: &dyn FileSystem, show_hidden: bool) -> Vec<String> {
        fs.list_dirs(&self.dir, &self.prefix, show_hidden)
    }

    /// Write `name` plus a trailing separator over the replaced span.
    pub fn apply(&self, buffer: &mut LineBuffer, name: &str) {
        let text = format!("{}{}{}", self.lead, name, SEPARATOR);
        buffer.splice(self.replace_start, buffer.len(), &text);
    }
}

/// Candidate dropdown shown when more than one directory matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub target: CompletionTarget,
    pub candidates: Vec<String>,
    pub highlighted: usize,
}

impl Completion {
    pub fn new(target: CompletionTarget, candidates: Vec<String>) -> Self {
        Self {
            target,
            candidates,
            highlighted: 0,
        }
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if !self.candidates.is_empty() {
            self.highlighted = (self.highlighted + 1).min(self.candidates.len() - 1);
        }
    }

    pub fn commit(&self, buffer: &mut LineBuffer) {
        if let Some(name) = self.candidates.get(self.highlighted) {
            self.target.apply(buffer, name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_last_separator() {
        let buf = LineBuffer::from_text("/srv/data/pro");
        let target = CompletionTarget::from_buffer(&buf, Path::new("/home/u"));
        assert_eq!(target.dir, PathBuf::from("/srv/data/"));
        assert_eq!(target.prefix, "pro");
        assert_eq!(target.replace_start, 10);
    }

    #[test]
    fn test_empty_buffer_completes_from_home() {
        let buf = LineBuffer::new();
        let target = CompletionTarget::from_buffer(&buf, Path::new("/home/u"));
        assert_eq!(target.dir, PathBuf::from("/home/u"));
        assert!(target.prefix.is_empty());

        let mut buf = buf;
        target.apply(&mut buf, "code");
        assert_eq!(buf.text(), "~/code/");
        assert_eq!(buf.cursor(), buf.len());
    }

    #[test]
    fn test_tilde_prefix_resolves_against_home() {
        let buf = LineBuffer::from_text("~/pr");
        let target = CompletionTarget::from_buffer(&buf, Path::new("/home/u"));
        assert_eq!(target.dir, PathBuf::from("/home/u"));
        assert_eq!(target.prefix, "pr");
    }

    #[test]
    fn test_highlight_is_clamped() {
        let buf = LineBuffer::from_text("/x/");
        let target = CompletionTarget::from_buffer(&buf, Path::new("/"));
        let mut completion = Completion::new(target, vec!["a".into(), "b".into()]);
        completion.move_up();
        assert_eq!(completion.highlighted, 0);
        completion.move_down();
        completion.move_down();
        completion.move_down();
        assert_eq!(completion.highlighted, 1);
    }
}

//! # Path Input
//!
//! A single-line path editor with three modes:
//!
//! ```text
//!            Tab (N matches)             Ctrl+B
//!  Completion <──────────── Typing ──────────────> Browser
//!      │  Enter/Tab commit    ▲ ▲   select commits   │
//!      │  Esc discards        │ │   Esc discards     │
//!      └──────────────────────┘ └────────────────────┘
//! ```
//!
//! Any key not handled by the completion dropdown cancels it and is replayed
//! in Typing mode, so typing never gets swallowed.

pub mod browser;
pub mod buffer;
pub mod completion;

use std::path::PathBuf;

use log::debug;

use crate::core::fs::{FileSystem, resolve_path};
use crate::core::key::{Key, KeyCode};

pub use browser::{Browser, BrowserOutcome, BrowserRow};
pub use buffer::LineBuffer;
pub use completion::{Completion, CompletionTarget};

pub const NO_MATCH_MESSAGE: &str = "No matching directories";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Typing,
    Completion(Completion),
    Browser(Browser),
}

/// Result of feeding one key to the path input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathInputOutcome {
    /// The key was used; stay on the screen.
    Consumed,
    /// Enter on a valid directory.
    Submitted(PathBuf),
    /// Not a path-input key (e.g. Esc in Typing mode). The screen decides.
    Unhandled,
}

#[derive(Debug, Clone, Default)]
pub struct PathInput {
    pub buffer: LineBuffer,
    pub mode: Mode,
    pub error: Option<String>,
    pub show_hidden: bool,
}

impl PathInput {
    pub fn new(show_hidden: bool) -> Self {
        Self {
            show_hidden,
            ..Default::default()
        }
    }

    /// Reset for a fresh visit to the owning screen.
    pub fn reset(&mut self, initial: &str) {
        self.buffer.set_text(initial);
        self.mode = Mode::Typing;
        self.error = None;
    }

    pub fn handle_key(&mut self, key: Key, fs: &dyn FileSystem) -> PathInputOutcome {
        match std::mem::take(&mut self.mode) {
            Mode::Typing => self.handle_typing(key, fs),
            Mode::Completion(completion) => self.handle_completion(completion, key, fs),
            Mode::Browser(browser) => self.handle_browser(browser, key, fs),
        }
    }

    fn handle_typing(&mut self, key: Key, fs: &dyn FileSystem) -> PathInputOutcome {
        if key.is_ctrl('b') {
            let browser = Browser::open(&self.buffer.text(), fs, self.show_hidden);
            self.mode = Mode::Browser(browser);
            return PathInputOutcome::Consumed;
        }
        match key.code {
            KeyCode::Tab => {
                self.complete(fs);
                PathInputOutcome::Consumed
            }
            KeyCode::Enter => match self.validate(fs) {
                Ok(path) => {
                    self.error = None;
                    PathInputOutcome::Submitted(path)
                }
                Err(message) => {
                    self.error = Some(message);
                    PathInputOutcome::Consumed
                }
            },
            _ => {
                if self.buffer.handle_key(key) {
                    self.error = None;
                    PathInputOutcome::Consumed
                } else {
                    PathInputOutcome::Unhandled
                }
            }
        }
    }

    fn handle_completion(
        &mut self,
        mut completion: Completion,
        key: Key,
        fs: &dyn FileSystem,
    ) -> PathInputOutcome {
        match key.code {
            KeyCode::Up => completion.move_up(),
            KeyCode::Down => completion.move_down(),
            KeyCode::Enter | KeyCode::Tab => {
                completion.commit(&mut self.buffer);
                return PathInputOutcome::Consumed;
            }
            KeyCode::Esc => return PathInputOutcome::Consumed,
            _ => return self.handle_typing(key, fs),
        }
        self.mode = Mode::Completion(completion);
        PathInputOutcome::Consumed
    }

    fn handle_browser(
        &mut self,
        mut browser: Browser,
        key: Key,
        fs: &dyn FileSystem,
    ) -> PathInputOutcome {
        let outcome = browser.handle_key(key, fs);
        self.show_hidden = browser.show_hidden;
        match outcome {
            BrowserOutcome::Stay => self.mode = Mode::Browser(browser),
            BrowserOutcome::Cancel => {}
            BrowserOutcome::Commit(path) => {
                self.buffer.set_text(&path.to_string_lossy());
                self.error = None;
            }
        }
        PathInputOutcome::Consumed
    }

    /// Tab from Typing mode.
    fn complete(&mut self, fs: &dyn FileSystem) {
        let target = CompletionTarget::from_buffer(&self.buffer, &fs.home_dir());
        let mut candidates = target.candidates(fs, self.show_hidden);
        debug!(
            "Completing '{}' in {}: {} candidates",
            target.prefix,
            target.dir.display(),
            candidates.len()
        );
        match candidates.len() {
            0 => self.error = Some(NO_MATCH_MESSAGE.to_string()),
            1 => {
                let name = candidates.remove(0);
                target.apply(&mut self.buffer, &name);
                self.error = None;
            }
            _ => {
                self.error = None;
                self.mode = Mode::Completion(Completion::new(target, candidates));
            }
        }
    }

    /// Check the buffer names an existing directory.
    pub fn validate(&self, fs: &dyn FileSystem) -> Result<PathBuf, String> {
        let text = self.buffer.text();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err("Path cannot be empty".to_string());
        }
        let path = resolve_path(trimmed, &fs.home_dir());
        if !fs.is_dir(&path) {
            if fs.exists(&path) {
                return Err(format!("Not a directory: {}", path.display()));
            }
            return Err(format!("Directory does not exist: {}", path.display()));
        }
        Ok(path)
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.mode, Mode::Typing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fs::LocalFs;
    use std::fs;
    use std::path::Path;

    fn fixture() -> (tempfile::TempDir, LocalFs) {
        let tmp = tempfile::tempdir().unwrap();
        for dir in ["projects", "prometheus", "music", "music-videos"] {
            fs::create_dir(tmp.path().join(dir)).unwrap();
        }
        fs::write(tmp.path().join("profile.txt"), "x").unwrap();
        let lister = LocalFs::with_home(tmp.path());
        (tmp, lister)
    }

    fn type_text(input: &mut PathInput, text: &str, fs: &dyn FileSystem) {
        for c in text.chars() {
            input.handle_key(Key::char(c), fs);
        }
    }

    #[test]
    fn test_multiple_matches_enter_completion_mode() {
        let (_tmp, lister) = fixture();
        let mut input = PathInput::new(false);
        type_text(&mut input, "~/pro", &lister);
        input.handle_key(Key::new(KeyCode::Tab), &lister);

        match &input.mode {
            Mode::Completion(c) => {
                assert_eq!(c.candidates, vec!["projects", "prometheus"]);
                assert_eq!(c.highlighted, 0);
            }
            other => panic!("expected completion mode, got {:?}", other),
        }
        assert_eq!(input.buffer.text(), "~/pro");
    }

    #[test]
    fn test_single_match_splices_with_separator() {
        let (_tmp, lister) = fixture();
        let mut input = PathInput::new(false);
        type_text(&mut input, "~/proj", &lister);
        input.handle_key(Key::new(KeyCode::Tab), &lister);

        assert!(input.is_typing());
        assert_eq!(input.buffer.text(), "~/projects/");
        assert_eq!(input.buffer.cursor(), input.buffer.len());
    }

    #[test]
    fn test_no_match_sets_error_and_stays_typing() {
        let (_tmp, lister) = fixture();
        let mut input = PathInput::new(false);
        type_text(&mut input, "~/zzz", &lister);
        input.handle_key(Key::new(KeyCode::Tab), &lister);

        assert!(input.is_typing());
        assert_eq!(input.error.as_deref(), Some(NO_MATCH_MESSAGE));
        assert_eq!(input.buffer.text(), "~/zzz");
    }

    #[test]
    fn test_completion_commit_and_escape() {
        let (_tmp, lister) = fixture();
        let mut input = PathInput::new(false);
        type_text(&mut input, "~/pro", &lister);
        input.handle_key(Key::new(KeyCode::Tab), &lister);
        input.handle_key(Key::new(KeyCode::Down), &lister);
        input.handle_key(Key::new(KeyCode::Enter), &lister);
        assert!(input.is_typing());
        assert_eq!(input.buffer.text(), "~/prometheus/");

        let mut input = PathInput::new(false);
        type_text(&mut input, "~/mu", &lister);
        input.handle_key(Key::new(KeyCode::Tab), &lister);
        input.handle_key(Key::new(KeyCode::Down), &lister);
        input.handle_key(Key::new(KeyCode::Esc), &lister);
        assert!(input.is_typing());
        assert_eq!(input.buffer.text(), "~/mu");
    }

    #[test]
    fn test_other_key_cancels_completion_and_is_typed() {
        let (_tmp, lister) = fixture();
        let mut input = PathInput::new(false);
        type_text(&mut input, "~/pro", &lister);
        input.handle_key(Key::new(KeyCode::Tab), &lister);
        input.handle_key(Key::char('j'), &lister);
        assert!(input.is_typing());
        assert_eq!(input.buffer.text(), "~/proj");
    }

    #[test]
    fn test_browser_escape_leaves_buffer_unchanged() {
        let (_tmp, lister) = fixture();
        let mut input = PathInput::new(false);
        type_text(&mut input, "~/mus", &lister);
        input.handle_key(Key::ctrl('b'), &lister);
        assert!(matches!(input.mode, Mode::Browser(_)));
        input.handle_key(Key::new(KeyCode::Down), &lister);
        input.handle_key(Key::new(KeyCode::Down), &lister);
        input.handle_key(Key::new(KeyCode::Enter), &lister);
        input.handle_key(Key::new(KeyCode::Esc), &lister);
        assert!(input.is_typing());
        assert_eq!(input.buffer.text(), "~/mus");
    }

    #[test]
    fn test_browser_select_commits_root() {
        let (tmp, lister) = fixture();
        let mut input = PathInput::new(false);
        input.handle_key(Key::ctrl('b'), &lister);
        // rows: select, ../, music, music-videos, projects, prometheus
        for _ in 0..4 {
            input.handle_key(Key::new(KeyCode::Down), &lister);
        }
        input.handle_key(Key::new(KeyCode::Enter), &lister);
        input.handle_key(Key::new(KeyCode::Enter), &lister);
        assert!(input.is_typing());
        assert_eq!(
            input.buffer.text(),
            tmp.path().join("projects").to_string_lossy()
        );
    }

    #[test]
    fn test_submit_rejects_missing_and_empty() {
        let (_tmp, lister) = fixture();
        let mut input = PathInput::new(false);
        assert_eq!(
            input.handle_key(Key::new(KeyCode::Enter), &lister),
            PathInputOutcome::Consumed
        );
        assert_eq!(input.error.as_deref(), Some("Path cannot be empty"));

        type_text(&mut input, "~/nope", &lister);
        input.handle_key(Key::new(KeyCode::Enter), &lister);
        assert!(input.error.as_deref().unwrap().starts_with("Directory does not exist"));

        input.reset("~/profile.txt");
        input.handle_key(Key::new(KeyCode::Enter), &lister);
        assert!(input.error.as_deref().unwrap().starts_with("Not a directory"));
    }

    #[test]
    fn test_submit_existing_directory_clears_error() {
        let (tmp, lister) = fixture();
        let mut input = PathInput::new(false);
        input.error = Some("stale".into());
        input.reset("~/music");
        input.error = Some("stale".into());
        let outcome = input.handle_key(Key::new(KeyCode::Enter), &lister);
        assert_eq!(outcome, PathInputOutcome::Submitted(tmp.path().join("music")));
        assert!(input.error.is_none());
    }

    /// Filesystem with a fixed set of paths and no disk access.
    struct MemFs {
        dirs: Vec<PathBuf>,
        files: Vec<PathBuf>,
    }

    impl FileSystem for MemFs {
        fn home_dir(&self) -> PathBuf {
            PathBuf::from("/home/dev")
        }

        fn list_dirs(&self, _dir: &Path, _prefix: &str, _show_hidden: bool) -> Vec<String> {
            Vec::new()
        }

        fn is_dir(&self, path: &Path) -> bool {
            self.dirs.iter().any(|d| d == path)
        }

        fn exists(&self, path: &Path) -> bool {
            self.is_dir(path) || self.files.iter().any(|f| f == path)
        }
    }

    #[test]
    fn test_validate_asks_the_filesystem() {
        let fs = MemFs {
            dirs: vec![PathBuf::from("/home/dev/work")],
            files: vec![PathBuf::from("/home/dev/notes")],
        };
        let mut input = PathInput::new(false);

        input.reset("~/work");
        assert_eq!(input.validate(&fs), Ok(PathBuf::from("/home/dev/work")));

        input.reset("~/notes");
        assert_eq!(
            input.validate(&fs),
            Err("Not a directory: /home/dev/notes".to_string())
        );

        input.reset("~/gone");
        assert_eq!(
            input.validate(&fs),
            Err("Directory does not exist: /home/dev/gone".to_string())
        );
    }

    #[test]
    fn test_escape_in_typing_is_unhandled() {
        let (_tmp, lister) = fixture();
        let mut input = PathInput::new(false);
        assert_eq!(
            input.handle_key(Key::new(KeyCode::Esc), &lister),
            PathInputOutcome::Unhandled
        );
    }
}

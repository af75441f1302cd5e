//! Drill-in/drill-out directory browser.
//!
//! The browser never touches the line buffer while navigating. Only an explicit
//! "select this directory" hands a path back to the owner.

use std::path::{Path, PathBuf};

use log::debug;

use crate::core::fs::{FileSystem, resolve_path};
use crate::core::key::{Key, KeyCode};

/// One row of the browser list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserRow<'a> {
    SelectHere,
    Parent,
    Dir(&'a str),
}

/// What the owner should do after a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserOutcome {
    Stay,
    Commit(PathBuf),
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Browser {
    pub root: PathBuf,
    pub entries: Vec<String>,
    pub cursor: usize,
    pub show_hidden: bool,
}

/// Number of synthetic rows above the child directories.
const FIXED_ROWS: usize = 2;

impl Browser {
    /// Open at the directory named by `input`: the path itself when it is a
    /// directory, else its nearest existing ancestor, else home.
    pub fn open(input: &str, fs: &dyn FileSystem, show_hidden: bool) -> Self {
        let home = fs.home_dir();
        let trimmed = input.trim();
        let root = if trimmed.is_empty() {
            home
        } else {
            let wanted = resolve_path(trimmed, &home);
            wanted
                .ancestors()
                .find(|p| !p.as_os_str().is_empty() && fs.is_dir(p))
                .map(Path::to_path_buf)
                .unwrap_or(home)
        };
        debug!("Browser opened at {}", root.display());

        let mut browser = Self {
            root,
            entries: Vec::new(),
            cursor: 0,
            show_hidden,
        };
        browser.relist(fs);
        browser
    }

    pub fn rows(&self) -> Vec<BrowserRow<'_>> {
        let mut rows = vec![BrowserRow::SelectHere, BrowserRow::Parent];
        rows.extend(self.entries.iter().map(|e| BrowserRow::Dir(e.as_str())));
        rows
    }

    pub fn row_count(&self) -> usize {
        self.entries.len() + FIXED_ROWS
    }

    fn relist(&mut self, fs: &dyn FileSystem) {
        self.entries = fs.list_dirs(&self.root, "", self.show_hidden);
        self.cursor = self.cursor.min(self.row_count() - 1);
    }

    fn reroot(&mut self, root: PathBuf, fs: &dyn FileSystem) {
        self.root = root;
        self.cursor = 0;
        self.relist(fs);
    }

    fn go_parent(&mut self, fs: &dyn FileSystem) {
        if let Some(parent) = self.root.parent() {
            let parent = parent.to_path_buf();
            self.reroot(parent, fs);
        }
    }

    fn activate(&mut self, fs: &dyn FileSystem) -> BrowserOutcome {
        if self.cursor == 0 {
            return BrowserOutcome::Commit(self.root.clone());
        }
        if self.cursor == 1 {
            self.go_parent(fs);
            return BrowserOutcome::Stay;
        }
        if let Some(name) = self.entries.get(self.cursor - FIXED_ROWS) {
            let child = self.root.join(name);
            self.reroot(child, fs);
        }
        BrowserOutcome::Stay
    }

    pub fn handle_key(&mut self, key: Key, fs: &dyn FileSystem) -> BrowserOutcome {
        if key.is_up() {
            self.cursor = self.cursor.saturating_sub(1);
            return BrowserOutcome::Stay;
        }
        if key.is_down() {
            self.cursor = (self.cursor + 1).min(self.row_count() - 1);
            return BrowserOutcome::Stay;
        }
        match (key.code, key.plain_char()) {
            (KeyCode::Esc, _) => BrowserOutcome::Cancel,
            (KeyCode::Enter | KeyCode::Right, _) | (_, Some('l')) => self.activate(fs),
            (KeyCode::Left, _) | (_, Some('h')) => {
                self.go_parent(fs);
                BrowserOutcome::Stay
            }
            (_, Some('.')) => {
                self.show_hidden = !self.show_hidden;
                self.relist(fs);
                BrowserOutcome::Stay
            }
            _ => BrowserOutcome::Stay,
        }
    }
}

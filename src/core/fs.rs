//! # Filesystem Listing
//!
//! The one piece of I/O the core performs inline: reading directory names for
//! tab completion and the directory browser. Behind a trait so the `App` can
//! carry it the same way it carries its other collaborators.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

pub trait FileSystem: Send + Sync {
    /// The user's home directory, used for `~` expansion and empty input.
    fn home_dir(&self) -> PathBuf;

    /// Immediate child directories of `dir` whose name starts with `prefix`
    /// (case-insensitive), sorted. Symlinks that resolve to directories count.
    /// Dotfiles are excluded unless `show_hidden`. Unreadable dirs yield nothing.
    fn list_dirs(&self, dir: &Path, prefix: &str, show_hidden: bool) -> Vec<String>;

    /// True if `path` exists and is (or links to) a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// True if anything exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}

/// The real filesystem.
pub struct LocalFs {
    home: PathBuf,
}

impl LocalFs {
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
        Self { home }
    }

    /// Local filesystem with an explicit home directory.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFs {
    fn home_dir(&self) -> PathBuf {
        self.home.clone()
    }

    fn list_dirs(&self, dir: &Path, prefix: &str, show_hidden: bool) -> Vec<String> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot list {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        let prefix = prefix.to_lowercase();
        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') && !show_hidden {
                    return None;
                }
                if !name.to_lowercase().starts_with(&prefix) {
                    return None;
                }
                // fs::metadata follows symlinks, DirEntry::file_type does not
                let is_dir = fs::metadata(entry.path()).is_ok_and(|m| m.is_dir());
                is_dir.then_some(name)
            })
            .collect();

        names.sort();
        names
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Expand a leading `~` and make the path absolute against the current dir.
pub fn resolve_path(input: &str, home: &Path) -> PathBuf {
    let expanded = if input == "~" {
        home.to_path_buf()
    } else if let Some(rest) = input.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(input)
    };

    if expanded.is_absolute() {
        expanded
    } else {
        std::path::absolute(&expanded).unwrap_or(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_dirs_filters_files_and_hidden() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("projects")).unwrap();
        fs::create_dir(tmp.path().join(".config")).unwrap();
        fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        let lister = LocalFs::with_home(tmp.path());
        assert_eq!(lister.list_dirs(tmp.path(), "", false), vec!["projects"]);
        assert_eq!(
            lister.list_dirs(tmp.path(), "", true),
            vec![".config", "projects"]
        );
    }

    #[test]
    fn test_list_dirs_prefix_is_case_insensitive_and_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["prometheus", "Projects", "other"] {
            fs::create_dir(tmp.path().join(name)).unwrap();
        }
        let lister = LocalFs::with_home(tmp.path());
        assert_eq!(
            lister.list_dirs(tmp.path(), "PRO", false),
            vec!["Projects", "prometheus"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_list_dirs_follows_symlinks_to_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("real")).unwrap();
        fs::write(tmp.path().join("file"), "x").unwrap();
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("file"), tmp.path().join("filelink")).unwrap();

        let lister = LocalFs::with_home(tmp.path());
        assert_eq!(lister.list_dirs(tmp.path(), "", false), vec!["link", "real"]);
    }

    #[test]
    fn test_unreadable_dir_lists_nothing() {
        let lister = LocalFs::with_home("/");
        assert!(lister
            .list_dirs(Path::new("/definitely/not/here"), "", false)
            .is_empty());
    }

    #[test]
    fn test_resolve_path_expands_tilde() {
        let home = Path::new("/home/tester");
        assert_eq!(resolve_path("~", home), PathBuf::from("/home/tester"));
        assert_eq!(resolve_path("~/code", home), PathBuf::from("/home/tester/code"));
        assert_eq!(resolve_path("/tmp", home), PathBuf::from("/tmp"));
        assert!(resolve_path("relative", home).is_absolute());
    }
}

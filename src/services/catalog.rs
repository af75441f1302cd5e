use std::fmt;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use tokio::process::Command;

use crate::core::config::ResolvedConfig;
use crate::core::skills::{SkillInfo, SkillOp};

pub const INDEX_FILE: &str = "catalog.toml";

#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// A requested skill is not in the catalog index.
    UnknownSkill(String),
    /// An external command (git) failed.
    Command(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "catalog I/O error: {e}"),
            CatalogError::Parse(e) => write!(f, "catalog index error: {e}"),
            CatalogError::UnknownSkill(name) => write!(f, "unknown skill: {name}"),
            CatalogError::Command(msg) => write!(f, "catalog update failed: {msg}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        CatalogError::Io(e)
    }
}

#[async_trait]
pub trait SkillCatalog: Send + Sync {
    async fn list(&self) -> Result<Vec<SkillInfo>, CatalogError>;

    /// Installs the named skills and returns a one-line summary.
    async fn install(&self, names: &[String]) -> Result<String, CatalogError>;

    /// Removes the named skills and returns a one-line summary.
    async fn remove(&self, names: &[String]) -> Result<String, CatalogError>;

    /// Refreshes the catalog from upstream and returns a one-line summary.
    async fn update(&self) -> Result<String, CatalogError>;
}

#[derive(Debug, Deserialize)]
struct CatalogIndex {
    #[serde(default, rename = "skill")]
    skills: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_category")]
    category: String,
    /// Directory inside the catalog; defaults to `name`.
    path: Option<PathBuf>,
}

fn default_category() -> String {
    "other".to_string()
}

/// A catalog checked out on disk. Skills are installed as symlinks from the
/// install directory into the catalog.
///
/// ```text
/// <catalog_dir>/catalog.toml      [[skill]] name, description, category, path
/// <catalog_dir>/<path>/...        skill contents
/// <install_dir>/<name> -> <catalog_dir>/<path>
/// ```
pub struct FsSkillCatalog {
    catalog_dir: PathBuf,
    install_dir: PathBuf,
}

impl FsSkillCatalog {
    pub fn new(catalog_dir: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
        Self {
            catalog_dir: catalog_dir.into(),
            install_dir: install_dir.into(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(&config.catalog_dir, &config.install_dir)
    }

    async fn load_index(&self) -> Result<CatalogIndex, CatalogError> {
        let path = self.catalog_dir.join(INDEX_FILE);
        let contents = tokio::fs::read_to_string(&path).await?;
        let index: CatalogIndex = toml::from_str(&contents).map_err(CatalogError::Parse)?;
        debug!("Catalog index {} lists {} skills", path.display(), index.skills.len());
        Ok(index)
    }

    fn installed_path(&self, name: &str) -> PathBuf {
        self.install_dir.join(name)
    }
}

async fn exists(path: &Path) -> bool {
    tokio::fs::symlink_metadata(path).await.is_ok()
}

fn summary(op: SkillOp, count: usize) -> String {
    let noun = if count == 1 { "skill" } else { "skills" };
    format!("{} {count} {noun}", op.verb())
}

#[async_trait]
impl SkillCatalog for FsSkillCatalog {
    async fn list(&self) -> Result<Vec<SkillInfo>, CatalogError> {
        let index = self.load_index().await?;
        let mut skills = Vec::with_capacity(index.skills.len());
        for entry in index.skills {
            let installed = exists(&self.installed_path(&entry.name)).await;
            skills.push(SkillInfo {
                name: entry.name,
                description: entry.description,
                category: entry.category,
                installed,
            });
        }
        Ok(skills)
    }

    async fn install(&self, names: &[String]) -> Result<String, CatalogError> {
        let index = self.load_index().await?;
        tokio::fs::create_dir_all(&self.install_dir).await?;

        let mut count = 0;
        for name in names {
            let entry = index
                .skills
                .iter()
                .find(|e| &e.name == name)
                .ok_or_else(|| CatalogError::UnknownSkill(name.clone()))?;
            let target = self.installed_path(name);
            if exists(&target).await {
                debug!("Skill '{}' already installed", name);
                continue;
            }
            let source = self
                .catalog_dir
                .join(entry.path.as_deref().unwrap_or(Path::new(name)));
            link_dir(&source, &target).await?;
            info!("Installed skill '{}' -> {}", name, source.display());
            count += 1;
        }
        Ok(summary(SkillOp::Install, count))
    }

    async fn remove(&self, names: &[String]) -> Result<String, CatalogError> {
        let mut count = 0;
        for name in names {
            let target = self.installed_path(name);
            let Ok(meta) = tokio::fs::symlink_metadata(&target).await else {
                debug!("Skill '{}' not installed, nothing to remove", name);
                continue;
            };
            if meta.is_dir() {
                tokio::fs::remove_dir_all(&target).await?;
            } else {
                tokio::fs::remove_file(&target).await?;
            }
            info!("Removed skill '{}'", name);
            count += 1;
        }
        Ok(summary(SkillOp::Remove, count))
    }

    async fn update(&self) -> Result<String, CatalogError> {
        info!("Updating catalog at {}", self.catalog_dir.display());
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.catalog_dir)
            .args(["pull", "--ff-only"])
            .output()
            .await
            .map_err(|e| CatalogError::Command(e.to_string()))?;

        if output.status.success() {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let last = stdout.lines().last().unwrap_or("").trim();
            Ok(if last.is_empty() {
                "Catalog updated".to_string()
            } else {
                format!("Catalog updated: {last}")
            })
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("git pull failed: {}", stderr);
            Err(CatalogError::Command(stderr))
        }
    }
}

#[cfg(unix)]
async fn link_dir(source: &Path, target: &Path) -> std::io::Result<()> {
    tokio::fs::symlink(source, target).await
}

#[cfg(windows)]
async fn link_dir(source: &Path, target: &Path) -> std::io::Result<()> {
    tokio::fs::symlink_dir(source, target).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
[[skill]]
name = "git-pr"
description = "Pull request descriptions"
category = "git"

[[skill]]
name = "tdd"
description = "Test-driven development"
category = "testing"
path = "testing/tdd"
"#;

    fn fixture() -> (tempfile::TempDir, FsSkillCatalog) {
        let root = tempfile::tempdir().unwrap();
        let catalog = root.path().join("catalog");
        std::fs::create_dir_all(catalog.join("git-pr")).unwrap();
        std::fs::create_dir_all(catalog.join("testing/tdd")).unwrap();
        std::fs::write(catalog.join(INDEX_FILE), INDEX).unwrap();
        let fs_catalog = FsSkillCatalog::new(catalog, root.path().join("skills"));
        (root, fs_catalog)
    }

    #[tokio::test]
    async fn test_list_reads_index() {
        let (_root, catalog) = fixture();
        let skills = catalog.list().await.unwrap();
        assert_eq!(skills.len(), 2);
        assert_eq!(skills[0].name, "git-pr");
        assert_eq!(skills[1].category, "testing");
        assert!(skills.iter().all(|s| !s.installed));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_install_then_remove() {
        let (root, catalog) = fixture();
        let names = vec!["tdd".to_string(), "git-pr".to_string()];
        assert_eq!(catalog.install(&names).await.unwrap(), "Installed 2 skills");

        let link = root.path().join("skills/tdd");
        let target = std::fs::read_link(&link).unwrap();
        assert!(target.ends_with("testing/tdd"));
        assert!(catalog.list().await.unwrap().iter().all(|s| s.installed));

        // Installing again is a no-op.
        assert_eq!(catalog.install(&names).await.unwrap(), "Installed 0 skills");

        let removed = catalog.remove(&["tdd".to_string()]).await.unwrap();
        assert_eq!(removed, "Removed 1 skill");
        assert!(!link.exists());
        // The catalog copy is untouched.
        assert!(root.path().join("catalog/testing/tdd").is_dir());
    }

    #[tokio::test]
    async fn test_install_unknown_skill_fails() {
        let (_root, catalog) = fixture();
        let err = catalog.install(&["nope".to_string()]).await.unwrap_err();
        assert!(matches!(err, CatalogError::UnknownSkill(ref n) if n == "nope"));
        assert_eq!(err.to_string(), "unknown skill: nope");
    }

    #[tokio::test]
    async fn test_missing_index_is_io_error() {
        let root = tempfile::tempdir().unwrap();
        let catalog = FsSkillCatalog::new(root.path().join("none"), root.path().join("skills"));
        assert!(matches!(catalog.list().await, Err(CatalogError::Io(_))));
    }

    #[tokio::test]
    async fn test_malformed_index_is_parse_error() {
        let (root, catalog) = fixture();
        std::fs::write(root.path().join("catalog").join(INDEX_FILE), "[[skill]\n").unwrap();
        assert!(matches!(catalog.list().await, Err(CatalogError::Parse(_))));
    }

    #[tokio::test]
    async fn test_update_outside_git_repo_fails() {
        let (_root, catalog) = fixture();
        assert!(catalog.update().await.is_err());
    }
}

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.gearup/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Step commands are keyed by step key (`shell.fish`, `ai.claude-code`, ...).
//! A step with no command configured is reported as skipped.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GearupConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub skills: SkillsConfig,
    #[serde(default)]
    pub steps: BTreeMap<String, StepConfig>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub show_hidden: Option<bool>,
    pub dry_run: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SkillsConfig {
    pub catalog_dir: Option<PathBuf>,
    pub install_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct StepConfig {
    pub command: Option<String>,
    /// Needs the real terminal (password prompts, installers asking questions).
    #[serde(default)]
    pub interactive: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const CONFIG_DIR: &str = ".gearup";
pub const CONFIG_FILE: &str = "config.toml";
pub const LOG_FILE: &str = "gearup.log";
pub const DEFAULT_CATALOG_DIR: &str = "catalog";
pub const DEFAULT_INSTALL_DIR: &str = "skills";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub show_hidden: bool,
    pub dry_run: bool,
    pub catalog_dir: PathBuf,
    pub install_dir: PathBuf,
    pub steps: BTreeMap<String, StepConfig>,
}

/// CLI flags that take part in resolution. `None`/`false` = not given.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dry_run: bool,
    pub show_hidden: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.gearup`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(CONFIG_DIR))
}

/// Returns the path to `~/.gearup/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join(CONFIG_FILE))
}

/// Load config from `path`, or `~/.gearup/config.toml` when `None`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `GearupConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<GearupConfig, ConfigError> {
    let path = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(GearupConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(GearupConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<GearupConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# gearup configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# show_hidden = false       # list dot-directories in path completion
# dry_run = false           # log step commands instead of running them

# [skills]
# catalog_dir = "~/.gearup/catalog"   # Or set GEARUP_CATALOG_DIR
# install_dir = "~/.gearup/skills"    # Or set GEARUP_SKILLS_DIR

# Commands run for each install step, keyed by step.
# Choices are exported as GEARUP_* environment variables.
#
# [steps."shell.fish"]
# command = "brew install fish"
#
# [steps."os.linux"]
# command = "sudo apt-get update"
# interactive = true        # hand the terminal to the command
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &GearupConfig, cli: &CliOverrides) -> ResolvedConfig {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"));
    let base = home.join(CONFIG_DIR);

    // Dry run: CLI → env → config → default
    let dry_run = cli.dry_run
        || env_flag("GEARUP_DRY_RUN")
            .or(config.general.dry_run)
            .unwrap_or(false);

    let show_hidden = cli.show_hidden || config.general.show_hidden.unwrap_or(false);

    // Catalog dir: env → config → default
    let catalog_dir = std::env::var("GEARUP_CATALOG_DIR")
        .ok()
        .map(PathBuf::from)
        .or_else(|| config.skills.catalog_dir.clone())
        .map(|p| expand_home(&p, &home))
        .unwrap_or_else(|| base.join(DEFAULT_CATALOG_DIR));

    // Install dir: env → config → default
    let install_dir = std::env::var("GEARUP_SKILLS_DIR")
        .ok()
        .map(PathBuf::from)
        .or_else(|| config.skills.install_dir.clone())
        .map(|p| expand_home(&p, &home))
        .unwrap_or_else(|| base.join(DEFAULT_INSTALL_DIR));

    let resolved = ResolvedConfig {
        show_hidden,
        dry_run,
        catalog_dir,
        install_dir,
        steps: config.steps.clone(),
    };
    info!(
        "Resolved config: dry_run={}, show_hidden={}, catalog={}, skills={}, {} step commands",
        resolved.dry_run,
        resolved.show_hidden,
        resolved.catalog_dir.display(),
        resolved.install_dir.display(),
        resolved.steps.len()
    );
    resolved
}

fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        other => {
            warn!("Ignoring {}={:?}: not a boolean", name, other);
            None
        }
    }
}

fn expand_home(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

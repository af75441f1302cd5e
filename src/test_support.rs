//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::core::choices::UserChoices;
use crate::core::fs::LocalFs;
use crate::core::plan::InstallStep;
use crate::core::skills::SkillInfo;
use crate::core::state::App;
use crate::services::{CatalogError, SkillCatalog, StepError, StepRunner};

/// Creates a test App on the real filesystem.
pub fn test_app() -> App {
    App::new(Arc::new(LocalFs::new()), false)
}

/// Creates a test App whose `~` is `home`.
pub fn test_app_with_home(home: &Path) -> App {
    App::new(Arc::new(LocalFs::with_home(home)), false)
}

/// A step runner that logs one line per step and fails the steps listed in
/// `failing` (by key). Steps in `interactive` want the terminal.
#[derive(Default)]
pub struct FakeRunner {
    pub failing: Vec<String>,
    pub interactive: Vec<String>,
    pub ran: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub fn failing(keys: &[&str]) -> Self {
        Self {
            failing: keys.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn interactive(keys: &[&str]) -> Self {
        Self {
            interactive: keys.iter().map(|k| k.to_string()).collect(),
            ..Default::default()
        }
    }

    fn record(&self, step: &InstallStep) {
        if let Ok(mut ran) = self.ran.lock() {
            ran.push(step.key.clone());
        }
    }

    pub fn ran(&self) -> Vec<String> {
        self.ran.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl StepRunner for FakeRunner {
    fn name(&self) -> &str {
        "fake"
    }

    fn needs_terminal(&self, step: &InstallStep) -> bool {
        self.interactive.contains(&step.key)
    }

    async fn run(
        &self,
        step: &InstallStep,
        _choices: &UserChoices,
        log: Sender<String>,
    ) -> Result<(), StepError> {
        self.record(step);
        let _ = log.send(format!("running {}", step.key)).await;
        if self.failing.contains(&step.key) {
            return Err(StepError::Failed {
                status: Some(1),
                output: format!("{} broke", step.key),
            });
        }
        Ok(())
    }

    fn run_interactive(&self, step: &InstallStep, _choices: &UserChoices) -> Result<(), StepError> {
        if !self.interactive.contains(&step.key) {
            return Err(StepError::Spawn(format!("'{}' is not interactive", step.key)));
        }
        self.record(step);
        Ok(())
    }
}

/// An in-memory skill catalog.
pub struct FakeCatalog {
    pub skills: Mutex<Vec<SkillInfo>>,
}

impl FakeCatalog {
    pub fn new(skills: Vec<SkillInfo>) -> Self {
        Self {
            skills: Mutex::new(skills),
        }
    }

    fn set_installed(&self, names: &[String], installed: bool) -> usize {
        let Ok(mut skills) = self.skills.lock() else {
            return 0;
        };
        let mut count = 0;
        for skill in skills.iter_mut().filter(|s| names.contains(&s.name)) {
            skill.installed = installed;
            count += 1;
        }
        count
    }
}

#[async_trait]
impl SkillCatalog for FakeCatalog {
    async fn list(&self) -> Result<Vec<SkillInfo>, CatalogError> {
        Ok(self.skills.lock().map(|s| s.clone()).unwrap_or_default())
    }

    async fn install(&self, names: &[String]) -> Result<String, CatalogError> {
        let count = self.set_installed(names, true);
        Ok(format!("Installed {count}"))
    }

    async fn remove(&self, names: &[String]) -> Result<String, CatalogError> {
        let count = self.set_installed(names, false);
        Ok(format!("Removed {count}"))
    }

    async fn update(&self) -> Result<String, CatalogError> {
        Err(CatalogError::Command("offline".to_string()))
    }
}

pub fn skill(name: &str, category: &str, installed: bool) -> SkillInfo {
    SkillInfo {
        name: name.to_string(),
        description: String::new(),
        category: category.to_string(),
        installed,
    }
}

//! # Step Plans
//!
//! Turn confirmed choices into the ordered list of steps handed to the step
//! runner. The engine runs them one at a time and stops at the first failure.

use crate::core::choices::{CiProvider, MemoryModule, Multiplexer, ProjectChoices, Shell, Terminal, UserChoices};

/// One unit of work for the step runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    /// Stable identifier, also the config key for the step's command.
    pub key: String,
    /// Human-readable name shown in progress and failure screens.
    pub name: String,
}

impl InstallStep {
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

pub fn install_plan(choices: &UserChoices) -> Vec<InstallStep> {
    let mut steps = Vec::new();

    if let Some(os) = choices.os {
        steps.push(InstallStep::new(
            format!("os.{}", os.key()),
            format!("Prepare {}", os.label()),
        ));
    }
    if choices.backup == Some(true) {
        steps.push(InstallStep::new("backup", "Back up existing configuration"));
    }
    if let Some(terminal) = choices.terminal
        && terminal != Terminal::None
    {
        steps.push(InstallStep::new(
            format!("terminal.{}", terminal.key()),
            format!("Install {}", terminal.label()),
        ));
    }
    if choices.nerd_font == Some(true) {
        steps.push(InstallStep::new("font.nerd", "Install Nerd Font"));
    }
    if let Some(shell) = choices.shell
        && shell != Shell::Keep
    {
        steps.push(InstallStep::new(
            format!("shell.{}", shell.key()),
            format!("Install {}", shell.label()),
        ));
    }
    if let Some(mux) = choices.multiplexer
        && mux != Multiplexer::None
    {
        steps.push(InstallStep::new(
            format!("multiplexer.{}", mux.key()),
            format!("Install {}", mux.label()),
        ));
    }
    if choices.neovim == Some(true) {
        steps.push(InstallStep::new("editor.neovim", "Install Neovim configuration"));
    }
    for tool in &choices.ai_tools {
        steps.push(InstallStep::new(
            format!("ai.{}", tool.key()),
            format!("Install {}", tool.label()),
        ));
    }
    if choices.install_framework == Some(true) && !choices.framework_modules.is_empty() {
        steps.push(InstallStep::new(
            "ai.framework",
            format!(
                "Install AI framework ({} modules)",
                choices.framework_modules.len()
            ),
        ));
    }

    steps
}

pub fn project_plan(project: &ProjectChoices) -> Vec<InstallStep> {
    let mut steps = Vec::new();

    if let Some(stack) = project.stack {
        steps.push(InstallStep::new(
            format!("project.stack.{}", stack.key()),
            format!("Scaffold project files ({})", stack.label()),
        ));
    }
    if let Some(memory) = project.memory
        && memory != MemoryModule::None
    {
        steps.push(InstallStep::new(
            format!("project.memory.{}", memory.key()),
            format!("Set up {}", memory.label()),
        ));
    }
    if project.obsidian_plugin == Some(true) {
        steps.push(InstallStep::new(
            "project.memory.obsidian-plugin",
            "Install Obsidian plugin",
        ));
    }
    if let Some(ci) = project.ci
        && ci != CiProvider::None
    {
        steps.push(InstallStep::new(
            format!("project.ci.{}", ci.key()),
            format!("Add {} workflow", ci.label()),
        ));
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::choices::{AiTool, Os, ProjectStack};

    #[test]
    fn test_install_plan_skips_keep_and_none() {
        let choices = UserChoices {
            os: Some(Os::MacOs),
            terminal: Some(Terminal::None),
            shell: Some(Shell::Keep),
            multiplexer: Some(Multiplexer::Tmux),
            ai_tools: vec![AiTool::OpenCode],
            backup: Some(false),
            ..Default::default()
        };
        let keys: Vec<String> = install_plan(&choices).into_iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["os.macos", "multiplexer.tmux", "ai.opencode"]);
    }

    #[test]
    fn test_framework_step_needs_modules() {
        let mut choices = UserChoices {
            install_framework: Some(true),
            ..Default::default()
        };
        assert!(install_plan(&choices).is_empty());
        choices.framework_modules = vec!["git-pr".into()];
        let plan = install_plan(&choices);
        assert_eq!(plan[0].key, "ai.framework");
        assert_eq!(plan[0].name, "Install AI framework (1 modules)");
    }

    #[test]
    fn test_project_plan_order() {
        let project = ProjectChoices {
            path: None,
            stack: Some(ProjectStack::Rust),
            memory: Some(MemoryModule::Obsidian),
            obsidian_plugin: Some(true),
            ci: Some(CiProvider::GitHub),
        };
        let keys: Vec<String> = project_plan(&project).into_iter().map(|s| s.key).collect();
        assert_eq!(
            keys,
            vec![
                "project.stack.rust",
                "project.memory.obsidian",
                "project.memory.obsidian-plugin",
                "project.ci.github"
            ]
        );
    }
}

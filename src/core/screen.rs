//! # Screens
//!
//! The closed set of screens and the "back" relation between them.
//!
//! Back is not a stack pop. Several forward paths skip screens depending on
//! earlier answers, so each screen's predecessor is computed from the choices
//! made so far by [`predecessor_of`].

use crate::core::choices::{FrameworkPreset, MemoryModule, Os, Terminal, UserChoices};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Welcome,
    MainMenu,
    Help,

    // Installer
    OsSelect,
    TerminalSelect,
    GhosttyWarning,
    FontSelect,
    ShellSelect,
    MultiplexerSelect,
    EditorSelect,
    AiToolsPrompt,
    AiToolsSelect,
    AiFrameworkConfirm,
    AiFrameworkPreset,
    AiFrameworkCategories,
    AiFrameworkCategoryItems,
    BackupConfirm,
    InstallSummary,
    Installing,
    InstallComplete,
    InstallError,

    // Skills
    SkillMenu,
    SkillLoading,
    SkillBrowse,
    SkillInstall,
    SkillRemove,
    SkillApplying,
    SkillResult,

    // Project initialization
    ProjectPath,
    ProjectStack,
    ProjectMemory,
    ProjectObsidianInstall,
    ProjectCi,
    ProjectConfirm,
    ProjectInstalling,
    ProjectResult,

    // Trainer
    TrainerMenu,
    TrainerLesson,
    TrainerResult,
}

/// Screens where the leader key is ordinary input (typing, toggling).
/// This table is fixed; it is not derived from what a screen renders.
pub const LEADER_DENY_LIST: &[Screen] = &[
    Screen::ProjectPath,
    Screen::AiToolsSelect,
    Screen::AiFrameworkCategoryItems,
    Screen::SkillInstall,
    Screen::SkillRemove,
    Screen::TrainerLesson,
];

impl Screen {
    pub fn title(self) -> &'static str {
        match self {
            Screen::Welcome => "Welcome",
            Screen::MainMenu => "Main menu",
            Screen::Help => "Help",
            Screen::OsSelect => "Operating system",
            Screen::TerminalSelect => "Terminal emulator",
            Screen::GhosttyWarning => "Ghostty on Linux",
            Screen::FontSelect => "Nerd Font",
            Screen::ShellSelect => "Shell",
            Screen::MultiplexerSelect => "Terminal multiplexer",
            Screen::EditorSelect => "Editor",
            Screen::AiToolsPrompt => "AI tools",
            Screen::AiToolsSelect => "Choose AI tools",
            Screen::AiFrameworkConfirm => "AI framework",
            Screen::AiFrameworkPreset => "Framework preset",
            Screen::AiFrameworkCategories => "Framework modules",
            Screen::AiFrameworkCategoryItems => "Framework modules",
            Screen::BackupConfirm => "Backup",
            Screen::InstallSummary => "Ready to install",
            Screen::Installing => "Installing",
            Screen::InstallComplete => "Installation complete",
            Screen::InstallError => "Installation failed",
            Screen::SkillMenu => "Skills",
            Screen::SkillLoading => "Skills",
            Screen::SkillBrowse => "Skill catalog",
            Screen::SkillInstall => "Install skills",
            Screen::SkillRemove => "Remove skills",
            Screen::SkillApplying => "Skills",
            Screen::SkillResult => "Skills",
            Screen::ProjectPath => "Project directory",
            Screen::ProjectStack => "Project stack",
            Screen::ProjectMemory => "Memory module",
            Screen::ProjectObsidianInstall => "Obsidian plugin",
            Screen::ProjectCi => "Continuous integration",
            Screen::ProjectConfirm => "Initialize project",
            Screen::ProjectInstalling => "Initializing project",
            Screen::ProjectResult => "Project",
            Screen::TrainerMenu => "Trainer",
            Screen::TrainerLesson => "Trainer",
            Screen::TrainerResult => "Trainer",
        }
    }

    /// Waiting on a collaborator. Only Ctrl+C is honored on these screens.
    pub fn is_loading(self) -> bool {
        matches!(
            self,
            Screen::Installing
                | Screen::ProjectInstalling
                | Screen::SkillLoading
                | Screen::SkillApplying
        )
    }

    pub fn allows_leader(self) -> bool {
        !LEADER_DENY_LIST.contains(&self) && !self.is_loading()
    }
}

/// Where "back" goes from `screen`, given what has been chosen.
///
/// Returns `None` when there is no back from this screen: the welcome screen
/// (back quits), loading screens, and `Help` (which returns to the screen it
/// was opened from and is handled by the caller).
pub fn predecessor_of(screen: Screen, choices: &UserChoices) -> Option<Screen> {
    use Screen::*;

    let prev = match screen {
        Welcome | Help => return None,
        Installing | ProjectInstalling | SkillLoading | SkillApplying => return None,

        MainMenu => Welcome,

        OsSelect => MainMenu,
        TerminalSelect => OsSelect,
        GhosttyWarning => TerminalSelect,
        FontSelect => {
            if choices.terminal == Some(Terminal::Ghostty) && choices.os == Some(Os::Linux) {
                GhosttyWarning
            } else {
                TerminalSelect
            }
        }
        ShellSelect => {
            if choices.os == Some(Os::Termux) {
                OsSelect
            } else if choices.terminal == Some(Terminal::None) {
                TerminalSelect
            } else {
                FontSelect
            }
        }
        MultiplexerSelect => ShellSelect,
        EditorSelect => MultiplexerSelect,
        AiToolsPrompt => EditorSelect,
        AiToolsSelect => AiToolsPrompt,
        AiFrameworkConfirm => AiToolsSelect,
        AiFrameworkPreset => AiFrameworkConfirm,
        AiFrameworkCategories => AiFrameworkPreset,
        AiFrameworkCategoryItems => AiFrameworkCategories,
        BackupConfirm => {
            if choices.install_ai_tools == Some(false) {
                AiToolsPrompt
            } else if choices.install_framework == Some(false) {
                AiFrameworkConfirm
            } else if choices.framework_preset == Some(FrameworkPreset::Custom) {
                AiFrameworkCategories
            } else {
                AiFrameworkPreset
            }
        }
        InstallSummary => BackupConfirm,
        InstallComplete | InstallError => MainMenu,

        SkillMenu => MainMenu,
        SkillBrowse | SkillInstall | SkillRemove | SkillResult => SkillMenu,

        ProjectPath => MainMenu,
        ProjectStack => ProjectPath,
        ProjectMemory => ProjectStack,
        ProjectObsidianInstall => ProjectMemory,
        ProjectCi => {
            if choices.project.memory == Some(MemoryModule::Obsidian) {
                ProjectObsidianInstall
            } else {
                ProjectMemory
            }
        }
        ProjectConfirm => ProjectCi,
        ProjectResult => MainMenu,

        TrainerMenu => MainMenu,
        TrainerLesson | TrainerResult => TrainerMenu,
    };
    Some(prev)
}

//! # Option Tables
//!
//! Menu rows for every screen driven by a plain option list. Separator rows
//! live in the same list as selectable rows; cursor movement hops over them
//! and selecting one does nothing.

use crate::core::choices::{
    CiProvider, FrameworkPreset, MemoryModule, Multiplexer, Os, ProjectStack, Shell, Terminal,
};
use crate::core::modules::CATEGORIES;
use crate::core::screen::Screen;
use crate::core::state::App;
use crate::core::trainer::LESSONS;

/// What selecting a row means. The screen decides what to do with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Continue,
    Confirm,
    Back,
    Quit,
    Yes,
    No,
    Retry,
    MainMenu,

    StartInstall,
    ManageSkills,
    InitProject,
    Training,

    Os(Os),
    Terminal(Terminal),
    Shell(Shell),
    Multiplexer(Multiplexer),
    Preset(FrameworkPreset),
    Category(usize),
    ConfirmModules,

    BrowseSkills,
    InstallSkills,
    RemoveSkills,
    UpdateCatalog,

    Stack(ProjectStack),
    Memory(MemoryModule),
    Ci(CiProvider),

    Lesson(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    /// `None` marks a separator.
    pub pick: Option<Pick>,
}

impl MenuOption {
    pub fn new(label: impl Into<String>, pick: Pick) -> Self {
        Self {
            label: label.into(),
            pick: Some(pick),
        }
    }

    pub fn separator() -> Self {
        Self {
            label: String::new(),
            pick: None,
        }
    }

    pub fn is_separator(&self) -> bool {
        self.pick.is_none()
    }
}

fn yes_no(yes: &str, no: &str) -> Vec<MenuOption> {
    vec![MenuOption::new(yes, Pick::Yes), MenuOption::new(no, Pick::No)]
}

/// Option rows for the active screen. Empty for screens owned by a leaf
/// component (path input, selection lists, trainer input) or by a collaborator.
pub fn options_for(app: &App) -> Vec<MenuOption> {
    match app.screen {
        Screen::Welcome => vec![
            MenuOption::new("Get started", Pick::Continue),
            MenuOption::new("Quit", Pick::Quit),
        ],
        Screen::MainMenu => vec![
            MenuOption::new("Set up my environment", Pick::StartInstall),
            MenuOption::new("Manage skills", Pick::ManageSkills),
            MenuOption::new("Initialize a project", Pick::InitProject),
            MenuOption::new("Training grounds", Pick::Training),
            MenuOption::separator(),
            MenuOption::new("Quit", Pick::Quit),
        ],
        Screen::OsSelect => vec![
            MenuOption::new(Os::MacOs.label(), Pick::Os(Os::MacOs)),
            MenuOption::new(Os::Linux.label(), Pick::Os(Os::Linux)),
            MenuOption::new(Os::Wsl.label(), Pick::Os(Os::Wsl)),
            MenuOption::separator(),
            MenuOption::new(Os::Termux.label(), Pick::Os(Os::Termux)),
        ],
        Screen::TerminalSelect => {
            let mut options: Vec<MenuOption> = [
                Terminal::Ghostty,
                Terminal::Kitty,
                Terminal::WezTerm,
                Terminal::Alacritty,
            ]
            .into_iter()
            .map(|t| MenuOption::new(t.label(), Pick::Terminal(t)))
            .collect();
            options.push(MenuOption::separator());
            options.push(MenuOption::new(
                Terminal::None.label(),
                Pick::Terminal(Terminal::None),
            ));
            options
        }
        Screen::GhosttyWarning => vec![MenuOption::new("Continue anyway", Pick::Continue)],
        Screen::FontSelect => yes_no("Install a Nerd Font", "Skip fonts"),
        Screen::ShellSelect => vec![
            MenuOption::new(Shell::Fish.label(), Pick::Shell(Shell::Fish)),
            MenuOption::new(Shell::Zsh.label(), Pick::Shell(Shell::Zsh)),
            MenuOption::new(Shell::Nushell.label(), Pick::Shell(Shell::Nushell)),
            MenuOption::separator(),
            MenuOption::new(Shell::Keep.label(), Pick::Shell(Shell::Keep)),
        ],
        Screen::MultiplexerSelect => vec![
            MenuOption::new(Multiplexer::Tmux.label(), Pick::Multiplexer(Multiplexer::Tmux)),
            MenuOption::new(Multiplexer::Zellij.label(), Pick::Multiplexer(Multiplexer::Zellij)),
            MenuOption::separator(),
            MenuOption::new(Multiplexer::None.label(), Pick::Multiplexer(Multiplexer::None)),
        ],
        Screen::EditorSelect => yes_no("Install Neovim configuration", "Skip editor"),
        Screen::AiToolsPrompt => yes_no("Yes, install AI coding tools", "No AI tools"),
        Screen::AiFrameworkConfirm => yes_no("Yes, add framework modules", "No framework"),
        Screen::AiFrameworkPreset => [
            FrameworkPreset::Minimal,
            FrameworkPreset::Full,
            FrameworkPreset::Custom,
        ]
        .into_iter()
        .map(|p| MenuOption::new(p.label(), Pick::Preset(p)))
        .collect(),
        Screen::AiFrameworkCategories => {
            let mut options: Vec<MenuOption> = CATEGORIES
                .iter()
                .enumerate()
                .map(|(i, c)| {
                    let state = app.modules.category_state(c);
                    MenuOption::new(format!("{} {}", state.glyph(), c.label), Pick::Category(i))
                })
                .collect();
            options.push(MenuOption::separator());
            options.push(MenuOption::new("Confirm selection", Pick::ConfirmModules));
            options
        }
        Screen::BackupConfirm => yes_no("Back up existing configs", "Don't back up"),
        Screen::InstallSummary => vec![
            MenuOption::new("Install", Pick::Confirm),
            MenuOption::new("Go back", Pick::Back),
        ],
        Screen::InstallComplete => vec![
            MenuOption::new("Back to main menu", Pick::MainMenu),
            MenuOption::new("Quit", Pick::Quit),
        ],
        Screen::InstallError => vec![
            MenuOption::new("Retry failed step", Pick::Retry),
            MenuOption::new("Back to main menu", Pick::MainMenu),
            MenuOption::new("Quit", Pick::Quit),
        ],
        Screen::SkillMenu => vec![
            MenuOption::new("Browse catalog", Pick::BrowseSkills),
            MenuOption::new("Install skills", Pick::InstallSkills),
            MenuOption::new("Remove skills", Pick::RemoveSkills),
            MenuOption::new("Update catalog", Pick::UpdateCatalog),
            MenuOption::separator(),
            MenuOption::new("Back", Pick::Back),
        ],
        Screen::SkillResult => {
            let mut options = Vec::new();
            if matches!(app.skill_outcome, Some(Err(_))) {
                options.push(MenuOption::new("Retry", Pick::Retry));
            }
            options.push(MenuOption::new("Back to skills", Pick::Back));
            options
        }
        Screen::ProjectStack => [
            ProjectStack::Detect,
            ProjectStack::Rust,
            ProjectStack::Node,
            ProjectStack::Go,
            ProjectStack::Python,
        ]
        .into_iter()
        .map(|s| MenuOption::new(s.label(), Pick::Stack(s)))
        .collect(),
        Screen::ProjectMemory => vec![
            MenuOption::new(MemoryModule::Obsidian.label(), Pick::Memory(MemoryModule::Obsidian)),
            MenuOption::new(MemoryModule::Engram.label(), Pick::Memory(MemoryModule::Engram)),
            MenuOption::new(MemoryModule::Simple.label(), Pick::Memory(MemoryModule::Simple)),
            MenuOption::separator(),
            MenuOption::new(MemoryModule::None.label(), Pick::Memory(MemoryModule::None)),
        ],
        Screen::ProjectObsidianInstall => yes_no("Install the Obsidian plugin", "Skip plugin"),
        Screen::ProjectCi => vec![
            MenuOption::new(CiProvider::GitHub.label(), Pick::Ci(CiProvider::GitHub)),
            MenuOption::new(CiProvider::GitLab.label(), Pick::Ci(CiProvider::GitLab)),
            MenuOption::separator(),
            MenuOption::new(CiProvider::None.label(), Pick::Ci(CiProvider::None)),
        ],
        Screen::ProjectConfirm => vec![
            MenuOption::new("Initialize", Pick::Confirm),
            MenuOption::new("Go back", Pick::Back),
        ],
        Screen::ProjectResult => {
            let mut options = Vec::new();
            if app.failure.is_some() {
                options.push(MenuOption::new("Retry failed step", Pick::Retry));
            }
            options.push(MenuOption::new("Back to main menu", Pick::MainMenu));
            options
        }
        Screen::TrainerMenu => {
            let mut options: Vec<MenuOption> = LESSONS
                .iter()
                .enumerate()
                .map(|(i, l)| MenuOption::new(l.title, Pick::Lesson(i)))
                .collect();
            options.push(MenuOption::separator());
            options.push(MenuOption::new("Back", Pick::Back));
            options
        }
        Screen::TrainerResult => vec![
            MenuOption::new("Try again", Pick::Retry),
            MenuOption::new("Back to lessons", Pick::Back),
        ],
        Screen::Help
        | Screen::AiToolsSelect
        | Screen::AiFrameworkCategoryItems
        | Screen::SkillBrowse
        | Screen::SkillInstall
        | Screen::SkillRemove
        | Screen::ProjectPath
        | Screen::TrainerLesson
        | Screen::Installing
        | Screen::SkillLoading
        | Screen::SkillApplying
        | Screen::ProjectInstalling => Vec::new(),
    }
}

/// First selectable row, or 0 when there is none.
pub fn first_selectable(options: &[MenuOption]) -> usize {
    options.iter().position(|o| !o.is_separator()).unwrap_or(0)
}

/// Move the cursor one selectable row up (`delta < 0`) or down, hopping
/// over separators. Stays put when no selectable row lies that way.
pub fn step(options: &[MenuOption], cursor: usize, delta: isize) -> usize {
    let mut next = cursor as isize;
    loop {
        next += delta.signum();
        if next < 0 || next as usize >= options.len() {
            return cursor;
        }
        if !options[next as usize].is_separator() {
            return next as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<MenuOption> {
        vec![
            MenuOption::new("a", Pick::Yes),
            MenuOption::new("b", Pick::No),
            MenuOption::separator(),
            MenuOption::new("c", Pick::Quit),
        ]
    }

    #[test]
    fn test_step_skips_separator_in_one_move() {
        let options = menu();
        assert_eq!(step(&options, 1, 1), 3);
        assert_eq!(step(&options, 3, -1), 1);
    }

    #[test]
    fn test_step_stays_at_edges() {
        let options = menu();
        assert_eq!(step(&options, 0, -1), 0);
        assert_eq!(step(&options, 3, 1), 3);
    }

    #[test]
    fn test_trailing_separator_does_not_trap_cursor() {
        let options = vec![MenuOption::new("a", Pick::Yes), MenuOption::separator()];
        assert_eq!(step(&options, 0, 1), 0);
    }

    #[test]
    fn test_first_selectable_skips_leading_separator() {
        let options = vec![MenuOption::separator(), MenuOption::new("a", Pick::Yes)];
        assert_eq!(first_selectable(&options), 1);
        assert_eq!(first_selectable(&[]), 0);
    }
}

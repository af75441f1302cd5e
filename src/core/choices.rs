//! # User Choices
//!
//! Everything the user has confirmed so far. Fields are filled in forward
//! order as screens are confirmed and the whole record is cleared when the
//! wizard is abandoned. Install collaborators receive it as their only input,
//! exported as `GEARUP_*` environment variables.

use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    MacOs,
    Linux,
    Wsl,
    Termux,
}

impl Os {
    pub fn label(self) -> &'static str {
        match self {
            Os::MacOs => "macOS",
            Os::Linux => "Linux",
            Os::Wsl => "Windows (WSL)",
            Os::Termux => "Android (Termux)",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Os::MacOs => "macos",
            Os::Linux => "linux",
            Os::Wsl => "wsl",
            Os::Termux => "termux",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Ghostty,
    Kitty,
    WezTerm,
    Alacritty,
    /// Keep whatever terminal is already installed.
    None,
}

impl Terminal {
    pub fn label(self) -> &'static str {
        match self {
            Terminal::Ghostty => "Ghostty",
            Terminal::Kitty => "Kitty",
            Terminal::WezTerm => "WezTerm",
            Terminal::Alacritty => "Alacritty",
            Terminal::None => "Keep my current terminal",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Terminal::Ghostty => "ghostty",
            Terminal::Kitty => "kitty",
            Terminal::WezTerm => "wezterm",
            Terminal::Alacritty => "alacritty",
            Terminal::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    Fish,
    Zsh,
    Nushell,
    Keep,
}

impl Shell {
    pub fn label(self) -> &'static str {
        match self {
            Shell::Fish => "Fish",
            Shell::Zsh => "Zsh",
            Shell::Nushell => "Nushell",
            Shell::Keep => "Keep my current shell",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Shell::Fish => "fish",
            Shell::Zsh => "zsh",
            Shell::Nushell => "nushell",
            Shell::Keep => "keep",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplexer {
    Tmux,
    Zellij,
    None,
}

impl Multiplexer {
    pub fn label(self) -> &'static str {
        match self {
            Multiplexer::Tmux => "Tmux",
            Multiplexer::Zellij => "Zellij",
            Multiplexer::None => "No multiplexer",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Multiplexer::Tmux => "tmux",
            Multiplexer::Zellij => "zellij",
            Multiplexer::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiTool {
    ClaudeCode,
    OpenCode,
    GeminiCli,
    Codex,
    Copilot,
}

impl AiTool {
    pub const ALL: [AiTool; 5] = [
        AiTool::ClaudeCode,
        AiTool::OpenCode,
        AiTool::GeminiCli,
        AiTool::Codex,
        AiTool::Copilot,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AiTool::ClaudeCode => "Claude Code",
            AiTool::OpenCode => "OpenCode",
            AiTool::GeminiCli => "Gemini CLI",
            AiTool::Codex => "Codex CLI",
            AiTool::Copilot => "GitHub Copilot CLI",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            AiTool::ClaudeCode => "claude-code",
            AiTool::OpenCode => "opencode",
            AiTool::GeminiCli => "gemini-cli",
            AiTool::Codex => "codex",
            AiTool::Copilot => "copilot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameworkPreset {
    Minimal,
    Full,
    Custom,
}

impl FrameworkPreset {
    pub fn label(self) -> &'static str {
        match self {
            FrameworkPreset::Minimal => "Minimal (core workflow only)",
            FrameworkPreset::Full => "Full (every module)",
            FrameworkPreset::Custom => "Custom (pick modules)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStack {
    Detect,
    Rust,
    Node,
    Go,
    Python,
}

impl ProjectStack {
    pub fn label(self) -> &'static str {
        match self {
            ProjectStack::Detect => "Detect automatically",
            ProjectStack::Rust => "Rust",
            ProjectStack::Node => "Node / TypeScript",
            ProjectStack::Go => "Go",
            ProjectStack::Python => "Python",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            ProjectStack::Detect => "detect",
            ProjectStack::Rust => "rust",
            ProjectStack::Node => "node",
            ProjectStack::Go => "go",
            ProjectStack::Python => "python",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryModule {
    Obsidian,
    Engram,
    Simple,
    None,
}

impl MemoryModule {
    pub fn label(self) -> &'static str {
        match self {
            MemoryModule::Obsidian => "Obsidian vault",
            MemoryModule::Engram => "Engram",
            MemoryModule::Simple => "Plain markdown notes",
            MemoryModule::None => "No memory module",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            MemoryModule::Obsidian => "obsidian",
            MemoryModule::Engram => "engram",
            MemoryModule::Simple => "simple",
            MemoryModule::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiProvider {
    GitHub,
    GitLab,
    None,
}

impl CiProvider {
    pub fn label(self) -> &'static str {
        match self {
            CiProvider::GitHub => "GitHub Actions",
            CiProvider::GitLab => "GitLab CI",
            CiProvider::None => "No CI",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            CiProvider::GitHub => "github",
            CiProvider::GitLab => "gitlab",
            CiProvider::None => "none",
        }
    }
}

/// Answers collected by the project initialization flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectChoices {
    pub path: Option<PathBuf>,
    pub stack: Option<ProjectStack>,
    pub memory: Option<MemoryModule>,
    pub obsidian_plugin: Option<bool>,
    pub ci: Option<CiProvider>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChoices {
    pub os: Option<Os>,
    pub terminal: Option<Terminal>,
    pub nerd_font: Option<bool>,
    pub shell: Option<Shell>,
    pub multiplexer: Option<Multiplexer>,
    pub neovim: Option<bool>,
    /// `Some(false)` when the user declined AI tools altogether.
    pub install_ai_tools: Option<bool>,
    pub ai_tools: Vec<AiTool>,
    pub install_framework: Option<bool>,
    pub framework_preset: Option<FrameworkPreset>,
    pub framework_modules: Vec<String>,
    pub backup: Option<bool>,
    pub project: ProjectChoices,
}

impl UserChoices {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_termux(&self) -> bool {
        self.os == Some(Os::Termux)
    }

    /// Environment exported to step commands.
    pub fn env_vars(&self) -> Vec<(String, String)> {
        let mut vars = Vec::new();
        let mut push = |name: &str, value: String| vars.push((format!("GEARUP_{name}"), value));

        if let Some(os) = self.os {
            push("OS", os.key().to_string());
        }
        if let Some(terminal) = self.terminal {
            push("TERMINAL", terminal.key().to_string());
        }
        if let Some(font) = self.nerd_font {
            push("NERD_FONT", font.to_string());
        }
        if let Some(shell) = self.shell {
            push("SHELL", shell.key().to_string());
        }
        if let Some(mux) = self.multiplexer {
            push("MULTIPLEXER", mux.key().to_string());
        }
        if let Some(nvim) = self.neovim {
            push("NEOVIM", nvim.to_string());
        }
        if !self.ai_tools.is_empty() {
            let tools: Vec<&str> = self.ai_tools.iter().map(|t| t.key()).collect();
            push("AI_TOOLS", tools.join(","));
        }
        if !self.framework_modules.is_empty() {
            push("FRAMEWORK_MODULES", self.framework_modules.join(","));
        }
        if let Some(backup) = self.backup {
            push("BACKUP", backup.to_string());
        }
        if let Some(path) = &self.project.path {
            push("PROJECT_PATH", path.to_string_lossy().into_owned());
        }
        if let Some(stack) = self.project.stack {
            push("PROJECT_STACK", stack.key().to_string());
        }
        if let Some(memory) = self.project.memory {
            push("PROJECT_MEMORY", memory.key().to_string());
        }
        if let Some(ci) = self.project.ci {
            push("PROJECT_CI", ci.key().to_string());
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_vars_only_include_answered_fields() {
        let choices = UserChoices {
            os: Some(Os::Linux),
            ai_tools: vec![AiTool::ClaudeCode, AiTool::Codex],
            ..Default::default()
        };
        let vars = choices.env_vars();
        assert_eq!(
            vars,
            vec![
                ("GEARUP_OS".to_string(), "linux".to_string()),
                ("GEARUP_AI_TOOLS".to_string(), "claude-code,codex".to_string()),
            ]
        );
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut choices = UserChoices {
            shell: Some(Shell::Fish),
            ..Default::default()
        };
        choices.project.ci = Some(CiProvider::GitHub);
        choices.clear();
        assert_eq!(choices, UserChoices::default());
    }
}

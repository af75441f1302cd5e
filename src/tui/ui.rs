//! Frame layout: title bar, the active screen's body, and a footer of key
//! hints. Every screen is drawn from core `App` state alone.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::core::modules::{CATEGORIES, CategorySelections, derive_groups};
use crate::core::options::options_for;
use crate::core::path_input::Mode;
use crate::core::plan::install_plan;
use crate::core::screen::Screen;
use crate::core::selection::Row;
use crate::core::skills::category_icon;
use crate::core::state::{App, SkillRequest};
use crate::tui::component::Component;
use crate::tui::components::{
    Checklist, ChecklistRow, LogView, OptionList, PathField, TitleBar, WelcomeBanner,
};

const SPINNER: &[&str] = &["◐", "◓", "◑", "◒"];

pub fn draw_ui(frame: &mut Frame, app: &App, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(1)]);
    let [title_area, _, body_area, footer_area] = layout.areas(frame.area());

    TitleBar::new(
        app.screen.title().to_string(),
        app.status_message.clone(),
        app.leader_armed,
    )
    .render(frame, title_area);

    let body = inset(body_area);
    draw_body(frame, body, app, spinner_frame);

    frame.render_widget(
        Line::from(Span::styled(
            footer_hint(app),
            Style::default().fg(Color::DarkGray),
        )),
        footer_area,
    );
}

/// Leave a two-column left margin.
fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        width: area.width.saturating_sub(2),
        ..area
    }
}

fn draw_body(frame: &mut Frame, area: Rect, app: &App, spinner_frame: usize) {
    match app.screen {
        Screen::Welcome => {
            let [banner, menu] = Layout::vertical([
                Constraint::Length(WelcomeBanner::required_height() + 1),
                Constraint::Min(0),
            ])
            .areas(area);
            WelcomeBanner.render(frame, banner);
            draw_menu(frame, menu, app);
        }
        Screen::Help => draw_help(frame, area),
        Screen::AiToolsSelect => {
            let list = &app.ai_tools;
            let rows = list
                .rows()
                .into_iter()
                .map(|row| {
                    ChecklistRow::for_row(row, list.state(row), list.groups(), |i| {
                        list.items()[i].label().to_string()
                    })
                })
                .collect();
            draw_with_intro(frame, area, "Which tools should be installed?", |frame, area| {
                Checklist::new(rows, app.cursor).render(frame, area)
            });
        }
        Screen::AiFrameworkCategoryItems => draw_category_items(frame, area, app),
        Screen::SkillBrowse => draw_skill_browse(frame, area, app),
        Screen::SkillInstall | Screen::SkillRemove => {
            let list = &app.skill_list;
            if list.is_empty() {
                let text = if app.screen == Screen::SkillInstall {
                    "Every catalog skill is already installed."
                } else {
                    "No skills are installed."
                };
                frame.render_widget(dim_paragraph(text), area);
                return;
            }
            let rows = list
                .rows()
                .into_iter()
                .map(|row| {
                    let mut checklist_row =
                        ChecklistRow::for_row(row, list.state(row), list.groups(), |i| {
                            list.items()[i].name.clone()
                        });
                    if let Row::Item(i) = row
                        && !list.items()[i].description.is_empty()
                    {
                        checklist_row = checklist_row.detail(list.items()[i].description.clone());
                    }
                    checklist_row
                })
                .collect();
            Checklist::new(rows, app.cursor).render(frame, area);
        }
        Screen::ProjectPath => {
            draw_with_intro(
                frame,
                area,
                "Where is the project? Tab completes, Ctrl+B browses.",
                |frame, area| PathField::new(&app.path_input, "Directory").render(frame, area),
            );
        }
        Screen::TrainerLesson => draw_trainer_lesson(frame, area, app),
        Screen::Installing | Screen::ProjectInstalling => {
            if let Some(flow) = &app.flow {
                LogView::new(flow, spinner_frame, true).render(frame, area);
            }
        }
        Screen::SkillLoading | Screen::SkillApplying => {
            let text = match &app.skill_request {
                Some(SkillRequest::Fetch { .. }) => "Loading skill catalog…",
                Some(SkillRequest::Apply { .. }) => "Applying changes…",
                Some(SkillRequest::Update) => "Updating catalog…",
                None => "Working…",
            };
            let spinner = SPINNER[spinner_frame % SPINNER.len()];
            frame.render_widget(
                Line::from(vec![
                    Span::styled(format!("{spinner} "), Style::default().fg(Color::Cyan)),
                    Span::raw(text),
                ]),
                area,
            );
        }
        _ => {
            let intro = intro_lines(app);
            if intro.is_empty() {
                draw_menu(frame, area, app);
            } else {
                let height = intro_height(&intro, area.width);
                let [top, _, menu] = Layout::vertical([
                    Constraint::Length(height),
                    Constraint::Length(1),
                    Constraint::Min(0),
                ])
                .areas(area);
                frame.render_widget(Paragraph::new(intro).wrap(Wrap { trim: false }), top);
                draw_menu(frame, menu, app);
            }
        }
    }
}

fn draw_menu(frame: &mut Frame, area: Rect, app: &App) {
    let options = options_for(app);
    OptionList::new(&options, app.cursor).render(frame, area);
}

fn draw_with_intro<F>(frame: &mut Frame, area: Rect, intro: &str, body: F)
where
    F: FnOnce(&mut Frame, Rect),
{
    let [top, _, rest] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);
    frame.render_widget(Line::from(intro.to_string()), top);
    body(frame, rest);
}

fn dim_paragraph(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).style(Style::default().fg(Color::DarkGray))
}

/// Rows needed for `lines` once wrapped to `width`.
fn intro_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| {
            let w = line.width();
            w.div_ceil(width).max(1) as u16
        })
        .sum()
}

fn heading(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        text.into(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn field(name: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name:<14}"), Style::default().fg(Color::DarkGray)),
        Span::raw(value.into()),
    ])
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "-",
    }
}

/// Text shown above a menu screen's options.
fn intro_lines(app: &App) -> Vec<Line<'static>> {
    let choices = &app.choices;
    match app.screen {
        Screen::MainMenu => vec![Line::from("What would you like to do?")],
        Screen::OsSelect => vec![Line::from("Which system are you setting up?")],
        Screen::TerminalSelect => vec![Line::from("Pick a terminal emulator.")],
        Screen::GhosttyWarning => vec![
            heading("Ghostty on Linux"),
            Line::from(
                "Ghostty is not packaged for every distribution. The installer may build \
                 it from source, which needs Zig and several minutes.",
            ),
        ],
        Screen::FontSelect => vec![Line::from("Install a Nerd Font for icons in the terminal?")],
        Screen::ShellSelect => vec![Line::from("Which shell do you want to use?")],
        Screen::MultiplexerSelect => vec![Line::from("Pick a terminal multiplexer.")],
        Screen::EditorSelect => vec![Line::from("Set up Neovim?")],
        Screen::AiToolsPrompt => vec![Line::from("Install AI coding assistants?")],
        Screen::AiFrameworkConfirm => {
            vec![Line::from("Add workflow modules for your AI tools?")]
        }
        Screen::AiFrameworkPreset => vec![Line::from("Start from a preset.")],
        Screen::AiFrameworkCategories => {
            let count = app.modules.selected_ids().len();
            vec![Line::from(format!(
                "Open a category to pick modules. {count} selected."
            ))]
        }
        Screen::BackupConfirm => vec![Line::from(
            "Back up existing configuration files before they are replaced?",
        )],
        Screen::InstallSummary => {
            let mut lines = vec![heading("Your choices")];
            if let Some(os) = choices.os {
                lines.push(field("System", os.label()));
            }
            if let Some(terminal) = choices.terminal {
                lines.push(field("Terminal", terminal.label()));
            }
            if choices.nerd_font.is_some() {
                lines.push(field("Nerd Font", yes_no(choices.nerd_font)));
            }
            if let Some(shell) = choices.shell {
                lines.push(field("Shell", shell.label()));
            }
            if let Some(mux) = choices.multiplexer {
                lines.push(field("Multiplexer", mux.label()));
            }
            lines.push(field("Neovim", yes_no(choices.neovim)));
            if !choices.ai_tools.is_empty() {
                let tools: Vec<&str> = choices.ai_tools.iter().map(|t| t.label()).collect();
                lines.push(field("AI tools", tools.join(", ")));
            }
            if let Some(preset) = choices.framework_preset {
                lines.push(field(
                    "Framework",
                    format!(
                        "{} ({} modules)",
                        preset.label(),
                        choices.framework_modules.len()
                    ),
                ));
            }
            lines.push(field("Backup", yes_no(choices.backup)));
            lines.push(Line::default());
            lines.push(Line::from(format!(
                "{} steps will run.",
                install_plan(choices).len()
            )));
            lines
        }
        Screen::InstallComplete => {
            let mut lines = vec![heading("✓ Everything is installed.")];
            if let Some(flow) = &app.flow {
                lines.push(Line::from(format!("{} steps completed.", flow.steps.len())));
            }
            lines
        }
        Screen::InstallError => failure_lines(app),
        Screen::SkillMenu => vec![Line::from("Manage skills for your AI tools.")],
        Screen::SkillResult => match &app.skill_outcome {
            Some(Ok(summary)) => vec![Line::from(Span::styled(
                format!("✓ {summary}"),
                Style::default().fg(Color::Green),
            ))],
            Some(Err(error)) => vec![
                Line::from(Span::styled(
                    "✗ The skill operation failed.",
                    Style::default().fg(Color::Red),
                )),
                Line::from(error.clone()),
            ],
            None => Vec::new(),
        },
        Screen::ProjectStack => vec![Line::from("What kind of project is it?")],
        Screen::ProjectMemory => vec![Line::from("Pick a memory module for your AI tools.")],
        Screen::ProjectObsidianInstall => {
            vec![Line::from("Install the Obsidian plugin into the vault?")]
        }
        Screen::ProjectCi => vec![Line::from("Add a CI workflow?")],
        Screen::ProjectConfirm => {
            let project = &choices.project;
            let mut lines = vec![heading("Project")];
            if let Some(path) = &project.path {
                lines.push(field("Directory", path.display().to_string()));
            }
            if let Some(stack) = project.stack {
                lines.push(field("Stack", stack.label()));
            }
            if let Some(memory) = project.memory {
                lines.push(field("Memory", memory.label()));
            }
            if project.obsidian_plugin.is_some() {
                lines.push(field("Obsidian", yes_no(project.obsidian_plugin)));
            }
            if let Some(ci) = project.ci {
                lines.push(field("CI", ci.label()));
            }
            lines
        }
        Screen::ProjectResult => {
            if app.failure.is_some() {
                failure_lines(app)
            } else {
                vec![heading("✓ Project initialized.")]
            }
        }
        Screen::TrainerMenu => vec![Line::from("Practice the keys you will use every day.")],
        Screen::TrainerResult => {
            let session = &app.trainer;
            let mut lines = vec![heading(format!(
                "{} of {} correct",
                session.correct,
                session.total()
            ))];
            if let Some(feedback) = &session.feedback {
                lines.push(Line::from(feedback.clone()));
            }
            lines
        }
        _ => Vec::new(),
    }
}

fn failure_lines(app: &App) -> Vec<Line<'static>> {
    let Some(failure) = &app.failure else {
        return vec![heading("✗ Installation failed.")];
    };
    vec![
        Line::from(Span::styled(
            format!("✗ {} failed", failure.step_name),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(failure.error.clone()),
    ]
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let key = |k: &str, text: &str| {
        Line::from(vec![
            Span::styled(format!("  {k:<12}"), Style::default().fg(Color::Cyan)),
            Span::raw(text.to_string()),
        ])
    };
    let lines = vec![
        heading("Navigation"),
        key("↑ ↓ / k j", "Move"),
        key("Enter", "Choose"),
        key("Esc", "Go back"),
        key("Ctrl+C", "Quit immediately"),
        Line::default(),
        heading("Leader (Space, then…)"),
        key("h or ?", "This help"),
        key("m", "Main menu"),
        key("q", "Quit"),
        Line::default(),
        heading("Lists"),
        key("Space / x", "Toggle item, group or select all"),
        Line::default(),
        heading("Directory input"),
        key("Tab", "Complete directory name"),
        key("Ctrl+B", "Browse directories"),
        key("Ctrl+W", "Delete word"),
        key("Ctrl+U", "Delete to start"),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_category_items(frame: &mut Frame, area: Rect, app: &App) {
    let Some(category) = CATEGORIES.get(app.active_category) else {
        return;
    };
    let groups = derive_groups(category.items);
    let rows = CategorySelections::rows(category)
        .into_iter()
        .map(|row| {
            ChecklistRow::for_row(row, app.modules.row_state(category, row), &groups, |i| {
                category.items[i].label.to_string()
            })
        })
        .collect();
    draw_with_intro(frame, area, category.label, |frame, area| {
        Checklist::new(rows, app.cursor).render(frame, area)
    });
}

fn draw_skill_browse(frame: &mut Frame, area: Rect, app: &App) {
    if app.skills.is_empty() {
        frame.render_widget(dim_paragraph("The catalog is empty."), area);
        return;
    }
    let name_width = app
        .skills
        .iter()
        .map(|s| s.name.width())
        .max()
        .unwrap_or(0);
    let items: Vec<ListItem> = app
        .skills
        .iter()
        .enumerate()
        .map(|(i, skill)| {
            let selected = i == app.cursor;
            let name_style = if selected {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            let installed = if skill.installed {
                Span::styled(" ✓", Style::default().fg(Color::Green))
            } else {
                Span::raw("  ")
            };
            let pad = name_width.saturating_sub(skill.name.width());
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", category_icon(&skill.category)),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(format!("{}{}", skill.name, " ".repeat(pad)), name_style),
                installed,
                Span::styled(
                    format!("  {}", skill.description),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.cursor));
    frame.render_stateful_widget(List::new(items), area, &mut state);
}

fn draw_trainer_lesson(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.trainer;
    let Some(exercise) = session.current() else {
        return;
    };
    let title = session.lesson().map_or("", |l| l.title);
    let mut lines = vec![
        heading(format!(
            "{title} · {}/{}",
            session.exercise + 1,
            session.total()
        )),
        Line::default(),
        Line::from(exercise.prompt),
        Line::default(),
        Line::from(vec![
            Span::styled("> ", Style::default().fg(Color::Cyan)),
            Span::raw(session.answer.text()),
        ]),
    ];
    if let Some(feedback) = &session.feedback {
        let color = if feedback.starts_with("Correct") {
            Color::Green
        } else {
            Color::Yellow
        };
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            feedback.clone(),
            Style::default().fg(color),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);

    let caret = session.answer.before_cursor().width() as u16;
    let x = (area.x + 2 + caret).min(area.x + area.width.saturating_sub(1));
    frame.set_cursor_position((x, area.y + 4));
}

pub fn footer_hint(app: &App) -> String {
    if app.leader_armed {
        return " h help · m main menu · q quit · any other key cancels".to_string();
    }
    let hint = match app.screen {
        Screen::Help => "Esc back",
        Screen::Installing
        | Screen::ProjectInstalling
        | Screen::SkillLoading
        | Screen::SkillApplying => "Working… · Ctrl+C quit",
        Screen::AiToolsSelect | Screen::SkillInstall | Screen::SkillRemove => {
            "↑↓ move · Space toggle · Enter confirm · Esc back"
        }
        Screen::AiFrameworkCategoryItems => "↑↓ move · Space toggle · Enter/Esc done",
        Screen::SkillBrowse => "↑↓ move · Esc back · ␣ leader",
        Screen::TrainerLesson => "Type the answer · Enter submit · Esc back",
        Screen::ProjectPath => match app.path_input.mode {
            Mode::Typing => "Tab complete · Ctrl+B browse · Enter confirm · Esc back",
            Mode::Completion(_) => "↑↓ choose · Tab/Enter accept · Esc dismiss",
            Mode::Browser(_) => "↑↓ move · Enter open · ← parent · . hidden · Esc cancel",
        },
        _ => "↑↓ move · Enter select · Esc back · ␣ leader",
    };
    format!(" {hint}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::key::{Key, KeyCode};
    use crate::core::plan::InstallStep;
    use crate::core::state::{FlowKind, FlowProgress, StepFailure};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, 0)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..30)
            .map(|y| (0..80).map(|x| buffer[(x, y)].symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn press(app: &mut App, code: KeyCode) {
        update(app, Action::Key(Key::new(code)));
    }

    #[test]
    fn test_welcome_screen() {
        let app = test_app();
        let text = render(&app);
        assert!(text.contains("gearup › Welcome"));
        assert!(text.contains("Get started"));
        assert!(text.contains("Enter select"));
    }

    #[test]
    fn test_leader_hint_replaces_footer() {
        let mut app = test_app();
        update(&mut app, Action::Key(Key::char(' ')));
        assert!(app.leader_armed);
        let text = render(&app);
        assert!(text.contains("m main menu"));
        assert!(!text.contains("Enter select"));
    }

    #[test]
    fn test_ai_tools_checklist() {
        let mut app = test_app();
        crate::core::handlers::enter(&mut app, Screen::AiToolsSelect);
        let text = render(&app);
        assert!(text.contains("[ ] Select all"));
        assert!(text.contains("Claude Code"));
        assert!(text.contains("Space toggle"));
    }

    #[test]
    fn test_install_error_shows_step_and_error() {
        let mut app = test_app();
        app.flow = Some(FlowProgress::new(
            FlowKind::Install,
            vec![InstallStep::new("shell.fish", "Install Fish")],
        ));
        app.failure = Some(StepFailure {
            step_name: "Install Fish".to_string(),
            error: "command exited with status 1: no network".to_string(),
        });
        crate::core::handlers::enter(&mut app, Screen::InstallError);
        let text = render(&app);
        assert!(text.contains("✗ Install Fish failed"));
        assert!(text.contains("no network"));
        assert!(text.contains("Retry failed step"));
    }

    #[test]
    fn test_project_path_shows_field() {
        let mut app = test_app();
        crate::core::handlers::enter(&mut app, Screen::ProjectPath);
        press(&mut app, KeyCode::Char('x'));
        let text = render(&app);
        assert!(text.contains("Directory"));
        assert!(text.contains("Tab complete"));
    }

    #[test]
    fn test_help_lists_leader_commands() {
        let mut app = test_app();
        app.screen = Screen::Help;
        let text = render(&app);
        assert!(text.contains("Leader (Space, then…)"));
        assert!(text.contains("Main menu"));
    }
}

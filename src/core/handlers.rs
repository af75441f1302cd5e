//! # Screen Handlers
//!
//! Per-screen key handling and the transitions between screens. Every screen
//! change goes through [`enter`], which re-initializes the screen's own
//! sub-state so nothing leaks from an earlier visit.

use log::{debug, info};

use crate::core::action::Effect;
use crate::core::choices::{
    AiTool, FrameworkPreset, MemoryModule, Os, ProjectChoices, Terminal,
};
use crate::core::key::{Key, KeyCode};
use crate::core::modules::{CATEGORIES, CategorySelections, MINIMAL_MODULES, all_module_ids};
use crate::core::options::{self, Pick, options_for};
use crate::core::path_input::PathInputOutcome;
use crate::core::plan::{install_plan, project_plan};
use crate::core::screen::{Screen, predecessor_of};
use crate::core::selection::SelectionList;
use crate::core::skills::{SkillOp, selection_for};
use crate::core::state::{App, FlowKind, FlowProgress, SkillRequest};
use crate::core::trainer::TrainerSession;

pub const EMPTY_SELECTION_HINT: &str = "Nothing selected. Press Space to toggle an item.";

/// Switch to `screen`, resetting whatever state that screen owns.
pub fn enter(app: &mut App, screen: Screen) {
    debug!("Screen {:?} -> {:?}", app.screen, screen);
    app.screen = screen;
    app.leader_armed = false;

    match screen {
        Screen::ProjectPath => {
            let initial = app
                .choices
                .project
                .path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();
            app.path_input.reset(&initial);
        }
        Screen::AiToolsSelect => {
            let mut list = SelectionList::new(AiTool::ALL.to_vec());
            for (i, tool) in AiTool::ALL.iter().enumerate() {
                list.set_selected(i, app.choices.ai_tools.contains(tool));
            }
            app.ai_tools = list;
        }
        Screen::AiFrameworkCategoryItems => {
            if let Some(category) = CATEGORIES.get(app.active_category) {
                app.modules.enter(category);
            }
        }
        Screen::SkillInstall => app.skill_list = selection_for(&app.skills, SkillOp::Install),
        Screen::SkillRemove => app.skill_list = selection_for(&app.skills, SkillOp::Remove),
        _ => {}
    }

    app.cursor = match screen {
        Screen::AiFrameworkCategories => app.active_category,
        _ => options::first_selectable(&options_for(app)),
    };
}

/// Drop everything collected so far. Used whenever the user lands back on
/// the main menu.
pub fn abandon(app: &mut App) {
    info!("Abandoning current flow");
    app.choices.clear();
    app.modules.clear();
    app.flow = None;
    app.failure = None;
    app.pending = None;
}

pub fn open_help(app: &mut App) {
    if app.screen == Screen::Help {
        return;
    }
    app.prev_screen = app.screen;
    app.prev_cursor = app.cursor;
    enter(app, Screen::Help);
}

pub fn go_back(app: &mut App) -> Effect {
    if app.screen == Screen::Help {
        app.screen = app.prev_screen;
        app.cursor = app.prev_cursor;
        return Effect::None;
    }
    match predecessor_of(app.screen, &app.choices) {
        Some(Screen::MainMenu) => {
            abandon(app);
            enter(app, Screen::MainMenu);
        }
        Some(prev) => enter(app, prev),
        None if app.screen == Screen::Welcome => return Effect::Quit,
        None => {}
    }
    Effect::None
}

/// Number of cursor positions on the current screen.
pub fn cursor_limit(app: &App) -> usize {
    match app.screen {
        Screen::AiToolsSelect => app.ai_tools.row_count(),
        Screen::AiFrameworkCategoryItems => CATEGORIES
            .get(app.active_category)
            .map_or(0, |c| CategorySelections::rows(c).len()),
        Screen::SkillBrowse => app.skills.len(),
        Screen::SkillInstall | Screen::SkillRemove => app.skill_list.row_count(),
        _ => options_for(app).len(),
    }
}

pub fn clamp_cursor(app: &mut App) {
    let limit = cursor_limit(app);
    if app.cursor >= limit {
        app.cursor = limit.saturating_sub(1);
    }
}

fn move_cursor(app: &mut App, key: Key) -> bool {
    let limit = cursor_limit(app);
    if key.is_up() {
        app.cursor = app.cursor.saturating_sub(1);
    } else if key.is_down() {
        if app.cursor + 1 < limit {
            app.cursor += 1;
        }
    } else {
        return false;
    }
    true
}

pub fn handle_key(app: &mut App, key: Key) -> Effect {
    match app.screen {
        Screen::Help => handle_help(app, key),
        Screen::AiToolsSelect => handle_ai_tools(app, key),
        Screen::AiFrameworkCategoryItems => handle_category_items(app, key),
        Screen::SkillBrowse => handle_skill_browse(app, key),
        Screen::SkillInstall | Screen::SkillRemove => handle_skill_select(app, key),
        Screen::ProjectPath => handle_project_path(app, key),
        Screen::TrainerLesson => handle_trainer_lesson(app, key),
        _ => handle_menu(app, key),
    }
}

fn handle_help(app: &mut App, key: Key) -> Effect {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => go_back(app),
        _ => Effect::None,
    }
}

fn handle_menu(app: &mut App, key: Key) -> Effect {
    let options = options_for(app);
    if key.is_up() {
        app.cursor = options::step(&options, app.cursor, -1);
        return Effect::None;
    }
    if key.is_down() {
        app.cursor = options::step(&options, app.cursor, 1);
        return Effect::None;
    }
    match key.code {
        KeyCode::Esc => go_back(app),
        KeyCode::Enter => match options.get(app.cursor).and_then(|o| o.pick) {
            Some(pick) => apply_pick(app, pick),
            None => Effect::None,
        },
        _ => Effect::None,
    }
}

fn apply_pick(app: &mut App, pick: Pick) -> Effect {
    debug!("{:?}: picked {:?}", app.screen, pick);
    let screen = app.screen;
    let choices = &mut app.choices;

    match pick {
        Pick::Quit => return Effect::Quit,
        Pick::Back => return go_back(app),
        Pick::MainMenu => {
            abandon(app);
            enter(app, Screen::MainMenu);
        }
        Pick::Continue => match screen {
            Screen::Welcome => enter(app, Screen::MainMenu),
            Screen::GhosttyWarning => enter(app, Screen::FontSelect),
            _ => {}
        },

        Pick::StartInstall => {
            choices.clear();
            app.modules.clear();
            enter(app, Screen::OsSelect);
        }
        Pick::ManageSkills => enter(app, Screen::SkillMenu),
        Pick::InitProject => {
            choices.project = ProjectChoices::default();
            enter(app, Screen::ProjectPath);
        }
        Pick::Training => enter(app, Screen::TrainerMenu),

        Pick::Os(os) => {
            choices.os = Some(os);
            if os == Os::Termux {
                choices.terminal = None;
                choices.nerd_font = None;
                enter(app, Screen::ShellSelect);
            } else {
                enter(app, Screen::TerminalSelect);
            }
        }
        Pick::Terminal(terminal) => {
            choices.terminal = Some(terminal);
            let next = if terminal == Terminal::None {
                choices.nerd_font = None;
                Screen::ShellSelect
            } else if terminal == Terminal::Ghostty && choices.os == Some(Os::Linux) {
                Screen::GhosttyWarning
            } else {
                Screen::FontSelect
            };
            enter(app, next);
        }
        Pick::Shell(shell) => {
            choices.shell = Some(shell);
            enter(app, Screen::MultiplexerSelect);
        }
        Pick::Multiplexer(mux) => {
            choices.multiplexer = Some(mux);
            enter(app, Screen::EditorSelect);
        }
        Pick::Preset(preset) => {
            choices.framework_preset = Some(preset);
            match preset {
                FrameworkPreset::Minimal => {
                    choices.framework_modules =
                        MINIMAL_MODULES.iter().map(|m| m.to_string()).collect();
                    enter(app, Screen::BackupConfirm);
                }
                FrameworkPreset::Full => {
                    choices.framework_modules = all_module_ids();
                    enter(app, Screen::BackupConfirm);
                }
                FrameworkPreset::Custom => {
                    app.active_category = 0;
                    enter(app, Screen::AiFrameworkCategories);
                }
            }
        }
        Pick::Category(index) => {
            app.active_category = index;
            enter(app, Screen::AiFrameworkCategoryItems);
        }
        Pick::ConfirmModules => {
            let ids = app.modules.selected_ids();
            if ids.is_empty() {
                app.status_message = EMPTY_SELECTION_HINT.to_string();
            } else {
                info!("Custom framework: {} modules", ids.len());
                choices.framework_modules = ids;
                enter(app, Screen::BackupConfirm);
            }
        }

        Pick::Yes | Pick::No => {
            let yes = pick == Pick::Yes;
            match screen {
                Screen::FontSelect => {
                    choices.nerd_font = Some(yes);
                    enter(app, Screen::ShellSelect);
                }
                Screen::EditorSelect => {
                    choices.neovim = Some(yes);
                    enter(app, Screen::AiToolsPrompt);
                }
                Screen::AiToolsPrompt => {
                    choices.install_ai_tools = Some(yes);
                    if yes {
                        enter(app, Screen::AiToolsSelect);
                    } else {
                        choices.ai_tools.clear();
                        choices.install_framework = None;
                        choices.framework_preset = None;
                        choices.framework_modules.clear();
                        enter(app, Screen::BackupConfirm);
                    }
                }
                Screen::AiFrameworkConfirm => {
                    choices.install_framework = Some(yes);
                    if yes {
                        enter(app, Screen::AiFrameworkPreset);
                    } else {
                        choices.framework_preset = None;
                        choices.framework_modules.clear();
                        enter(app, Screen::BackupConfirm);
                    }
                }
                Screen::BackupConfirm => {
                    choices.backup = Some(yes);
                    enter(app, Screen::InstallSummary);
                }
                Screen::ProjectObsidianInstall => {
                    choices.project.obsidian_plugin = Some(yes);
                    enter(app, Screen::ProjectCi);
                }
                _ => {}
            }
        }
        Pick::Confirm => match screen {
            Screen::InstallSummary => return start_flow(app, FlowKind::Install),
            Screen::ProjectConfirm => return start_flow(app, FlowKind::Project),
            _ => {}
        },
        Pick::Retry => match screen {
            Screen::InstallError | Screen::ProjectResult => return retry_flow(app),
            Screen::SkillResult => {
                if let Some(request) = app.skill_request.clone() {
                    return request_skills(app, request);
                }
            }
            Screen::TrainerResult => {
                app.trainer = TrainerSession::start(app.trainer.lesson);
                enter(app, Screen::TrainerLesson);
            }
            _ => {}
        },

        Pick::BrowseSkills => {
            return request_skills(
                app,
                SkillRequest::Fetch {
                    target: Screen::SkillBrowse,
                },
            );
        }
        Pick::InstallSkills => {
            return request_skills(
                app,
                SkillRequest::Fetch {
                    target: Screen::SkillInstall,
                },
            );
        }
        Pick::RemoveSkills => {
            return request_skills(
                app,
                SkillRequest::Fetch {
                    target: Screen::SkillRemove,
                },
            );
        }
        Pick::UpdateCatalog => return request_skills(app, SkillRequest::Update),

        Pick::Stack(stack) => {
            choices.project.stack = Some(stack);
            enter(app, Screen::ProjectMemory);
        }
        Pick::Memory(memory) => {
            choices.project.memory = Some(memory);
            if memory == MemoryModule::Obsidian {
                enter(app, Screen::ProjectObsidianInstall);
            } else {
                choices.project.obsidian_plugin = None;
                enter(app, Screen::ProjectCi);
            }
        }
        Pick::Ci(ci) => {
            choices.project.ci = Some(ci);
            enter(app, Screen::ProjectConfirm);
        }

        Pick::Lesson(index) => {
            app.trainer = TrainerSession::start(index);
            enter(app, Screen::TrainerLesson);
        }
    }
    Effect::None
}

fn handle_ai_tools(app: &mut App, key: Key) -> Effect {
    if move_cursor(app, key) {
        return Effect::None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('x') => app.ai_tools.toggle(app.cursor),
        KeyCode::Enter => {
            let tools: Vec<AiTool> = app.ai_tools.selected_items().into_iter().copied().collect();
            if tools.is_empty() {
                app.status_message = EMPTY_SELECTION_HINT.to_string();
            } else {
                app.choices.ai_tools = tools;
                enter(app, Screen::AiFrameworkConfirm);
            }
        }
        KeyCode::Esc => return go_back(app),
        _ => {}
    }
    Effect::None
}

fn handle_category_items(app: &mut App, key: Key) -> Effect {
    let Some(category) = CATEGORIES.get(app.active_category) else {
        return go_back(app);
    };
    if move_cursor(app, key) {
        return Effect::None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('x') => app.modules.toggle(category, app.cursor),
        KeyCode::Enter | KeyCode::Esc => return go_back(app),
        _ => {}
    }
    Effect::None
}

fn handle_skill_browse(app: &mut App, key: Key) -> Effect {
    if move_cursor(app, key) {
        return Effect::None;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Enter => go_back(app),
        _ => Effect::None,
    }
}

fn handle_skill_select(app: &mut App, key: Key) -> Effect {
    if move_cursor(app, key) {
        return Effect::None;
    }
    match key.code {
        KeyCode::Char(' ') | KeyCode::Char('x') => app.skill_list.toggle(app.cursor),
        KeyCode::Enter => {
            let names: Vec<String> = app
                .skill_list
                .selected_items()
                .into_iter()
                .map(|s| s.name.clone())
                .collect();
            if names.is_empty() {
                app.status_message = EMPTY_SELECTION_HINT.to_string();
                return Effect::None;
            }
            let op = if app.screen == Screen::SkillInstall {
                SkillOp::Install
            } else {
                SkillOp::Remove
            };
            return request_skills(app, SkillRequest::Apply { op, names });
        }
        KeyCode::Esc => return go_back(app),
        _ => {}
    }
    Effect::None
}

fn handle_project_path(app: &mut App, key: Key) -> Effect {
    match app.path_input.handle_key(key, app.fs.as_ref()) {
        PathInputOutcome::Submitted(path) => {
            info!("Project directory: {}", path.display());
            app.choices.project.path = Some(path);
            enter(app, Screen::ProjectStack);
            Effect::None
        }
        PathInputOutcome::Unhandled if key.code == KeyCode::Esc => go_back(app),
        PathInputOutcome::Unhandled | PathInputOutcome::Consumed => Effect::None,
    }
}

fn handle_trainer_lesson(app: &mut App, key: Key) -> Effect {
    match key.code {
        KeyCode::Esc => go_back(app),
        KeyCode::Enter => {
            if app.trainer.submit() {
                enter(app, Screen::TrainerResult);
            }
            Effect::None
        }
        _ => {
            app.trainer.answer.handle_key(key);
            Effect::None
        }
    }
}

fn start_flow(app: &mut App, kind: FlowKind) -> Effect {
    let steps = match kind {
        FlowKind::Install => install_plan(&app.choices),
        FlowKind::Project => project_plan(&app.choices.project),
    };
    info!("Starting {:?} flow with {} steps", kind, steps.len());
    app.failure = None;
    app.flow = Some(FlowProgress::new(kind, steps));
    run_current_step(app)
}

fn retry_flow(app: &mut App) -> Effect {
    if let Some(failure) = app.failure.take() {
        info!("Retrying step '{}'", failure.step_name);
    }
    if let Some(flow) = app.flow.as_mut() {
        flow.push_log("Retrying...");
    }
    run_current_step(app)
}

/// Issue the flow's current step, or land on the success screen when all
/// steps are done.
pub fn run_current_step(app: &mut App) -> Effect {
    let Some(flow) = app.flow.as_ref() else {
        return Effect::None;
    };
    let kind = flow.kind;
    let Some(step) = flow.current_step().cloned() else {
        info!("{:?} flow finished", kind);
        app.pending = None;
        enter(app, kind.success_screen());
        return Effect::None;
    };

    if app.screen != kind.progress_screen() {
        enter(app, kind.progress_screen());
    }
    let ticket = app.issue_ticket(kind.progress_screen());
    if let Some(flow) = app.flow.as_mut() {
        flow.push_log(format!("▶ {}", step.name));
    }
    info!("Running step '{}' ({})", step.name, step.key);
    Effect::RunStep {
        ticket,
        step,
        choices: app.choices.clone(),
    }
}

fn request_skills(app: &mut App, request: SkillRequest) -> Effect {
    app.skill_outcome = None;
    app.skill_request = Some(request.clone());
    let screen = match request {
        SkillRequest::Fetch { .. } => Screen::SkillLoading,
        SkillRequest::Apply { .. } | SkillRequest::Update => Screen::SkillApplying,
    };
    enter(app, screen);
    let ticket = app.issue_ticket(screen);
    info!("Skill request {:?} (ticket {:?})", request, ticket);
    match request {
        SkillRequest::Fetch { .. } => Effect::FetchSkills { ticket },
        SkillRequest::Apply { op, names } => Effect::ApplySkills { ticket, op, names },
        SkillRequest::Update => Effect::UpdateCatalog { ticket },
    }
}

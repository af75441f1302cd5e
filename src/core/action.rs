//! # Actions
//!
//! Everything that can happen in the wizard becomes an `Action`.
//! User presses a key? That's `Action::Key(key)`.
//! A step finishes in the background? That's `Action::StepFinished { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing I/O the caller must perform.
//! No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Key routing happens in a fixed order before any screen sees the key:
//!
//! 1. Ctrl+C quits from anywhere.
//! 2. Loading screens swallow everything else.
//! 3. An armed leader consumes the key as a leader command.
//! 4. The leader key arms the leader, unless the screen is deny-listed.
//! 5. The screen's own handler runs.

use log::{debug, info, warn};

use crate::core::choices::UserChoices;
use crate::core::handlers;
use crate::core::key::{Key, KeyCode};
use crate::core::plan::InstallStep;
use crate::core::screen::Screen;
use crate::core::skills::{SkillInfo, SkillOp, sorted};
use crate::core::state::{App, SkillRequest, StepFailure, Ticket};

/// The leader key.
pub const LEADER: Key = Key::char(' ');

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Key(Key),
    /// One line of output from the running step.
    StepLog { ticket: Ticket, line: String },
    StepFinished {
        ticket: Ticket,
        result: Result<(), String>,
    },
    SkillsLoaded {
        ticket: Ticket,
        result: Result<Vec<SkillInfo>, String>,
    },
    SkillsApplied {
        ticket: Ticket,
        result: Result<String, String>,
    },
    CatalogUpdated {
        ticket: Ticket,
        result: Result<String, String>,
    },
    Quit,
}

/// Work the caller must do after `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    RunStep {
        ticket: Ticket,
        step: InstallStep,
        choices: UserChoices,
    },
    FetchSkills {
        ticket: Ticket,
    },
    ApplySkills {
        ticket: Ticket,
        op: SkillOp,
        names: Vec<String>,
    },
    UpdateCatalog {
        ticket: Ticket,
    },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::Key(key) => {
            let effect = route_key(app, key);
            handlers::clamp_cursor(app);
            effect
        }
        Action::StepLog { ticket, line } => {
            if app.is_current(ticket)
                && let Some(flow) = app.flow.as_mut()
            {
                flow.push_log(line);
            } else {
                debug!("Dropping log line for stale ticket {:?}", ticket);
            }
            Effect::None
        }
        Action::StepFinished { ticket, result } => {
            if !app.settle(ticket) {
                debug!("Dropping stale step result for ticket {:?}", ticket);
                return Effect::None;
            }
            step_finished(app, result)
        }
        Action::SkillsLoaded { ticket, result } => {
            if !app.settle(ticket) {
                debug!("Dropping stale skill list for ticket {:?}", ticket);
                return Effect::None;
            }
            match result {
                Ok(skills) => {
                    info!("Loaded {} skills", skills.len());
                    app.skills = sorted(skills);
                    let target = match app.skill_request {
                        Some(SkillRequest::Fetch { target }) => target,
                        _ => Screen::SkillBrowse,
                    };
                    handlers::enter(app, target);
                }
                Err(e) => skill_failed(app, e),
            }
            Effect::None
        }
        Action::SkillsApplied { ticket, result } | Action::CatalogUpdated { ticket, result } => {
            if !app.settle(ticket) {
                debug!("Dropping stale skill result for ticket {:?}", ticket);
                return Effect::None;
            }
            match result {
                Ok(message) => {
                    info!("Skill request finished: {}", message);
                    // Installed flags changed; refetch next time.
                    app.skills.clear();
                    app.skill_outcome = Some(Ok(message));
                    handlers::enter(app, Screen::SkillResult);
                }
                Err(e) => skill_failed(app, e),
            }
            Effect::None
        }
    }
}

fn route_key(app: &mut App, key: Key) -> Effect {
    if key.is_ctrl('c') {
        info!("Ctrl+C on {:?}, quitting", app.screen);
        return Effect::Quit;
    }
    if app.screen.is_loading() {
        return Effect::None;
    }

    if app.leader_armed {
        app.leader_armed = false;
        return leader_command(app, key);
    }
    if key == LEADER && app.screen.allows_leader() {
        app.leader_armed = true;
        return Effect::None;
    }

    app.status_message.clear();
    handlers::handle_key(app, key)
}

/// Second key of a leader sequence. Unknown keys just disarm.
fn leader_command(app: &mut App, key: Key) -> Effect {
    match key.code {
        KeyCode::Char('h') | KeyCode::Char('?') => {
            handlers::open_help(app);
            Effect::None
        }
        KeyCode::Char('m') => {
            handlers::abandon(app);
            handlers::enter(app, Screen::MainMenu);
            Effect::None
        }
        KeyCode::Char('q') => Effect::Quit,
        _ => {
            debug!("Leader disarmed by {:?}", key);
            Effect::None
        }
    }
}

fn step_finished(app: &mut App, result: Result<(), String>) -> Effect {
    let Some(flow) = app.flow.as_mut() else {
        warn!("Step finished with no flow in progress");
        return Effect::None;
    };
    let kind = flow.kind;
    let name = flow
        .current_step()
        .map(|s| s.name.clone())
        .unwrap_or_default();

    match result {
        Ok(()) => {
            info!("Step '{}' done", name);
            flow.push_log(format!("✓ {name}"));
            flow.current += 1;
            handlers::run_current_step(app)
        }
        Err(error) => {
            warn!("Step '{}' failed: {}", name, error);
            flow.push_log(format!("✗ {name}: {error}"));
            app.failure = Some(StepFailure {
                step_name: name,
                error,
            });
            handlers::enter(app, kind.failure_screen());
            Effect::None
        }
    }
}

fn skill_failed(app: &mut App, error: String) {
    warn!("Skill request failed: {}", error);
    app.skill_outcome = Some(Err(error));
    handlers::enter(app, Screen::SkillResult);
}

//! # Application State
//!
//! Everything the wizard knows, in one struct. No terminal types here;
//! rendering state (spinner phase, scroll offsets) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── fs: Arc<dyn FileSystem>          // directory listings for path input
//! ├── screen / prev_screen / cursor    // where we are
//! ├── leader_armed: bool               // leader key pressed, waiting for command
//! ├── choices: UserChoices             // answers collected so far
//! ├── path_input: PathInput            // project directory field
//! ├── ai_tools: SelectionList<AiTool>  // AI tool checklist
//! ├── modules: CategorySelections      // framework module drill-down
//! ├── skills / skill_list              // catalog snapshot and active checklist
//! ├── flow: Option<FlowProgress>       // install or project steps in flight
//! ├── failure: Option<StepFailure>     // last failed step
//! ├── pending: Option<Pending>         // the one request whose reply we accept
//! └── trainer: TrainerSession          // current lesson
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::core::choices::{AiTool, UserChoices};
use crate::core::fs::FileSystem;
use crate::core::modules::CategorySelections;
use crate::core::path_input::PathInput;
use crate::core::plan::InstallStep;
use crate::core::screen::Screen;
use crate::core::selection::SelectionList;
use crate::core::skills::{SkillInfo, SkillOp};
use crate::core::trainer::TrainerSession;

/// Step output lines kept for the progress view.
pub const MAX_LOG_LINES: usize = 500;

/// Identifies one asynchronous request. Replies carry it back so late
/// replies can be told apart from the one we are waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pending {
    pub ticket: Ticket,
    /// Screen that must still be showing when the reply arrives.
    pub screen: Screen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Install,
    Project,
}

impl FlowKind {
    pub fn progress_screen(self) -> Screen {
        match self {
            FlowKind::Install => Screen::Installing,
            FlowKind::Project => Screen::ProjectInstalling,
        }
    }

    pub fn success_screen(self) -> Screen {
        match self {
            FlowKind::Install => Screen::InstallComplete,
            FlowKind::Project => Screen::ProjectResult,
        }
    }

    pub fn failure_screen(self) -> Screen {
        match self {
            FlowKind::Install => Screen::InstallError,
            FlowKind::Project => Screen::ProjectResult,
        }
    }
}

/// Steps of a running install or project flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowProgress {
    pub kind: FlowKind,
    pub steps: Vec<InstallStep>,
    /// Index of the step running now (or next to run).
    pub current: usize,
    pub log: Vec<String>,
    pub started_at: DateTime<Local>,
}

impl FlowProgress {
    pub fn new(kind: FlowKind, steps: Vec<InstallStep>) -> Self {
        Self {
            kind,
            steps,
            current: 0,
            log: Vec::new(),
            started_at: Local::now(),
        }
    }

    pub fn current_step(&self) -> Option<&InstallStep> {
        self.steps.get(self.current)
    }

    pub fn is_done(&self) -> bool {
        self.current >= self.steps.len()
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log.push(line.into());
        if self.log.len() > MAX_LOG_LINES {
            let excess = self.log.len() - MAX_LOG_LINES;
            self.log.drain(..excess);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step_name: String,
    pub error: String,
}

/// A skills request, kept so a failed one can be retried verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillRequest {
    /// Fetch the catalog, then show `target`.
    Fetch { target: Screen },
    Apply { op: SkillOp, names: Vec<String> },
    Update,
}

pub struct App {
    pub fs: Arc<dyn FileSystem>,
    pub screen: Screen,
    /// Screen and cursor Help returns to.
    pub prev_screen: Screen,
    pub prev_cursor: usize,
    pub cursor: usize,
    pub leader_armed: bool,
    pub choices: UserChoices,
    pub status_message: String,

    pub path_input: PathInput,
    pub ai_tools: SelectionList<AiTool>,
    pub modules: CategorySelections,
    /// Index into `CATEGORIES` while drilled into a category.
    pub active_category: usize,

    pub skills: Vec<SkillInfo>,
    pub skill_list: SelectionList<SkillInfo>,
    pub skill_request: Option<SkillRequest>,
    pub skill_outcome: Option<Result<String, String>>,

    pub flow: Option<FlowProgress>,
    pub failure: Option<StepFailure>,
    pub pending: Option<Pending>,
    next_ticket: u64,

    pub trainer: TrainerSession,
}

impl App {
    pub fn new(fs: Arc<dyn FileSystem>, show_hidden: bool) -> Self {
        Self {
            fs,
            screen: Screen::Welcome,
            prev_screen: Screen::Welcome,
            prev_cursor: 0,
            cursor: 0,
            leader_armed: false,
            choices: UserChoices::default(),
            status_message: String::new(),
            path_input: PathInput::new(show_hidden),
            ai_tools: SelectionList::new(AiTool::ALL.to_vec()),
            modules: CategorySelections::new(),
            active_category: 0,
            skills: Vec::new(),
            skill_list: SelectionList::default(),
            skill_request: None,
            skill_outcome: None,
            flow: None,
            failure: None,
            pending: None,
            next_ticket: 0,
            trainer: TrainerSession::default(),
        }
    }

    /// Start waiting on a new request from `screen`. Any earlier request is
    /// forgotten, so its reply will be dropped.
    pub fn issue_ticket(&mut self, screen: Screen) -> Ticket {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        self.pending = Some(Pending { ticket, screen });
        ticket
    }

    /// True when `ticket` is the request we are waiting on and its screen is
    /// still showing.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.pending
            .is_some_and(|p| p.ticket == ticket && p.screen == self.screen)
    }

    /// Like [`App::is_current`], and stops waiting when it matches.
    pub fn settle(&mut self, ticket: Ticket) -> bool {
        if self.is_current(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

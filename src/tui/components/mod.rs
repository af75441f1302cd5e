//! # TUI Components
//!
//! Presentation pieces for the wizard screens.
//!
//! ## Component Architecture
//!
//! All components are props-based: they borrow what they draw from core
//! state and are rebuilt on every frame. Wizard state (cursor, selections,
//! path buffer) lives in `core::state::App`, so no component keeps state of
//! its own between frames.
//!
//! - `TitleBar`: top status bar with screen title, status and leader marker
//! - `OptionList`: menu rows with separators
//! - `Checklist`: tri-state checkbox rows for multi-select screens
//! - `PathField`: line editor, completion dropdown and directory browser
//! - `LogView`: step progress and output tail for install flows
//! - `WelcomeBanner`: banner on the welcome screen
//!
//! ## Props-Based Data Flow
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! OptionList::new(&options, app.cursor).render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! OptionList::render(frame, area); // reads from global App
//! ```

mod checklist;
mod log_view;
mod option_list;
mod path_field;
mod title_bar;
mod welcome;

pub use checklist::{Checklist, ChecklistRow};
pub use log_view::LogView;
pub use option_list::OptionList;
pub use path_field::PathField;
pub use title_bar::TitleBar;
pub use welcome::WelcomeBanner;

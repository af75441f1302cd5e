//! # Core Application Logic
//!
//! The wizard's business logic. It knows nothing about any specific UI
//! technology and performs no I/O of its own beyond directory listings behind
//! the [`fs::FileSystem`] trait.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Effect (requests)    │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │  ── Effect ──►           │  Services  │
//!     │  Adapter   │  ◄── Action ──           │ (runner,   │
//!     │ (ratatui)  │                          │  catalog)  │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all wizard state in one place
//! - [`action`]: `Action`, `Effect` and the `update()` reducer
//! - [`handlers`]: per-screen key handling and screen transitions
//! - [`screen`]: the screen set and the back relation
//! - [`options`]: option rows for menu screens
//! - [`path_input`]: line buffer, tab completion and directory browser
//! - [`selection`]: multi-select lists with group and select-all rows

pub mod action;
pub mod choices;
pub mod config;
pub mod fs;
pub mod handlers;
pub mod key;
pub mod modules;
pub mod options;
pub mod path_input;
pub mod plan;
pub mod screen;
pub mod selection;
pub mod skills;
pub mod state;
pub mod trainer;

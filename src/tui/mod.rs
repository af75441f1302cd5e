//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into core `Action` values. Effects returned by
//! `update` are handed to [`Services`], whose background tasks report back
//! over an `mpsc` channel drained once per loop iteration.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (a loading screen is active): draws every ~80ms so the
//!   spinner and elapsed time move.
//! - **Idle**: sleeps up to 500ms and only redraws on input, resize, or a
//!   message from a background task.
//!
//! ## Interactive steps
//!
//! A step configured with `interactive = true` needs the real terminal (a
//! sudo prompt, say). The loop restores the terminal, runs the step on the
//! main thread with inherited stdio, re-initializes the terminal and feeds
//! the outcome back through `update` like any other message.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::fs::LocalFs;
use crate::core::state::App;
use crate::services::{Drive, Services};
use crate::tui::event::{TuiEvent, paste_keys, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        enable_modes()?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        disable_modes();
    }
}

fn enable_modes() -> std::io::Result<()> {
    // Unsupported terminals ignore the enhancement flags; REPORT_EVENT_TYPES
    // lets key releases be filtered out.
    execute!(
        stdout(),
        EnableBracketedPaste,
        Show,
        SetCursorStyle::SteadyBlock,
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
        )
    )
}

fn disable_modes() {
    let _ = execute!(
        stdout(),
        PopKeyboardEnhancementFlags,
        DisableBracketedPaste,
        Hide
    );
}

/// Outcome of dispatching one action.
enum Dispatch {
    Continue,
    Quit,
}

/// The event loop's view of the outside world.
struct Runtime {
    services: Services,
    tx: mpsc::Sender<Action>,
}

impl Runtime {
    /// Feed `action` to `update` and carry out the effect, suspending the
    /// terminal for any interactive step along the way.
    fn dispatch(
        &self,
        app: &mut App,
        terminal: &mut DefaultTerminal,
        action: Action,
    ) -> std::io::Result<Dispatch> {
        let effect = update(app, action);
        let drive = self.services.drive(app, effect, &self.tx, |foreground| {
            self.run_suspended(terminal, foreground)
        })?;
        Ok(match drive {
            Drive::Continue(_) => Dispatch::Continue,
            Drive::Quit => Dispatch::Quit,
        })
    }

    fn run_suspended(
        &self,
        terminal: &mut DefaultTerminal,
        effect: Effect,
    ) -> std::io::Result<Option<Action>> {
        info!("Suspending TUI for interactive step");
        disable_modes();
        ratatui::restore();

        let action = self.services.run_interactive(effect);

        *terminal = ratatui::init();
        enable_modes()?;
        terminal.clear()?;
        info!("TUI resumed");
        Ok(action)
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let fs = std::sync::Arc::new(LocalFs::new());
    let mut app = App::new(fs, config.show_hidden);
    let (tx, rx) = mpsc::channel();
    let runtime = Runtime {
        services: Services::from_config(&config),
        tx,
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new()?;

    let start_time = Instant::now();
    let mut needs_redraw = true;

    'main: loop {
        let animating = app.screen.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Drain everything pending before the next draw.
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let keys: Vec<_> = match event {
                TuiEvent::Resize => continue,
                TuiEvent::Key(key) => vec![key],
                TuiEvent::Paste(text) => paste_keys(&text).collect(),
            };
            for key in keys {
                if let Dispatch::Quit = runtime.dispatch(&mut app, &mut terminal, Action::Key(key))? {
                    break 'main;
                }
            }
        }

        // Messages from background tasks.
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if let Dispatch::Quit = runtime.dispatch(&mut app, &mut terminal, action)? {
                break 'main;
            }
        }
    }

    info!("Leaving wizard on {:?}", app.screen);
    ratatui::restore();
    Ok(())
}

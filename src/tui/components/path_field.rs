//! # PathField Component
//!
//! Renders a [`PathInput`]: the bordered input line, a validation error or
//! the completion dropdown beneath it, and the directory browser as an
//! overlay covering the whole area.
//!
//! ```text
//! ┌ Directory ───────────────────┐
//! │~/code/ge█                    │
//! └──────────────────────────────┘
//!   gearup
//!   gems
//! ```
//!
//! The terminal caret is placed with `set_cursor_position` while typing; the
//! column is measured with `unicode-width` so wide glyphs line up.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::path_input::{Browser, BrowserRow, Completion, Mode, PathInput};
use crate::tui::component::Component;

/// Rows of the completion dropdown shown at once.
const DROPDOWN_ROWS: u16 = 8;

/// Transient render wrapper around the core path input state.
pub struct PathField<'a> {
    input: &'a PathInput,
    title: &'a str,
}

impl<'a> PathField<'a> {
    pub fn new(input: &'a PathInput, title: &'a str) -> Self {
        Self { input, title }
    }
}

impl Component for PathField<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if let Mode::Browser(browser) = &self.input.mode {
            render_browser(frame, area, browser);
            return;
        }

        let [input_area, below] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.title));
        let inner = block.inner(input_area);
        frame.render_widget(
            Paragraph::new(self.input.buffer.text()).block(block),
            input_area,
        );

        let caret = self.input.buffer.before_cursor().width() as u16;
        let max_x = inner.x + inner.width.saturating_sub(1);
        frame.set_cursor_position(((inner.x + caret).min(max_x), inner.y));

        match &self.input.mode {
            Mode::Completion(completion) => render_dropdown(frame, below, completion),
            _ => {
                if let Some(error) = &self.input.error {
                    let line = Line::from(Span::styled(
                        format!(" {error}"),
                        Style::default().fg(Color::Red),
                    ));
                    frame.render_widget(line, below);
                }
            }
        }
    }
}

fn render_dropdown(frame: &mut Frame, area: Rect, completion: &Completion) {
    let height = (completion.candidates.len() as u16).min(DROPDOWN_ROWS).min(area.height);
    let area = Rect { height, ..area };

    let items: Vec<ListItem> = completion
        .candidates
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let style = if i == completion.highlighted {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(Line::from(Span::styled(format!("  {name}/"), style)))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(completion.highlighted));
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(List::new(items), area, &mut state);
}

fn render_browser(frame: &mut Frame, area: Rect, browser: &Browser) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", browser.root.display()))
        .title_bottom(Line::from(" Enter Open  ← Up  Esc Cancel ").centered())
        .padding(Padding::horizontal(1));

    let items: Vec<ListItem> = browser
        .rows()
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            let (text, base) = match row {
                BrowserRow::SelectHere => (
                    "✓ Select this directory".to_string(),
                    Style::default().fg(Color::Green),
                ),
                BrowserRow::Parent => ("../".to_string(), Style::default().fg(Color::DarkGray)),
                BrowserRow::Dir(name) => (format!("{name}/"), Style::default().fg(Color::Gray)),
            };
            let style = if i == browser.cursor {
                base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                base
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(browser.cursor));
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fs::LocalFs;
    use crate::core::key::{Key, KeyCode};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(input: &PathInput, width: u16, height: u16) -> (Vec<String>, Terminal<TestBackend>) {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| PathField::new(input, "Directory").render(f, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let lines = (0..height)
            .map(|y| (0..width).map(|x| buffer[(x, y)].symbol()).collect())
            .collect();
        (lines, terminal)
    }

    #[test]
    fn test_typing_shows_text_and_caret() {
        let mut input = PathInput::new(false);
        input.reset("~/code");
        let (lines, mut terminal) = render(&input, 30, 5);

        assert!(lines[0].contains("Directory"));
        assert!(lines[1].contains("~/code"));
        terminal.backend_mut().assert_cursor_position((7, 1));
    }

    #[test]
    fn test_error_is_shown_below_input() {
        let mut input = PathInput::new(false);
        input.error = Some("Directory does not exist: /nope".to_string());
        let (lines, _) = render(&input, 40, 5);
        assert!(lines[3].contains("Directory does not exist: /nope"));
    }

    #[test]
    fn test_dropdown_lists_candidates() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("alpha")).unwrap();
        std::fs::create_dir(root.path().join("alps")).unwrap();
        let fs = LocalFs::with_home(root.path());

        let mut input = PathInput::new(false);
        input.reset("~/al");
        input.handle_key(Key::new(KeyCode::Tab), &fs);
        assert!(matches!(input.mode, Mode::Completion(_)));

        let (lines, _) = render(&input, 30, 6);
        assert!(lines[3].contains("alpha/"));
        assert!(lines[4].contains("alps/"));
    }

    #[test]
    fn test_browser_overlay_lists_rows() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("projects")).unwrap();
        let fs = LocalFs::with_home(root.path());

        let mut input = PathInput::new(false);
        input.reset("");
        input.handle_key(Key::ctrl('b'), &fs);
        assert!(matches!(input.mode, Mode::Browser(_)));

        let (lines, _) = render(&input, 50, 8);
        let text = lines.join("\n");
        assert!(text.contains("Select this directory"));
        assert!(text.contains("../"));
        assert!(text.contains("projects/"));
    }
}

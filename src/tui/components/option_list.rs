//! # OptionList Component
//!
//! Renders a menu screen's rows. Separators are drawn as dim rules and are
//! never highlighted; the cursor row is reversed.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::core::options::MenuOption;
use crate::tui::component::Component;

pub struct OptionList<'a> {
    pub options: &'a [MenuOption],
    pub cursor: usize,
}

impl<'a> OptionList<'a> {
    pub fn new(options: &'a [MenuOption], cursor: usize) -> Self {
        Self { options, cursor }
    }
}

impl Component for OptionList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rule = "─".repeat(area.width.saturating_sub(4).min(24) as usize);
        let items: Vec<ListItem> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                if option.is_separator() {
                    return ListItem::new(Line::from(Span::styled(
                        format!("  {rule}"),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
                let selected = i == self.cursor;
                let marker = if selected { "▸ " } else { "  " };
                let style = if selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(option.label.clone(), style),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.cursor));
        frame.render_stateful_widget(List::new(items), area, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::Pick;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_renders_labels_and_separator() {
        let options = vec![
            MenuOption::new("Start installation", Pick::StartInstall),
            MenuOption::separator(),
            MenuOption::new("Quit", Pick::Quit),
        ];
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| OptionList::new(&options, 2).render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let line = |y: u16| -> String {
            (0..40).map(|x| buffer[(x, y)].symbol()).collect::<String>()
        };
        assert!(line(0).starts_with("  Start installation"));
        assert!(line(1).contains('─'));
        assert!(line(2).starts_with("▸ Quit"));
    }

    #[test]
    fn test_cursor_row_is_reversed() {
        let options = vec![
            MenuOption::new("Yes", Pick::Yes),
            MenuOption::new("No", Pick::No),
        ];
        let backend = TestBackend::new(20, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| OptionList::new(&options, 0).render(f, f.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert!(buffer[(2, 0)].modifier.contains(Modifier::REVERSED));
        assert!(!buffer[(2, 1)].modifier.contains(Modifier::REVERSED));
    }
}

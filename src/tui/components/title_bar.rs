//! # TitleBar Component
//!
//! Top status bar: application name, the current screen's title and any
//! transient status message.
//!
//! ## Conditional Formatting
//!
//! 1. **Leader armed**: `"gearup › Shell | ␣ …"`
//! 2. **Status message**: `"gearup › Shell | Select at least one item"`
//! 3. **Default**: `"gearup › Shell"`
//!
//! The leader indicator wins over the status message so a pending chord is
//! always visible.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar. Stateless; all fields are props.
pub struct TitleBar {
    /// Title of the current screen (e.g. "Shell")
    pub screen_title: String,
    /// Transient status (e.g. a validation hint)
    pub status_message: String,
    /// Whether the leader key is waiting for its second key
    pub leader_armed: bool,
}

impl TitleBar {
    pub fn new(screen_title: String, status_message: String, leader_armed: bool) -> Self {
        Self {
            screen_title,
            status_message,
            leader_armed,
        }
    }
}

impl Component for TitleBar {
    /// Single line, no block: the bar is always one row high.
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                "gearup",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" › {}", self.screen_title)),
        ];

        if self.leader_armed {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled("␣ …", Style::default().fg(Color::Yellow)));
        } else if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                self.status_message.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "Choose AI tools".to_string(),
            "Select at least one item".to_string(),
            false,
        );
        let text = render_text(&mut title_bar);

        assert!(text.contains("gearup"));
        assert!(text.contains("Choose AI tools"));
        assert!(text.contains("Select at least one item"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let mut title_bar = TitleBar::new("Shell".to_string(), "".to_string(), false);
        let text = render_text(&mut title_bar);

        assert!(text.contains("gearup › Shell"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_leader_indicator_hides_status() {
        let mut title_bar = TitleBar::new("Shell".to_string(), "stale hint".to_string(), true);
        let text = render_text(&mut title_bar);

        assert!(text.contains("␣ …"));
        assert!(!text.contains("stale hint"));
    }
}

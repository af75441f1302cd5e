//! # Welcome Banner Component
//!
//! The block-letter banner, tagline and version shown above the welcome
//! screen's options. Centered vertically within its area.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const BANNER: &[&str] = &[
    "  __ _  ___  __ _ _ __ _   _ _ __  ",
    " / _` |/ _ \\/ _` | '__| | | | '_ \\ ",
    "| (_| |  __/ (_| | |  | |_| | |_) |",
    " \\__, |\\___|\\__,_|_|   \\__,_| .__/ ",
    " |___/                      |_|    ",
];

pub struct WelcomeBanner;

impl WelcomeBanner {
    pub fn required_height() -> u16 {
        BANNER.len() as u16 + 3
    }
}

impl Component for WelcomeBanner {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = BANNER
            .iter()
            .map(|row| Line::from(Span::styled(*row, Style::default().fg(Color::Cyan))))
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Set up your dev environment in a few keystrokes",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        )));

        let [centered] = Layout::vertical([Constraint::Length(lines.len() as u16)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered,
        );
    }
}

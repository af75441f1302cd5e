//! # LogView Component
//!
//! Progress for a running install or project flow: a spinner line naming
//! the current step, elapsed time, and the tail of the step log.
//!
//! Log lines are wrapped with `textwrap` before slicing the tail so the
//! newest output is always the last visible row, however long the lines.

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::state::FlowProgress;
use crate::tui::component::Component;

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct LogView<'a> {
    pub flow: &'a FlowProgress,
    pub spinner_frame: usize,
    /// When false the spinner is replaced by a static marker.
    pub running: bool,
}

impl<'a> LogView<'a> {
    pub fn new(flow: &'a FlowProgress, spinner_frame: usize, running: bool) -> Self {
        Self {
            flow,
            spinner_frame,
            running,
        }
    }

    fn header(&self) -> Line<'static> {
        let total = self.flow.steps.len();
        let marker = if self.running {
            SPINNER[self.spinner_frame % SPINNER.len()]
        } else {
            "•"
        };
        let step = match self.flow.current_step() {
            Some(step) => format!(
                "Step {}/{}: {}",
                (self.flow.current + 1).min(total),
                total,
                step.name
            ),
            None => format!("{total} steps finished"),
        };
        let elapsed = Local::now().signed_duration_since(self.flow.started_at);
        let seconds = elapsed.num_seconds().max(0);
        Line::from(vec![
            Span::styled(format!("{marker} "), Style::default().fg(Color::Cyan)),
            Span::styled(step, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("  {}:{:02}", seconds / 60, seconds % 60),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    }
}

/// Wrap `log` to `width` columns and keep the last `height` rows.
pub fn tail_lines(log: &[String], width: u16, height: u16) -> Vec<String> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let wrapped: Vec<String> = log
        .iter()
        .flat_map(|line| {
            let rows = textwrap::wrap(line, &options);
            if rows.is_empty() {
                vec![String::new()]
            } else {
                rows.into_iter().map(|row| row.into_owned()).collect()
            }
        })
        .collect();
    let skip = wrapped.len().saturating_sub(height as usize);
    wrapped.into_iter().skip(skip).collect()
}

fn line_style(line: &str) -> Style {
    if line.starts_with('✗') {
        Style::default().fg(Color::Red)
    } else if line.starts_with('✓') {
        Style::default().fg(Color::Green)
    } else if line.starts_with('▶') {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

impl Component for LogView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [header_area, log_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

        frame.render_widget(self.header(), header_area);

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Output ");
        let inner = block.inner(log_area);
        let lines: Vec<Line> = tail_lines(&self.flow.log, inner.width, inner.height)
            .into_iter()
            .map(|line| {
                let style = line_style(&line);
                Line::from(Span::styled(line, style))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines).block(block), log_area);
    }
}

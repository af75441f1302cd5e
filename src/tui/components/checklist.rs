//! # Checklist Component
//!
//! Multi-select rows with tri-state checkboxes. Callers flatten their
//! selection model (select-all row, group headers, items) into
//! [`ChecklistRow`]s; grouped items are indented under their header.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState};

use crate::core::selection::{CheckState, GroupRange, Row};
use crate::tui::component::Component;

pub struct ChecklistRow {
    pub state: CheckState,
    pub label: String,
    /// Dim text shown after the label.
    pub detail: Option<String>,
    pub indent: bool,
    /// Select-all and group rows are drawn bold.
    pub heading: bool,
}

impl ChecklistRow {
    pub fn new(state: CheckState, label: impl Into<String>) -> Self {
        Self {
            state,
            label: label.into(),
            detail: None,
            indent: false,
            heading: false,
        }
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Builds the row for `row` of a grouped list. `label_of` names an item.
    pub fn for_row<F>(row: Row, state: CheckState, groups: &[GroupRange], label_of: F) -> Self
    where
        F: Fn(usize) -> String,
    {
        match row {
            Row::SelectAll => Self {
                heading: true,
                ..Self::new(state, "Select all")
            },
            Row::Group(g) => Self {
                heading: true,
                ..Self::new(state, groups.get(g).map_or("", |g| g.label.as_str()))
            },
            Row::Item(i) => Self {
                indent: groups.iter().any(|g| g.contains(i)),
                ..Self::new(state, label_of(i))
            },
        }
    }
}

pub struct Checklist {
    pub rows: Vec<ChecklistRow>,
    pub cursor: usize,
}

impl Checklist {
    pub fn new(rows: Vec<ChecklistRow>, cursor: usize) -> Self {
        Self { rows, cursor }
    }
}

impl Component for Checklist {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let selected = i == self.cursor;
                let mut style = match row.state {
                    CheckState::Checked => Style::default().fg(Color::Green),
                    CheckState::Partial => Style::default().fg(Color::Yellow),
                    CheckState::Unchecked => Style::default().fg(Color::Gray),
                };
                if row.heading {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                let indent = if row.indent { "    " } else { "  " };
                let mut spans = vec![
                    Span::raw(indent),
                    Span::styled(format!("{} {}", row.state.glyph(), row.label), style),
                ];
                if let Some(detail) = &row.detail {
                    spans.push(Span::styled(
                        format!("  {detail}"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.cursor));
        frame.render_stateful_widget(List::new(items), area, &mut state);
    }
}

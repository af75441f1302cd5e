//! # Selection Lists
//!
//! Multi-select over a flat or grouped list. `selected` is the only stored
//! selection state; the "select all" control and group headers read their
//! checkbox from it on demand.
//!
//! ```text
//! [-] Select all          <- Row::SelectAll
//! [✓] git                 <- Row::Group(0)    covers items 0..2
//!     [✓] git-commit      <- Row::Item(0)
//!     [✓] git-pr          <- Row::Item(1)
//! [ ] notes               <- Row::Item(2)     ungrouped
//! ```

use std::ops::Range;

/// Derived checkbox state for a range of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Checked,
    Unchecked,
    Partial,
}

impl CheckState {
    pub fn of(selected: &[bool]) -> Self {
        let on = selected.iter().filter(|&&s| s).count();
        if on == 0 {
            CheckState::Unchecked
        } else if on == selected.len() {
            CheckState::Checked
        } else {
            CheckState::Partial
        }
    }

    pub fn from_bool(selected: bool) -> Self {
        if selected {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            CheckState::Checked => "[✓]",
            CheckState::Unchecked => "[ ]",
            CheckState::Partial => "[-]",
        }
    }
}

/// Flip a range all-or-nothing: select everything unless it is all selected
/// already, in which case clear it. An empty range is left alone.
pub fn toggle_range(selected: &mut [bool], range: Range<usize>) {
    let end = range.end.min(selected.len());
    let start = range.start.min(end);
    let slice = &mut selected[start..end];
    if slice.is_empty() {
        return;
    }
    let target = !slice.iter().all(|&s| s);
    slice.iter_mut().for_each(|s| *s = target);
}

/// A contiguous, labeled run of items `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRange {
    pub label: String,
    pub start: usize,
    pub end: usize,
}

impl GroupRange {
    pub fn new(label: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }
}

/// One visible row of a selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    SelectAll,
    /// Index into the group list.
    Group(usize),
    /// Index into the item list.
    Item(usize),
}

/// Lay out rows: select-all first, then items in order with each group's
/// header placed before its first item.
pub fn layout_rows(item_count: usize, groups: &[GroupRange]) -> Vec<Row> {
    let mut rows = Vec::with_capacity(item_count + groups.len() + 1);
    rows.push(Row::SelectAll);
    for item in 0..item_count {
        if let Some(g) = groups.iter().position(|g| g.start == item && g.end > g.start) {
            rows.push(Row::Group(g));
        }
        rows.push(Row::Item(item));
    }
    rows
}

/// Apply a toggle on `row` against `selected`.
pub fn toggle_row(selected: &mut [bool], groups: &[GroupRange], row: Row) {
    match row {
        Row::SelectAll => toggle_range(selected, 0..selected.len()),
        Row::Group(g) => {
            if let Some(group) = groups.get(g) {
                toggle_range(selected, group.range());
            }
        }
        Row::Item(i) => {
            if let Some(s) = selected.get_mut(i) {
                *s = !*s;
            }
        }
    }
}

/// Checkbox for `row`, always computed from `selected`.
pub fn row_state(selected: &[bool], groups: &[GroupRange], row: Row) -> CheckState {
    match row {
        Row::SelectAll => CheckState::of(selected),
        Row::Group(g) => groups
            .get(g)
            .map(|group| {
                let end = group.end.min(selected.len());
                CheckState::of(&selected[group.start.min(end)..end])
            })
            .unwrap_or(CheckState::Unchecked),
        Row::Item(i) => CheckState::from_bool(selected.get(i).copied().unwrap_or(false)),
    }
}

/// A multi-select list owning its items.
#[derive(Debug, Clone)]
pub struct SelectionList<T> {
    items: Vec<T>,
    selected: Vec<bool>,
    groups: Vec<GroupRange>,
}

impl<T> Default for SelectionList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: Vec::new(),
            groups: Vec::new(),
        }
    }
}

impl<T> SelectionList<T> {
    pub fn new(items: Vec<T>) -> Self {
        let selected = vec![false; items.len()];
        Self {
            items,
            selected,
            groups: Vec::new(),
        }
    }

    /// Group consecutive items by `key`. Items must already be ordered so that
    /// equal keys are adjacent.
    pub fn grouped_by<F>(items: Vec<T>, key: F) -> Self
    where
        F: Fn(&T) -> String,
    {
        let mut groups: Vec<GroupRange> = Vec::new();
        for (i, item) in items.iter().enumerate() {
            let label = key(item);
            match groups.last_mut() {
                Some(last) if last.label == label && last.end == i => last.end = i + 1,
                _ => groups.push(GroupRange::new(label, i, i + 1)),
            }
        }
        let mut list = Self::new(items);
        list.groups = groups;
        list
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected(&self) -> &[bool] {
        &self.selected
    }

    pub fn groups(&self) -> &[GroupRange] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn rows(&self) -> Vec<Row> {
        layout_rows(self.items.len(), &self.groups)
    }

    pub fn row_count(&self) -> usize {
        self.rows().len()
    }

    /// Toggle whatever occupies row `cursor`. Out-of-range cursors do nothing.
    pub fn toggle(&mut self, cursor: usize) {
        if let Some(row) = self.rows().get(cursor).copied() {
            toggle_row(&mut self.selected, &self.groups, row);
        }
    }

    pub fn set_selected(&mut self, index: usize, value: bool) {
        if let Some(s) = self.selected.get_mut(index) {
            *s = value;
        }
    }

    pub fn state(&self, row: Row) -> CheckState {
        row_state(&self.selected, &self.groups, row)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    pub fn selected_items(&self) -> Vec<&T> {
        self.items
            .iter()
            .zip(&self.selected)
            .filter_map(|(item, &on)| on.then_some(item))
            .collect()
    }
}

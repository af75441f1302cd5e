//! # Framework Modules
//!
//! Static catalog of AI framework modules and the per-category selection map
//! behind the two-level drill-down. A category's `Vec<bool>` is created the
//! first time the user enters it and is kept for the rest of the session.
//!
//! Sub-groups inside a category are textual: contiguous items whose ids share
//! the part before the first `-` form a group. They are derived on every call.

use std::collections::HashMap;

use crate::core::selection::{self, CheckState, GroupRange, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleItem {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleCategory {
    pub id: &'static str,
    pub label: &'static str,
    pub items: &'static [ModuleItem],
}

const fn item(id: &'static str, label: &'static str) -> ModuleItem {
    ModuleItem { id, label }
}

pub const CATEGORIES: &[ModuleCategory] = &[
    ModuleCategory {
        id: "workflow",
        label: "Spec-driven workflow",
        items: &[
            item("sdd-explore", "Explore the codebase"),
            item("sdd-propose", "Write a change proposal"),
            item("sdd-spec", "Draft specifications"),
            item("sdd-apply", "Apply tasks"),
            item("sdd-verify", "Verify against spec"),
            item("review", "Adversarial code review"),
        ],
    },
    ModuleCategory {
        id: "git",
        label: "Git & collaboration",
        items: &[
            item("git-commit", "Conventional commits"),
            item("git-pr", "Pull request descriptions"),
            item("git-changelog", "Changelog generation"),
            item("issue-triage", "Issue triage"),
        ],
    },
    ModuleCategory {
        id: "languages",
        label: "Language skills",
        items: &[
            item("rust-idioms", "Rust idioms"),
            item("rust-testing", "Rust testing"),
            item("ts-react", "React with TypeScript"),
            item("ts-node", "Node services"),
            item("go-services", "Go services"),
            item("python-typing", "Typed Python"),
        ],
    },
    ModuleCategory {
        id: "memory",
        label: "Memory & context",
        items: &[
            item("memory-save", "Save session notes"),
            item("memory-recall", "Recall project context"),
        ],
    },
];

/// Module ids the Minimal preset installs.
pub const MINIMAL_MODULES: &[&str] = &["sdd-explore", "sdd-apply", "git-commit"];

pub fn all_module_ids() -> Vec<String> {
    CATEGORIES
        .iter()
        .flat_map(|c| c.items.iter().map(|i| i.id.to_string()))
        .collect()
}

fn group_prefix(id: &str) -> Option<&str> {
    id.split_once('-').map(|(prefix, _)| prefix)
}

/// Find contiguous runs (two or more items) sharing an id prefix.
pub fn derive_groups(items: &[ModuleItem]) -> Vec<GroupRange> {
    let mut groups = Vec::new();
    let mut start = 0;
    while start < items.len() {
        let prefix = group_prefix(items[start].id);
        let mut end = start + 1;
        while end < items.len() && prefix.is_some() && group_prefix(items[end].id) == prefix {
            end += 1;
        }
        if let Some(prefix) = prefix
            && end - start >= 2
        {
            groups.push(GroupRange::new(prefix, start, end));
        }
        start = end;
    }
    groups
}

/// Per-category selection, created lazily.
#[derive(Debug, Clone, Default)]
pub struct CategorySelections {
    selections: HashMap<&'static str, Vec<bool>>,
}

impl CategorySelections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the category's selection on first visit; keep it afterwards.
    pub fn enter(&mut self, category: &ModuleCategory) {
        self.selections
            .entry(category.id)
            .or_insert_with(|| vec![false; category.items.len()]);
    }

    pub fn is_initialized(&self, category_id: &str) -> bool {
        self.selections.contains_key(category_id)
    }

    pub fn get(&self, category_id: &str) -> Option<&[bool]> {
        self.selections.get(category_id).map(Vec::as_slice)
    }

    pub fn rows(category: &ModuleCategory) -> Vec<Row> {
        selection::layout_rows(category.items.len(), &derive_groups(category.items))
    }

    pub fn toggle(&mut self, category: &ModuleCategory, cursor: usize) {
        let groups = derive_groups(category.items);
        let rows = selection::layout_rows(category.items.len(), &groups);
        let Some(row) = rows.get(cursor).copied() else {
            return;
        };
        self.enter(category);
        if let Some(selected) = self.selections.get_mut(category.id) {
            selection::toggle_row(selected, &groups, row);
        }
    }

    pub fn row_state(&self, category: &ModuleCategory, row: Row) -> CheckState {
        let groups = derive_groups(category.items);
        match self.get(category.id) {
            Some(selected) => selection::row_state(selected, &groups, row),
            None => CheckState::Unchecked,
        }
    }

    /// Summary checkbox for the category list.
    pub fn category_state(&self, category: &ModuleCategory) -> CheckState {
        self.get(category.id)
            .map(CheckState::of)
            .unwrap_or(CheckState::Unchecked)
    }

    /// Selected module ids across every visited category, in catalog order.
    pub fn selected_ids(&self) -> Vec<String> {
        CATEGORIES
            .iter()
            .filter_map(|c| self.get(c.id).map(|sel| (c, sel)))
            .flat_map(|(c, sel)| {
                c.items
                    .iter()
                    .zip(sel.iter())
                    .filter_map(|(item, &on)| on.then(|| item.id.to_string()))
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.selections.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(id: &str) -> &'static ModuleCategory {
        CATEGORIES.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn test_derive_groups_finds_prefix_runs() {
        let groups = derive_groups(category("workflow").items);
        assert_eq!(groups, vec![GroupRange::new("sdd", 0, 5)]);

        let groups = derive_groups(category("languages").items);
        assert_eq!(
            groups,
            vec![GroupRange::new("rust", 0, 2), GroupRange::new("ts", 2, 4)]
        );
    }

    #[test]
    fn test_single_items_are_not_grouped() {
        let items = [item("a-1", "x"), item("b-1", "y"), item("plain", "z")];
        assert!(derive_groups(&items).is_empty());
    }

    #[test]
    fn test_selection_is_created_lazily() {
        let mut selections = CategorySelections::new();
        assert!(!selections.is_initialized("git"));
        selections.enter(category("git"));
        assert!(selections.is_initialized("git"));
        assert!(!selections.is_initialized("workflow"));
        assert_eq!(selections.get("git"), Some(&[false, false, false, false][..]));
    }

    #[test]
    fn test_reentering_preserves_selection() {
        let mut selections = CategorySelections::new();
        let git = category("git");
        selections.enter(git);
        selections.toggle(git, 1); // git group header
        selections.enter(git);
        assert_eq!(selections.get("git"), Some(&[true, true, true, false][..]));
        assert_eq!(selections.category_state(git), CheckState::Partial);
    }

    #[test]
    fn test_selected_ids_in_catalog_order() {
        let mut selections = CategorySelections::new();
        selections.toggle(category("memory"), 0);
        selections.toggle(category("workflow"), 7); // review
        assert_eq!(
            selections.selected_ids(),
            vec!["review", "memory-save", "memory-recall"]
        );
    }

    #[test]
    fn test_minimal_modules_exist_in_catalog() {
        let ids = all_module_ids();
        for id in MINIMAL_MODULES {
            assert!(ids.iter().any(|i| i == id), "{id} missing");
        }
    }
}

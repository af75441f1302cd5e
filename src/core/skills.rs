//! # Skills
//!
//! Skill records as reported by the catalog collaborator. Category strings are
//! opaque: they only group rows and pick an icon.

use crate::core::selection::SelectionList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillInfo {
    pub name: String,
    pub description: String,
    pub category: String,
    pub installed: bool,
}

/// Which catalog operation a skill list feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillOp {
    Install,
    Remove,
}

impl SkillOp {
    pub fn verb(self) -> &'static str {
        match self {
            SkillOp::Install => "Installed",
            SkillOp::Remove => "Removed",
        }
    }
}

pub fn category_icon(category: &str) -> &'static str {
    match category {
        "workflow" => "⚙",
        "git" => "±",
        "testing" => "✔",
        "docs" => "✎",
        "languages" | "language" => "λ",
        _ => "•",
    }
}

/// Sort by category then name so each category is one contiguous group.
pub fn sorted(mut skills: Vec<SkillInfo>) -> Vec<SkillInfo> {
    skills.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
    skills
}

/// Selection list of the skills an operation applies to, grouped by category.
pub fn selection_for(skills: &[SkillInfo], op: SkillOp) -> SelectionList<SkillInfo> {
    let wanted = op == SkillOp::Remove;
    let candidates: Vec<SkillInfo> = skills
        .iter()
        .filter(|s| s.installed == wanted)
        .cloned()
        .collect();
    SelectionList::grouped_by(sorted(candidates), |s| s.category.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::Row;

    fn skill(name: &str, category: &str, installed: bool) -> SkillInfo {
        SkillInfo {
            name: name.into(),
            description: String::new(),
            category: category.into(),
            installed,
        }
    }

    #[test]
    fn test_install_list_only_has_uninstalled_grouped() {
        let skills = vec![
            skill("pr", "git", false),
            skill("tdd", "testing", false),
            skill("commit", "git", false),
            skill("done", "git", true),
        ];
        let list = selection_for(&skills, SkillOp::Install);
        let names: Vec<&str> = list.items().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["commit", "pr", "tdd"]);
        assert_eq!(list.groups().len(), 2);
        assert_eq!(list.groups()[0].label, "git");
        assert_eq!(list.rows()[1], Row::Group(0));
    }

    #[test]
    fn test_remove_list_only_has_installed() {
        let skills = vec![skill("a", "git", true), skill("b", "git", false)];
        let list = selection_for(&skills, SkillOp::Remove);
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].name, "a");
    }

    #[test]
    fn test_unknown_category_gets_default_icon() {
        assert_eq!(category_icon("mystery"), "•");
        assert_eq!(category_icon("git"), "±");
    }
}

//! Flattening a forest into the rows a tree view currently shows

use crate::expansion::ExpansionState;
use crate::types::{EmployeeId, Forest, HierarchyNode};
use serde::Serialize;

/// One displayed row: a node occurrence plus its indentation depth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleRow<'a> {
    pub id: &'a EmployeeId,
    pub name: &'a str,
    pub role: &'a str,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

impl<'a> VisibleRow<'a> {
    fn new(node: &'a HierarchyNode, depth: usize, expanded: bool) -> Self {
        Self {
            id: &node.id,
            name: &node.name,
            role: node.display_role(),
            depth,
            has_children: !node.is_leaf(),
            expanded,
        }
    }

    /// Detach the row from the forest's lifetime
    pub fn to_owned_row(&self) -> OwnedVisibleRow {
        OwnedVisibleRow {
            id: self.id.clone(),
            name: self.name.to_string(),
            role: self.role.to_string(),
            depth: self.depth,
            has_children: self.has_children,
            expanded: self.expanded,
        }
    }
}

/// A [`VisibleRow`] that owns its strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnedVisibleRow {
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
}

/// Pre-order rows, descending into a node only when it is expanded.
///
/// Every appearance of a shared subordinate gets its own row, so the work
/// done is proportional to the rows returned.
pub fn visible_rows<'a>(forest: &'a Forest, state: &ExpansionState) -> Vec<VisibleRow<'a>> {
    let mut rows = Vec::new();
    let mut stack: Vec<(&HierarchyNode, usize)> =
        forest.iter().rev().map(|n| (n, 0)).collect();
    while let Some((node, depth)) = stack.pop() {
        let expanded = state.is_expanded(node.id.as_str());
        rows.push(VisibleRow::new(node, depth, expanded));
        if expanded {
            for child in node.subordinates.iter().rev() {
                stack.push((child.as_ref(), depth + 1));
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_hierarchy;
    use crate::types::EmployeeRecord;

    fn forest() -> Forest {
        build_hierarchy(&[
            EmployeeRecord::new("alice", "Alice").with_role("Manager"),
            EmployeeRecord::new("bob", "Bob").reports_to("alice"),
            EmployeeRecord::new("carol", "Carol")
                .with_role("Rep")
                .with_custom_role("Senior Rep")
                .reports_to("alice")
                .reports_to("bob"),
        ])
    }

    fn summary(rows: &[VisibleRow<'_>]) -> Vec<(String, usize)> {
        rows.iter().map(|r| (r.id.to_string(), r.depth)).collect()
    }

    #[test]
    fn test_collapsed_shows_roots_only() {
        let forest = forest();
        let rows = visible_rows(&forest, &ExpansionState::new());
        assert_eq!(summary(&rows), vec![("alice".to_string(), 0)]);
        assert!(rows[0].has_children);
        assert!(!rows[0].expanded);
    }

    #[test]
    fn test_expanding_by_id_opens_every_copy() {
        let forest = forest();
        let mut state = ExpansionState::new();
        state.expand_all(&forest);
        let rows = visible_rows(&forest, &state);
        assert_eq!(
            summary(&rows),
            vec![
                ("alice".to_string(), 0),
                ("bob".to_string(), 1),
                ("carol".to_string(), 2),
                ("carol".to_string(), 1),
            ]
        );
        assert_eq!(rows[2].role, "Senior Rep");
        assert!(!rows[3].has_children);
    }

    #[test]
    fn test_seeded_state_hides_third_level() {
        let forest = forest();
        let state = ExpansionState::seeded(&forest);
        let rows = visible_rows(&forest, &state);
        // bob is expanded as a second-level node, so carol under bob shows
        assert_eq!(rows.len(), 4);

        let mut shallow = ExpansionState::new();
        shallow.expand("alice");
        assert_eq!(visible_rows(&forest, &shallow).len(), 3);
    }

    #[test]
    fn test_owned_row() {
        let forest = forest();
        let rows = visible_rows(&forest, &ExpansionState::new());
        let owned = rows[0].to_owned_row();
        assert_eq!(owned.name, "Alice");
        assert_eq!(owned.role, "Manager");
    }
}

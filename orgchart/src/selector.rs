//! Chooses between a source-supplied forest and a locally built one

use crate::builder::HierarchyBuilder;
use crate::types::{EmployeeRecord, Forest};
use tracing::debug;

/// Where a selected forest came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForestSource {
    /// The data source's own hierarchy, returned unchanged
    Supplied,
    /// Built from the flat employee list
    Built,
}

/// Prefers a non-empty supplied forest, otherwise builds one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForestSelector {
    builder: HierarchyBuilder,
}

impl ForestSelector {
    /// Selector that falls back to `builder`
    pub fn new(builder: HierarchyBuilder) -> Self {
        Self { builder }
    }

    /// The supplied forest when present and non-empty, otherwise a built one
    pub fn select(&self, supplied: Option<Forest>, employees: &[EmployeeRecord]) -> Forest {
        self.select_with_source(supplied, employees).0
    }

    /// Same as [`select`](Self::select), also reporting which branch was taken
    pub fn select_with_source(
        &self,
        supplied: Option<Forest>,
        employees: &[EmployeeRecord],
    ) -> (Forest, ForestSource) {
        match supplied {
            Some(forest) if !forest.is_empty() => {
                debug!(roots = forest.len(), "using supplied hierarchy");
                (forest, ForestSource::Supplied)
            }
            _ => {
                debug!(employees = employees.len(), "building hierarchy from employee list");
                (self.builder.build(employees), ForestSource::Built)
            }
        }
    }
}

/// Select with the default builder
pub fn select_forest(supplied: Option<Forest>, employees: &[EmployeeRecord]) -> Forest {
    ForestSelector::default().select(supplied, employees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CyclePolicy;
    use crate::types::HierarchyNode;

    fn employees() -> Vec<EmployeeRecord> {
        vec![
            EmployeeRecord::new("alice", "Alice"),
            EmployeeRecord::new("bob", "Bob").reports_to("alice"),
        ]
    }

    #[test]
    fn test_supplied_forest_returned_unchanged() {
        // Deliberately disagrees with the employee list
        let supplied = Forest::from(vec![HierarchyNode::new("zed", "Zed")
            .with_subordinate(HierarchyNode::new("alice", "Alice"))]);
        let (forest, source) =
            ForestSelector::default().select_with_source(Some(supplied.clone()), &employees());
        assert_eq!(source, ForestSource::Supplied);
        assert_eq!(forest, supplied);
    }

    #[test]
    fn test_absent_forest_builds() {
        let (forest, source) = ForestSelector::default().select_with_source(None, &employees());
        assert_eq!(source, ForestSource::Built);
        assert_eq!(forest.root_ids(), vec![crate::types::EmployeeId::from("alice")]);
    }

    #[test]
    fn test_empty_supplied_forest_builds() {
        let forest = select_forest(Some(Forest::new()), &employees());
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.roots()[0].subordinates.len(), 1);
    }

    #[test]
    fn test_both_empty() {
        assert!(select_forest(None, &[]).is_empty());
    }

    #[test]
    fn test_selector_uses_configured_builder() {
        let cyclic = vec![
            EmployeeRecord::new("a", "A").reports_to("b"),
            EmployeeRecord::new("b", "B").reports_to("a"),
        ];
        let dropping = ForestSelector::new(HierarchyBuilder::new().with_cycle_policy(CyclePolicy::Drop));
        assert!(dropping.select(None, &cyclic).is_empty());
        assert_eq!(select_forest(None, &cyclic).len(), 1);
    }
}

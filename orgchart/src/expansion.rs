//! Which nodes of a forest are shown expanded
//!
//! Expansion is tracked by id, separately from the forest. Expanding an id
//! expands every copy of that employee, wherever it appears.

use crate::types::{EmployeeId, Forest, HierarchyNode};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet, VecDeque};
use tracing::trace;

/// Levels pre-expanded when a new forest arrives: roots and their children
pub const INITIAL_EXPANSION_DEPTH: usize = 2;

/// The set of expanded node ids for one hierarchy view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    expanded: BTreeSet<EmployeeId>,
}

impl ExpansionState {
    /// Nothing expanded
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded for a freshly built forest
    pub fn seeded(forest: &Forest) -> Self {
        let mut state = Self::new();
        state.seed_initial_expansion(forest);
        state
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip membership of `id`; returns whether it is now expanded
    pub fn toggle(&mut self, id: impl Into<EmployeeId>) -> bool {
        let id = id.into();
        if self.expanded.remove(&id) {
            trace!(%id, "collapsed");
            false
        } else {
            trace!(%id, "expanded");
            self.expanded.insert(id);
            true
        }
    }

    pub fn expand(&mut self, id: impl Into<EmployeeId>) {
        self.expanded.insert(id.into());
    }

    pub fn collapse(&mut self, id: &str) {
        self.expanded.remove(id);
    }

    /// Expand exactly the ids reachable from the forest's roots
    pub fn expand_all(&mut self, forest: &Forest) {
        self.expanded = forest.distinct_ids().into_iter().collect();
        trace!(expanded = self.expanded.len(), "expanded all");
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Replace the state with the roots and their direct children
    pub fn seed_initial_expansion(&mut self, forest: &Forest) {
        self.seed_to_depth(forest, INITIAL_EXPANSION_DEPTH);
    }

    /// Replace the state with every id in the first `depth` levels.
    ///
    /// Depth 0 clears the state; depth 1 expands only the roots. Levels are
    /// walked breadth-first and a shared subtree is entered once, at the
    /// shallowest level it appears.
    pub fn seed_to_depth(&mut self, forest: &Forest, depth: usize) {
        self.expanded.clear();
        if depth == 0 {
            return;
        }
        let mut entered = HashSet::new();
        let mut queue: VecDeque<(&HierarchyNode, usize)> =
            forest.iter().map(|n| (n, 0)).collect();
        while let Some((node, level)) = queue.pop_front() {
            if !entered.insert(node as *const HierarchyNode) {
                continue;
            }
            self.expanded.insert(node.id.clone());
            if level + 1 < depth {
                queue.extend(node.subordinates.iter().map(|c| (c.as_ref(), level + 1)));
            }
        }
        trace!(depth, expanded = self.expanded.len(), "seeded expansion");
    }

    /// Expand every ancestor on the first path to `id` so it becomes visible.
    ///
    /// Returns false, leaving the state untouched, when `id` is not in the forest.
    pub fn reveal(&mut self, forest: &Forest, id: &str) -> bool {
        match forest.ancestors_of(id) {
            Some(ancestors) => {
                self.expanded.extend(ancestors);
                true
            }
            None => false,
        }
    }

    /// Expanded ids in sorted order
    pub fn expanded_ids(&self) -> Vec<EmployeeId> {
        self.expanded.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

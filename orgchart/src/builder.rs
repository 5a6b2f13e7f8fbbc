//! Flat employee list → forest of reporting lines
//!
//! Roots are inferred: an employee is a root when none of its supervisor
//! references resolve to another employee in the same snapshot. An employee
//! with several resolvable supervisors appears under each of them; the
//! appearances share one subtree, so building stays linear in the number of
//! supervisor edges however many paths lead to an employee.
//!
//! ```rust
//! use orgchart::{build_hierarchy, EmployeeRecord};
//!
//! let forest = build_hierarchy(&[
//!     EmployeeRecord::new("alice", "Alice"),
//!     EmployeeRecord::new("bob", "Bob").reports_to("alice"),
//!     EmployeeRecord::new("carol", "Carol").reports_to("alice").reports_to("bob"),
//! ]);
//!
//! assert_eq!(forest.len(), 1);
//! let alice = &forest.roots()[0];
//! assert_eq!(alice.subordinates.len(), 2);
//! assert_eq!(alice.subordinates[0].subordinates[0].id.as_str(), "carol");
//! ```

use crate::types::{EmployeeRecord, Forest, HierarchyNode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What to do with employees that sit on a supervisor cycle with no path
/// from any inferred root (A reports to B, B reports to A).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CyclePolicy {
    /// Promote the first unreachable employee (input order) to a root and
    /// repeat until everyone is reachable.
    #[default]
    Promote,
    /// Leave the unreachable cluster out of the forest.
    Drop,
}

// Cycles that are reachable from a root are cut, not promoted: walking the
// roots depth-first in order, an edge back to an employee on the current
// path is left out of the forest.

/// Builds a [`Forest`] from a snapshot's employee records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HierarchyBuilder {
    cycle_policy: CyclePolicy,
}

impl HierarchyBuilder {
    /// Builder with the default [`CyclePolicy::Promote`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how unreachable supervisor cycles are handled
    pub fn with_cycle_policy(mut self, cycle_policy: CyclePolicy) -> Self {
        self.cycle_policy = cycle_policy;
        self
    }

    /// Policy applied to unreachable supervisor cycles
    pub fn cycle_policy(&self) -> CyclePolicy {
        self.cycle_policy
    }

    /// Build the forest. Never fails; malformed edges are dropped.
    pub fn build(&self, employees: &[EmployeeRecord]) -> Forest {
        if employees.is_empty() {
            return Forest::new();
        }

        // Canonical node per id, first record wins, input order preserved
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(employees.len());
        let mut canonical: Vec<&EmployeeRecord> = Vec::with_capacity(employees.len());
        for record in employees {
            if !index.contains_key(record.id.as_str()) {
                index.insert(record.id.as_str(), canonical.len());
                canonical.push(record);
            }
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); canonical.len()];
        let mut has_parent = vec![false; canonical.len()];
        let mut dropped_edges = 0usize;

        for record in employees {
            let child = index[record.id.as_str()];
            for supervisor in &record.supervisors {
                if supervisor.id == record.id {
                    dropped_edges += 1;
                    trace!(employee = %record.id, "ignoring self-referencing supervisor");
                    continue;
                }
                match index.get(supervisor.id.as_str()) {
                    Some(&parent) => {
                        has_parent[child] = true;
                        if !children[parent].contains(&child) {
                            children[parent].push(child);
                        }
                    }
                    None => {
                        dropped_edges += 1;
                        debug!(
                            employee = %record.id,
                            supervisor = %supervisor.id,
                            "dropping dangling supervisor reference"
                        );
                    }
                }
            }
        }

        let mut roots: Vec<usize> = (0..canonical.len()).filter(|&i| !has_parent[i]).collect();

        let mut reached = vec![false; canonical.len()];
        for &root in &roots {
            mark_reachable(root, &children, &mut reached);
        }
        let unreachable = reached.iter().filter(|r| !**r).count();
        if unreachable > 0 {
            match self.cycle_policy {
                CyclePolicy::Promote => {
                    for candidate in 0..canonical.len() {
                        if reached[candidate] {
                            continue;
                        }
                        warn!(
                            employee = %canonical[candidate].id,
                            "supervisor cycle has no root, promoting employee to root"
                        );
                        roots.push(candidate);
                        mark_reachable(candidate, &children, &mut reached);
                    }
                }
                CyclePolicy::Drop => {
                    warn!(
                        count = unreachable,
                        "dropping employees caught in supervisor cycles"
                    );
                }
            }
        }

        let mut built: Vec<Option<Arc<HierarchyNode>>> = vec![None; canonical.len()];
        let mut visit = vec![Visit::Unseen; canonical.len()];
        let mut cycle_edges = 0usize;
        for &root in &roots {
            cycle_edges += materialize(root, &canonical, &children, &mut visit, &mut built);
        }
        let forest: Forest = roots
            .iter()
            .filter_map(|&root| built[root].as_deref().cloned())
            .collect();

        debug!(
            employees = employees.len(),
            roots = forest.len(),
            dropped_edges,
            cycle_edges,
            "built hierarchy"
        );

        forest
    }
}

/// Build a forest with the default builder
pub fn build_hierarchy(employees: &[EmployeeRecord]) -> Forest {
    HierarchyBuilder::new().build(employees)
}

fn mark_reachable(start: usize, children: &[Vec<usize>], reached: &mut [bool]) {
    let mut stack = vec![start];
    while let Some(idx) = stack.pop() {
        if reached[idx] {
            continue;
        }
        reached[idx] = true;
        stack.extend(children[idx].iter().copied().filter(|&c| !reached[c]));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unseen,
    OnPath,
    Done,
}

/// Build the node at `start` and everything below it, children before
/// parents, storing each finished node in `built`.
///
/// Every employee is built once and shared by all of its parents. An edge to
/// an employee still on the current depth-first path closes a cycle and is
/// left out. Returns the number of such edges.
fn materialize(
    start: usize,
    canonical: &[&EmployeeRecord],
    children: &[Vec<usize>],
    visit: &mut [Visit],
    built: &mut [Option<Arc<HierarchyNode>>],
) -> usize {
    let mut cycle_edges = 0;
    let mut stack = vec![(start, false)];
    while let Some((idx, children_done)) = stack.pop() {
        if children_done {
            let mut node = HierarchyNode::from_record(canonical[idx]);
            for &child in &children[idx] {
                match &built[child] {
                    Some(shared) => node.subordinates.push(Arc::clone(shared)),
                    None => cycle_edges += 1,
                }
            }
            built[idx] = Some(Arc::new(node));
            visit[idx] = Visit::Done;
            continue;
        }
        if visit[idx] != Visit::Unseen {
            continue;
        }
        visit[idx] = Visit::OnPath;
        stack.push((idx, true));
        for &child in children[idx].iter().rev() {
            if visit[child] == Visit::Unseen {
                stack.push((child, false));
            }
        }
    }
    cycle_edges
}

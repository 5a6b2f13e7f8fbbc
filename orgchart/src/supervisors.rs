//! Lookup from employee id to its declared supervisors
//!
//! The index reflects what each record declares, not what the forest shows:
//! a dangling supervisor reference is still listed here even though the
//! builder dropped the edge.

use crate::types::{EmployeeId, EmployeeRecord, SupervisorRef};
use std::collections::{HashMap, HashSet};

/// Employee id → declared supervisor references, verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupervisorIndex {
    entries: HashMap<EmployeeId, Vec<SupervisorRef>>,
}

impl SupervisorIndex {
    /// Project the supervisor lists out of a snapshot.
    ///
    /// When several records share an id, the first one's list is kept.
    pub fn build(employees: &[EmployeeRecord]) -> Self {
        let mut entries = HashMap::with_capacity(employees.len());
        for record in employees {
            entries
                .entry(record.id.clone())
                .or_insert_with(|| record.supervisors.clone());
        }
        Self { entries }
    }

    /// Supervisors declared by `id`; empty for unknown ids
    pub fn supervisors_of(&self, id: &str) -> &[SupervisorRef] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Comma-separated supervisor names for a "reports to" label
    pub fn reports_to_label(&self, id: &str) -> String {
        self.supervisors_of(id)
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// References declared by `id` whose target is not among `known`
    pub fn dangling<'a>(&'a self, id: &str, known: &HashSet<EmployeeId>) -> Vec<&'a SupervisorRef> {
        self.supervisors_of(id)
            .iter()
            .filter(|s| !known.contains(&s.id))
            .collect()
    }

    /// Whether `id` was present in the snapshot
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

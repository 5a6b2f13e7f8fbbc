//! Snapshot: one complete fetch result from a data source

use super::employee::EmployeeRecord;
use super::node::{fold_shared, Forest, HierarchyNode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;

/// A complete, immutable fetch result.
///
/// `hierarchy` is present when the source computed the forest itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub employees: Vec<EmployeeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<Forest>,
}

impl Snapshot {
    /// Snapshot of a flat employee list with no supplied forest
    pub fn new(employees: Vec<EmployeeRecord>) -> Self {
        Self {
            employees,
            hierarchy: None,
        }
    }

    /// Attach a forest computed by the source
    pub fn with_hierarchy(mut self, hierarchy: Forest) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    /// Identity of this snapshot as a `sha256:`-prefixed hex digest.
    ///
    /// Equal content yields an equal fingerprint regardless of where the
    /// snapshot came from. Every string is length-prefixed so field
    /// boundaries cannot be confused. A supplied forest is hashed bottom-up,
    /// one digest per node over its fields and its subordinates' digests,
    /// so shared subtrees are hashed once.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();

        hasher.update((self.employees.len() as u64).to_le_bytes());
        for record in &self.employees {
            feed(&mut hasher, record.id.as_str());
            feed(&mut hasher, &record.name);
            feed(&mut hasher, &record.email);
            feed(&mut hasher, &record.role);
            feed_opt(&mut hasher, record.custom_role.as_deref());
            feed_opt(&mut hasher, record.avatar_url.as_deref());
            hasher.update((record.supervisors.len() as u64).to_le_bytes());
            for sup in &record.supervisors {
                feed(&mut hasher, sup.id.as_str());
                feed(&mut hasher, &sup.name);
                feed(&mut hasher, &sup.role);
            }
        }

        match &self.hierarchy {
            None => hasher.update([0u8]),
            Some(forest) => {
                hasher.update([1u8]);
                hasher.update((forest.len() as u64).to_le_bytes());
                let mut memo = HashMap::new();
                for root in forest {
                    hasher.update(fold_shared(root, &mut memo, node_digest));
                }
            }
        }

        format!("sha256:{:x}", hasher.finalize())
    }
}

fn node_digest(node: &HierarchyNode, below: &[[u8; 32]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    feed(&mut hasher, node.id.as_str());
    feed(&mut hasher, &node.name);
    feed(&mut hasher, &node.email);
    feed(&mut hasher, &node.role);
    feed_opt(&mut hasher, node.custom_role.as_deref());
    feed_opt(&mut hasher, node.avatar_url.as_deref());
    hasher.update((below.len() as u64).to_le_bytes());
    for digest in below {
        hasher.update(digest);
    }
    hasher.finalize().into()
}

fn feed(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn feed_opt(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(v) => {
            hasher.update([1u8]);
            feed(hasher, v);
        }
        None => hasher.update([0u8]),
    }
}

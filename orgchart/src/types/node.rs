//! Hierarchy nodes and the forest that owns them

use super::employee::EmployeeRecord;
use super::ids::EmployeeId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// One employee's appearance in the forest.
///
/// An employee with several resolvable supervisors appears once under each
/// of them. The builder shares one subtree between those appearances, so the
/// copies are the same allocation and are matched by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub id: EmployeeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub subordinates: Vec<Arc<HierarchyNode>>,
}

impl HierarchyNode {
    /// Create a childless node
    pub fn new(id: impl Into<EmployeeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            role: String::new(),
            custom_role: None,
            avatar_url: None,
            subordinates: Vec::new(),
        }
    }

    /// Copy the display attributes of a record into a childless node
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            email: record.email.clone(),
            role: record.role.clone(),
            custom_role: record.custom_role.clone(),
            avatar_url: record.avatar_url.clone(),
            subordinates: Vec::new(),
        }
    }

    /// Append a subordinate
    pub fn with_subordinate(mut self, node: impl Into<Arc<HierarchyNode>>) -> Self {
        self.subordinates.push(node.into());
        self
    }

    /// Role to display: the custom role when set, otherwise the role
    pub fn display_role(&self) -> &str {
        self.custom_role.as_deref().unwrap_or(&self.role)
    }

    pub fn is_leaf(&self) -> bool {
        self.subordinates.is_empty()
    }

    /// Number of levels in this subtree, counting the node itself
    pub fn height(&self) -> usize {
        fold_shared(self, &mut HashMap::new(), |_, below: &[usize]| {
            1 + below.iter().copied().max().unwrap_or(0)
        })
    }

    /// Number of node occurrences in this subtree, counting the node itself
    /// and every copy of a shared subordinate.
    pub fn occurrence_count(&self) -> usize {
        fold_shared(self, &mut HashMap::new(), |_, below: &[usize]| {
            below.iter().fold(1usize, |acc, n| acc.saturating_add(*n))
        })
    }

    /// Pre-order visit of every node occurrence in this subtree.
    ///
    /// The callback receives each node and its depth relative to `self`.
    /// Shared subtrees are visited once per occurrence.
    pub fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a HierarchyNode, usize),
    {
        let mut stack = vec![(self, 0usize)];
        while let Some((node, depth)) = stack.pop() {
            visit(node, depth);
            for child in node.subordinates.iter().rev() {
                stack.push((child.as_ref(), depth + 1));
            }
        }
    }

    /// First node with the given id in pre-order, including `self`
    pub fn find(&self, id: &str) -> Option<&HierarchyNode> {
        let mut searched = HashSet::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if !searched.insert(node as *const HierarchyNode) {
                continue;
            }
            if node.id.as_str() == id {
                return Some(node);
            }
            stack.extend(node.subordinates.iter().rev().map(Arc::as_ref));
        }
        None
    }

    /// Distinct ids below this node, in first-seen pre-order
    pub fn descendant_ids(&self) -> Vec<EmployeeId> {
        let mut seen = HashSet::new();
        let mut ids = Vec::new();
        let mut stack: Vec<&HierarchyNode> =
            self.subordinates.iter().rev().map(Arc::as_ref).collect();
        while let Some(node) = stack.pop() {
            if !seen.insert(&node.id) {
                continue;
            }
            ids.push(node.id.clone());
            stack.extend(node.subordinates.iter().rev().map(Arc::as_ref));
        }
        ids
    }
}

impl Drop for HierarchyNode {
    // Unlink owned subordinates one at a time so a deep chain does not
    // recurse through nested drops.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.subordinates);
        while let Some(child) = pending.pop() {
            if let Some(mut node) = Arc::into_inner(child) {
                pending.append(&mut node.subordinates);
            }
        }
    }
}

/// Bottom-up fold over a subtree, computing each distinct node once.
///
/// `memo` is keyed by node address, so a subtree shared between several
/// parents is folded a single time. `combine` receives a node and the
/// folded values of its subordinates, in order.
pub(crate) fn fold_shared<'a, T, F>(
    root: &'a HierarchyNode,
    memo: &mut HashMap<*const HierarchyNode, T>,
    mut combine: F,
) -> T
where
    T: Clone,
    F: FnMut(&'a HierarchyNode, &[T]) -> T,
{
    let key = |node: &HierarchyNode| node as *const HierarchyNode;
    let mut stack = vec![(root, false)];
    while let Some((node, children_done)) = stack.pop() {
        if memo.contains_key(&key(node)) {
            continue;
        }
        if children_done {
            let below: Vec<T> = node
                .subordinates
                .iter()
                .filter_map(|child| memo.get(&Arc::as_ptr(child)).cloned())
                .collect();
            let value = combine(node, &below);
            memo.insert(key(node), value);
        } else {
            stack.push((node, true));
            for child in node.subordinates.iter().rev() {
                if !memo.contains_key(&Arc::as_ptr(child)) {
                    stack.push((child.as_ref(), false));
                }
            }
        }
    }
    memo.get(&key(root))
        .cloned()
        .unwrap_or_else(|| combine(root, &[]))
}

/// An ordered collection of root trees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest(Vec<HierarchyNode>);

impl Forest {
    /// An empty forest
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn roots(&self) -> &[HierarchyNode] {
        &self.0
    }

    /// Number of roots
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HierarchyNode> {
        self.0.iter()
    }

    /// Ids of the roots, in order
    pub fn root_ids(&self) -> Vec<EmployeeId> {
        self.0.iter().map(|n| n.id.clone()).collect()
    }

    /// Every distinct id reachable from the roots.
    ///
    /// Each id is visited once; a subtree whose id was already seen under
    /// another parent is not walked again.
    pub fn distinct_ids(&self) -> HashSet<EmployeeId> {
        let mut seen = HashSet::new();
        let mut stack: Vec<&HierarchyNode> = self.0.iter().rev().collect();
        while let Some(node) = stack.pop() {
            if seen.contains(&node.id) {
                continue;
            }
            seen.insert(node.id.clone());
            stack.extend(node.subordinates.iter().rev().map(Arc::as_ref));
        }
        seen
    }

    /// First occurrence of `id` in pre-order across all roots
    pub fn find(&self, id: &str) -> Option<&HierarchyNode> {
        self.0.iter().find_map(|root| root.find(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Ids on the first root-to-node path leading to `id`, excluding `id`.
    ///
    /// Returns `None` when `id` does not occur in the forest.
    pub fn ancestors_of(&self, id: &str) -> Option<Vec<EmployeeId>> {
        // (node, depth) with an explicit path buffer trimmed to depth.
        // A shared subtree searched once need not be searched again.
        let mut searched = HashSet::new();
        let mut path: Vec<&EmployeeId> = Vec::new();
        let mut stack: Vec<(&HierarchyNode, usize)> =
            self.0.iter().rev().map(|n| (n, 0)).collect();
        while let Some((node, depth)) = stack.pop() {
            if !searched.insert(node as *const HierarchyNode) {
                continue;
            }
            path.truncate(depth);
            if node.id.as_str() == id {
                return Some(path.into_iter().cloned().collect());
            }
            path.push(&node.id);
            for child in node.subordinates.iter().rev() {
                stack.push((child.as_ref(), depth + 1));
            }
        }
        None
    }

    /// Total number of node occurrences, duplicates included.
    ///
    /// Counted per distinct node, so a heavily shared forest is not walked
    /// once per occurrence. Saturates at `usize::MAX`.
    pub fn node_count(&self) -> usize {
        let mut memo = HashMap::new();
        self.0.iter().fold(0usize, |total, root| {
            let below = fold_shared(root, &mut memo, |_, below: &[usize]| {
                below.iter().fold(1usize, |acc, n| acc.saturating_add(*n))
            });
            total.saturating_add(below)
        })
    }

    pub fn into_inner(self) -> Vec<HierarchyNode> {
        self.0
    }
}

impl From<Vec<HierarchyNode>> for Forest {
    fn from(roots: Vec<HierarchyNode>) -> Self {
        Self(roots)
    }
}

impl FromIterator<HierarchyNode> for Forest {
    fn from_iter<I: IntoIterator<Item = HierarchyNode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Forest {
    type Item = HierarchyNode;
    type IntoIter = std::vec::IntoIter<HierarchyNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = &'a HierarchyNode;
    type IntoIter = std::slice::Iter<'a, HierarchyNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

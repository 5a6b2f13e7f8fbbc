//! Identifier newtypes

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque employee identifier as issued by the data source.
///
/// Identity in the hierarchy is always by id: two nodes with the same
/// `EmployeeId` are the same employee, wherever they appear in the forest.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Wrap an existing identifier string
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EmployeeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for EmployeeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EmployeeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_employee_id_serializes_transparently() {
        let id = EmployeeId::from("emp-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"emp-42\"");
        let parsed: EmployeeId = serde_json::from_str("\"emp-42\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_employee_id_set_lookup_by_str() {
        let mut set = HashSet::new();
        set.insert(EmployeeId::from("alice"));
        assert!(set.contains("alice"));
        assert!(!set.contains("bob"));
    }
}

//! Employee records as delivered by the data source

use super::ids::EmployeeId;
use serde::{Deserialize, Serialize};

/// A reference from an employee to one of its direct supervisors.
///
/// The reference carries a copy of the supervisor's display attributes so a
/// "reports to" label can be shown even when the id is dangling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorRef {
    pub id: EmployeeId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
}

impl SupervisorRef {
    /// Create a reference to the given supervisor id
    pub fn new(id: impl Into<EmployeeId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            role: String::new(),
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

/// One employee in a snapshot.
///
/// Immutable once fetched; the builder only ever reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
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
    /// Direct supervisors in declaration order
    #[serde(default)]
    pub supervisors: Vec<SupervisorRef>,
}

impl EmployeeRecord {
    /// Create a record with the given id and display name
    pub fn new(id: impl Into<EmployeeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            role: String::new(),
            custom_role: None,
            avatar_url: None,
            supervisors: Vec::new(),
        }
    }

    /// Set the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the role
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Set the custom role shown instead of `role`
    pub fn with_custom_role(mut self, custom_role: impl Into<String>) -> Self {
        self.custom_role = Some(custom_role.into());
        self
    }

    /// Set the avatar URL
    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// Append a supervisor reference
    pub fn with_supervisor(mut self, supervisor: SupervisorRef) -> Self {
        self.supervisors.push(supervisor);
        self
    }

    /// Append a bare supervisor reference by id
    pub fn reports_to(self, id: impl Into<EmployeeId>) -> Self {
        self.with_supervisor(SupervisorRef::new(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_parses_camel_case_wire_format() {
        let json = r#"{
            "id": "bob",
            "name": "Bob",
            "email": "bob@example.com",
            "role": "Field Officer",
            "customRole": "Beat Lead",
            "avatarUrl": "https://cdn.example.com/bob.png",
            "supervisors": [{"id": "alice", "name": "Alice", "role": "Manager"}]
        }"#;
        let record: EmployeeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "bob");
        assert_eq!(record.custom_role.as_deref(), Some("Beat Lead"));
        assert_eq!(record.supervisors.len(), 1);
        assert_eq!(record.supervisors[0].name, "Alice");
    }

    #[test]
    fn test_record_missing_optional_fields() {
        let record: EmployeeRecord = serde_json::from_str(r#"{"id": "solo"}"#).unwrap();
        assert!(record.name.is_empty());
        assert!(record.supervisors.is_empty());
        assert!(record.custom_role.is_none());
    }

    #[test]
    fn test_supervisor_ref_only_id() {
        let sup: SupervisorRef = serde_json::from_str(r#"{"id": "alice"}"#).unwrap();
        assert_eq!(sup, SupervisorRef::new("alice"));
    }

    #[test]
    fn test_builder_helpers() {
        let record = EmployeeRecord::new("carol", "Carol")
            .with_role("Rep")
            .reports_to("alice")
            .with_supervisor(SupervisorRef::new("bob").with_name("Bob"));
        assert_eq!(record.supervisors.len(), 2);
        assert_eq!(record.supervisors[1].name, "Bob");
    }
}

//! Assignee model for the SDK
//!
//! Assignees form a shared roster managed outside any single workflow
//! graph. Task nodes reference roster entries by id only; the roster is
//! passed alongside the graph whenever names or roles need resolving.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Assignee (processor) information.
///
/// # Example
///
/// ```rust
/// use workflow_modelling_sdk::models::Assignee;
///
/// let assignee = Assignee::new("Amy");
/// assert_eq!(assignee.name, "Amy");
/// assert!(!assignee.id.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignee {
    /// Unique identifier, referenced by task nodes
    pub id: String,
    /// Display name
    pub name: String,
    /// Contact e-mail address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role used for lane naming in BPMN exports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Organizational department
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl Assignee {
    /// Create a new roster entry with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Assignee {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: None,
            role: None,
            department: None,
        }
    }

    /// Builder-style role assignment.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

//! Workflow document model for the SDK

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assignee::Assignee;
use super::edge::WorkflowEdge;
use super::node::WorkflowNode;

/// Complete workflow definition as saved by the editor.
///
/// Field names serialize in camelCase and timestamps in RFC 3339, matching
/// the editor's JSON documents.
///
/// # Example
///
/// ```rust
/// use workflow_modelling_sdk::models::{Workflow, WorkflowEdge, WorkflowNode};
///
/// let mut workflow = Workflow::new("Expense Approval");
/// workflow.nodes.push(WorkflowNode::start("s1", "Begin"));
/// workflow.nodes.push(WorkflowNode::end("e1", "Done"));
/// workflow.edges.push(WorkflowEdge::new("ed1", "s1", "e1"));
///
/// let json = workflow.to_json().unwrap();
/// assert!(json.contains("\"createdAt\""));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    #[serde(default)]
    pub assignees: Vec<Assignee>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    /// Create an empty workflow with a generated id and fresh timestamps.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Workflow {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            assignees: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Metadata projection for list display, without node/edge data.
    pub fn metadata(&self) -> WorkflowMetadata {
        WorkflowMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Refresh the update timestamp after an edit.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Serialize to the editor's pretty-printed JSON document format.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Workflow metadata for list display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

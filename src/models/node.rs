//! Workflow node model for the SDK

use serde::{Deserialize, Serialize};

use super::enums::{ApprovalRule, NodeType};

/// Type-specific payload of a workflow node, tagged by the editor's `type`
/// field.
///
/// Task nodes (`Application`, `Approval`) reference assignees by roster id;
/// they never embed assignee records. The editor restricts Application
/// nodes to at most one assignee, but consumers must treat the sequence as
/// 0..N.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeData {
    #[serde(rename = "startNode", rename_all = "camelCase")]
    Start {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    #[serde(rename = "applicationNode", rename_all = "camelCase")]
    Application {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        assignees: Vec<String>,
    },
    #[serde(rename = "approvalNode", rename_all = "camelCase")]
    Approval {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        assignees: Vec<String>,
        #[serde(default)]
        approval_rule: ApprovalRule,
    },
    #[serde(rename = "conditionNode", rename_all = "camelCase")]
    Condition {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        /// Free-text branching expression, opaque to the SDK
        #[serde(default, skip_serializing_if = "Option::is_none")]
        condition: Option<String>,
    },
    #[serde(rename = "endNode", rename_all = "camelCase")]
    End {
        label: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
    /// Node tag this SDK version does not recognize. Kept so documents from
    /// newer editors still load; produces no BPMN element.
    #[serde(other)]
    Unknown,
}

impl NodeData {
    /// The tag of this payload.
    pub fn node_type(&self) -> NodeType {
        match self {
            NodeData::Start { .. } => NodeType::Start,
            NodeData::Application { .. } => NodeType::Application,
            NodeData::Approval { .. } => NodeType::Approval,
            NodeData::Condition { .. } => NodeType::Condition,
            NodeData::End { .. } => NodeType::End,
            NodeData::Unknown => NodeType::Unknown,
        }
    }

    /// Display label; empty for unknown nodes.
    pub fn label(&self) -> &str {
        match self {
            NodeData::Start { label, .. }
            | NodeData::Application { label, .. }
            | NodeData::Approval { label, .. }
            | NodeData::Condition { label, .. }
            | NodeData::End { label, .. } => label,
            NodeData::Unknown => "",
        }
    }

    /// Optional free-text description.
    pub fn description(&self) -> Option<&str> {
        match self {
            NodeData::Start { description, .. }
            | NodeData::Application { description, .. }
            | NodeData::Approval { description, .. }
            | NodeData::Condition { description, .. }
            | NodeData::End { description, .. } => description.as_deref(),
            NodeData::Unknown => None,
        }
    }

    /// Assignee ids carried by task nodes; empty for every other type.
    pub fn assignee_ids(&self) -> &[String] {
        match self {
            NodeData::Application { assignees, .. } | NodeData::Approval { assignees, .. } => {
                assignees
            }
            _ => &[],
        }
    }
}

/// A node placed on the workflow canvas.
///
/// Ids are unique across the node set for the lifetime of a graph and are
/// referenced by edges, so they must remain stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    pub data: NodeData,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>, data: NodeData) -> Self {
        WorkflowNode {
            id: id.into(),
            data,
        }
    }

    /// Start event node.
    pub fn start(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            id,
            NodeData::Start {
                label: label.into(),
                description: None,
            },
        )
    }

    /// End event node.
    pub fn end(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            id,
            NodeData::End {
                label: label.into(),
                description: None,
            },
        )
    }

    /// Application task node.
    pub fn application(
        id: impl Into<String>,
        label: impl Into<String>,
        assignees: Vec<String>,
    ) -> Self {
        Self::new(
            id,
            NodeData::Application {
                label: label.into(),
                description: None,
                assignees,
            },
        )
    }

    /// Approval task node.
    pub fn approval(
        id: impl Into<String>,
        label: impl Into<String>,
        assignees: Vec<String>,
        approval_rule: ApprovalRule,
    ) -> Self {
        Self::new(
            id,
            NodeData::Approval {
                label: label.into(),
                description: None,
                assignees,
                approval_rule,
            },
        )
    }

    /// Condition (branching) node.
    pub fn condition(
        id: impl Into<String>,
        label: impl Into<String>,
        condition: Option<String>,
    ) -> Self {
        Self::new(
            id,
            NodeData::Condition {
                label: label.into(),
                description: None,
                condition,
            },
        )
    }
}

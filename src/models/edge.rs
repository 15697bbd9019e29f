//! Workflow edge model for the SDK

use serde::{Deserialize, Serialize};

/// A directed connection between two workflow nodes.
///
/// `source` and `target` should reference existing node ids, but consumers
/// tolerate dangling references: the BPMN exporter still emits the sequence
/// flow, it just skips condition enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEdge {
    pub id: String,
    /// Id of the node this edge leaves
    pub source: String,
    /// Id of the node this edge enters
    pub target: String,
    /// Display label; doubles as the branch expression on edges leaving a
    /// condition node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl WorkflowEdge {
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        WorkflowEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    /// Builder-style label assignment.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

//! Workflow structure validation
//!
//! Inspects a workflow graph for the invariants a BPMN consumer expects.
//! Findings come back as data for the caller to render; validity is
//! advisory and never blocks an export.

use serde::{Deserialize, Serialize};

use crate::models::{NodeData, NodeType, WorkflowEdge, WorkflowNode};

/// Result of workflow structure validation.
///
/// `valid` reflects errors only; warnings never affect it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "validation results should be checked for errors and warnings"]
pub struct WorkflowValidationResult {
    /// Whether the graph has no structural errors
    pub valid: bool,
    /// Structural errors (graph-level findings)
    pub errors: Vec<String>,
    /// Advisory findings (per-node)
    pub warnings: Vec<String>,
}

/// Workflow structure validator
///
/// Every rule is evaluated independently; no rule short-circuits another,
/// and finding order is stable for a given input: graph-level errors first,
/// then connectivity warnings, condition warnings, and assignment warnings,
/// each in node-iteration order.
///
/// # Example
///
/// ```rust
/// use workflow_modelling_sdk::models::{WorkflowEdge, WorkflowNode};
/// use workflow_modelling_sdk::validation::WorkflowValidator;
///
/// let nodes = vec![WorkflowNode::start("s1", "Begin"), WorkflowNode::end("e1", "Done")];
/// let edges = vec![WorkflowEdge::new("ed1", "s1", "e1")];
///
/// let report = WorkflowValidator::new().validate(&nodes, &edges);
/// assert!(report.valid);
/// assert!(report.warnings.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct WorkflowValidator;

impl WorkflowValidator {
    /// Create a new workflow validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a workflow graph. Never fails; findings are data.
    pub fn validate(
        &self,
        nodes: &[WorkflowNode],
        edges: &[WorkflowEdge],
    ) -> WorkflowValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if !nodes
            .iter()
            .any(|node| node.data.node_type() == NodeType::Start)
        {
            errors.push("workflow must contain at least one start node".to_string());
        }
        if !nodes
            .iter()
            .any(|node| node.data.node_type() == NodeType::End)
        {
            errors.push("workflow must contain at least one end node".to_string());
        }

        // Connectivity: every node except start needs an incoming edge,
        // every node except end an outgoing one.
        for node in nodes {
            let node_type = node.data.node_type();
            let has_incoming = edges.iter().any(|edge| edge.target == node.id);
            let has_outgoing = edges.iter().any(|edge| edge.source == node.id);

            if node_type != NodeType::Start && !has_incoming {
                warnings.push(format!(
                    "node \"{}\" ({}) has no incoming edge",
                    node.data.label(),
                    node.id
                ));
            }
            if node_type != NodeType::End && !has_outgoing {
                warnings.push(format!(
                    "node \"{}\" ({}) has no outgoing edge",
                    node.data.label(),
                    node.id
                ));
            }
        }

        for node in nodes {
            if let NodeData::Condition { condition, .. } = &node.data {
                if condition.as_deref().unwrap_or("").is_empty() {
                    warnings.push(format!(
                        "condition node \"{}\" has no condition expression",
                        node.data.label()
                    ));
                }
            }
        }

        for node in nodes {
            let node_type = node.data.node_type();
            if matches!(node_type, NodeType::Application | NodeType::Approval)
                && node.data.assignee_ids().is_empty()
            {
                warnings.push(format!(
                    "task node \"{}\" has no assignee",
                    node.data.label()
                ));
            }
        }

        WorkflowValidationResult {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

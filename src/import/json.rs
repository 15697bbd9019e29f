//! Workflow JSON importer
//!
//! Parses workflow documents exported by the editor and checks the shape
//! invariants downstream consumers rely on. Id uniqueness violations are
//! fatal; dangling references are tolerated and reported as warnings, since
//! export and validation both degrade gracefully on them.

use std::collections::HashSet;

use super::{ImportError, ImportResult};
use crate::models::Workflow;

/// Workflow JSON Importer
#[derive(Debug, Default)]
pub struct WorkflowImporter;

impl WorkflowImporter {
    /// Create a new WorkflowImporter
    pub fn new() -> Self {
        Self
    }

    /// Import a workflow JSON document.
    ///
    /// # Arguments
    ///
    /// * `json_content` - The workflow document as a JSON string
    ///
    /// # Returns
    ///
    /// An `ImportResult` with the parsed workflow and any warnings, or an
    /// `ImportError` when the document cannot be parsed or violates an id
    /// invariant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use workflow_modelling_sdk::import::WorkflowImporter;
    /// use workflow_modelling_sdk::models::{Workflow, WorkflowNode};
    ///
    /// let mut workflow = Workflow::new("Expense Approval");
    /// workflow.nodes.push(WorkflowNode::start("s1", "Begin"));
    /// let json = workflow.to_json().unwrap();
    ///
    /// let imported = WorkflowImporter::new().import(&json).unwrap();
    /// assert_eq!(imported.workflow, workflow);
    /// ```
    pub fn import(&self, json_content: &str) -> Result<ImportResult, ImportError> {
        let workflow: Workflow = serde_json::from_str(json_content)
            .map_err(|e| ImportError::ParseError(e.to_string()))?;

        if workflow.id.is_empty() {
            return Err(ImportError::ValidationError(
                "workflow id must not be empty".to_string(),
            ));
        }
        if workflow.name.is_empty() {
            return Err(ImportError::ValidationError(
                "workflow name must not be empty".to_string(),
            ));
        }

        let mut node_ids: HashSet<&str> = HashSet::new();
        for node in &workflow.nodes {
            if node.id.is_empty() {
                return Err(ImportError::ValidationError(
                    "workflow node has an empty id".to_string(),
                ));
            }
            if !node_ids.insert(node.id.as_str()) {
                return Err(ImportError::ValidationError(format!(
                    "duplicate node id \"{}\"",
                    node.id
                )));
            }
        }
        let mut edge_ids: HashSet<&str> = HashSet::new();
        for edge in &workflow.edges {
            if edge.id.is_empty() {
                return Err(ImportError::ValidationError(
                    "workflow edge has an empty id".to_string(),
                ));
            }
            if !edge_ids.insert(edge.id.as_str()) {
                return Err(ImportError::ValidationError(format!(
                    "duplicate edge id \"{}\"",
                    edge.id
                )));
            }
        }

        let mut warnings = Vec::new();
        for edge in &workflow.edges {
            if !node_ids.contains(edge.source.as_str()) {
                warnings.push(format!(
                    "edge \"{}\" references missing source node \"{}\"",
                    edge.id, edge.source
                ));
            }
            if !node_ids.contains(edge.target.as_str()) {
                warnings.push(format!(
                    "edge \"{}\" references missing target node \"{}\"",
                    edge.id, edge.target
                ));
            }
        }

        let roster: HashSet<&str> = workflow
            .assignees
            .iter()
            .map(|assignee| assignee.id.as_str())
            .collect();
        for node in &workflow.nodes {
            for assignee_id in node.data.assignee_ids() {
                if !roster.contains(assignee_id.as_str()) {
                    warnings.push(format!(
                        "node \"{}\" references assignee \"{}\" missing from the roster",
                        node.id, assignee_id
                    ));
                }
            }
        }

        for warning in &warnings {
            tracing::warn!("workflow import warning: {warning}");
        }

        Ok(ImportResult { workflow, warnings })
    }
}

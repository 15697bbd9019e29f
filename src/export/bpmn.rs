//! BPMN 2.0 exporter
//!
//! Converts a workflow graph (nodes, edges, assignee roster) into a BPMN
//! 2.0 XML document: start/end events, user tasks, exclusive gateways,
//! sequence flows, and a lane set derived from task ownership, wrapped in
//! a single participant pool.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use super::xml::{bpmn_definitions, element, element_with_children, xml_declaration};
use super::{ExportError, ExportResult};
use crate::models::{Assignee, NodeData, NodeType, Workflow, WorkflowEdge, WorkflowNode};

const PROCESS_ID: &str = "Process_1";
const DEFAULT_WORKFLOW_NAME: &str = "Workflow Process";

/// Characters that survive file-name sanitization: ASCII alphanumerics,
/// hiragana, katakana, CJK ideographs, underscore, hyphen.
static FILE_NAME_UNSAFE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{4E00}-\x{9FFF}_-]")
        .expect("file-name pattern is a valid literal")
});

/// BPMN 2.0 Exporter
///
/// Pure transform: the same graph always renders to the same bytes. Missing
/// optional fields, dangling edge references, and unrecognized node types
/// degrade silently; only an empty required id is an error.
///
/// # Example
///
/// ```rust
/// use workflow_modelling_sdk::export::BpmnExporter;
/// use workflow_modelling_sdk::models::{ApprovalRule, Assignee, WorkflowEdge, WorkflowNode};
///
/// let nodes = vec![
///     WorkflowNode::start("s1", "Begin"),
///     WorkflowNode::approval("a1", "Review", vec!["u1".into()], ApprovalRule::All),
///     WorkflowNode::end("e1", "Done"),
/// ];
/// let edges = vec![
///     WorkflowEdge::new("ed1", "s1", "a1"),
///     WorkflowEdge::new("ed2", "a1", "e1"),
/// ];
/// let mut amy = Assignee::new("Amy");
/// amy.id = "u1".to_string();
///
/// let exporter = BpmnExporter::new();
/// let result = exporter.export_graph(&nodes, &edges, &[amy], "Review Flow").unwrap();
/// assert_eq!(result.format, "bpmn");
/// assert!(result.content.contains("<laneSet id=\"LaneSet_1\">"));
/// ```
#[derive(Debug, Default)]
pub struct BpmnExporter;

impl BpmnExporter {
    /// Create a new BpmnExporter
    pub fn new() -> Self {
        Self
    }

    /// Export a workflow document to BPMN 2.0 XML.
    pub fn export(&self, workflow: &Workflow) -> Result<ExportResult, ExportError> {
        self.export_graph(
            &workflow.nodes,
            &workflow.edges,
            &workflow.assignees,
            &workflow.name,
        )
    }

    /// Export a workflow graph to BPMN 2.0 XML.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Workflow nodes, in canvas order
    /// * `edges` - Workflow edges, in canvas order
    /// * `assignees` - The shared assignee roster; lane names resolve here
    /// * `workflow_name` - Process/participant name (empty falls back to
    ///   "Workflow Process")
    ///
    /// # Returns
    ///
    /// An `ExportResult` whose content is the complete XML document:
    /// declaration line, `definitions` root, one `process` (lane set first,
    /// then node elements in input order, then sequence flows in input
    /// order), and a `collaboration` with a single participant.
    pub fn export_graph(
        &self,
        nodes: &[WorkflowNode],
        edges: &[WorkflowEdge],
        assignees: &[Assignee],
        workflow_name: &str,
    ) -> Result<ExportResult, ExportError> {
        check_required_ids(nodes, edges)?;
        let name = if workflow_name.is_empty() {
            DEFAULT_WORKFLOW_NAME
        } else {
            workflow_name
        };
        tracing::debug!(
            nodes = nodes.len(),
            edges = edges.len(),
            workflow = name,
            "converting workflow graph to BPMN"
        );

        // Map nodes to flow elements, tracking which node ids each assignee
        // owns for lane building. Node order is preserved within each lane.
        let mut flow_elements: Vec<String> = Vec::new();
        let mut lane_refs: HashMap<&str, Vec<&str>> = HashMap::new();
        for node in nodes {
            if let Some(rendered) = node_element(node) {
                flow_elements.push(rendered);
                for assignee_id in node.data.assignee_ids() {
                    lane_refs
                        .entry(assignee_id.as_str())
                        .or_default()
                        .push(node.id.as_str());
                }
            }
        }
        for edge in edges {
            flow_elements.push(sequence_flow_element(edge, nodes));
        }

        // Consumers expect laneSet as the first child of process, ahead of
        // every flow element.
        let mut process_children: Vec<String> = Vec::new();
        if let Some(lane_set) = lane_set_element(assignees, &lane_refs) {
            process_children.push(lane_set);
        }
        process_children.extend(flow_elements);

        let process = element_with_children(
            "process",
            &[
                ("id", Some(PROCESS_ID)),
                ("name", Some(name)),
                ("isExecutable", Some("true")),
            ],
            &process_children,
            1,
        );

        let participant = element(
            "participant",
            &[
                ("id", Some("Participant_1")),
                ("name", Some(name)),
                ("processRef", Some(PROCESS_ID)),
            ],
            None,
            2,
        );
        let collaboration = element_with_children(
            "collaboration",
            &[("id", Some("Collaboration_1"))],
            &[participant],
            1,
        );

        let definitions = bpmn_definitions(&[process, collaboration]);
        Ok(ExportResult {
            content: format!("{}\n{}", xml_declaration(), definitions),
            format: "bpmn".to_string(),
        })
    }
}

/// Ids are the one required field; everything else degrades silently.
fn check_required_ids(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> Result<(), ExportError> {
    for (index, node) in nodes.iter().enumerate() {
        if node.id.is_empty() {
            return Err(ExportError::ValidationError(format!(
                "workflow node at index {index} has an empty id"
            )));
        }
    }
    for (index, edge) in edges.iter().enumerate() {
        if edge.id.is_empty() {
            return Err(ExportError::ValidationError(format!(
                "workflow edge at index {index} has an empty id"
            )));
        }
    }
    Ok(())
}

/// Map one node to its BPMN element; unknown types map to nothing.
fn node_element(node: &WorkflowNode) -> Option<String> {
    let depth = 2;
    let id = node.id.as_str();

    match &node.data {
        NodeData::Start { label, .. } => Some(element(
            "startEvent",
            &[("id", Some(id)), ("name", Some(label.as_str()))],
            None,
            depth,
        )),
        NodeData::End { label, .. } => Some(element(
            "endEvent",
            &[("id", Some(id)), ("name", Some(label.as_str()))],
            None,
            depth,
        )),
        NodeData::Application {
            label, description, ..
        } => {
            let children: Vec<String> = description
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(|text| element("documentation", &[], Some(text), depth + 1))
                .into_iter()
                .collect();
            Some(element_with_children(
                "userTask",
                &[
                    ("id", Some(id)),
                    ("name", Some(label.as_str())),
                    ("implementation", Some("application")),
                ],
                &children,
                depth,
            ))
        }
        NodeData::Approval {
            label, assignees, ..
        } => {
            let children: Vec<String> = assignees
                .iter()
                .map(|assignee_id| {
                    let resource_ref =
                        element("resourceRef", &[], Some(assignee_id.as_str()), depth + 2);
                    element_with_children("performer", &[], &[resource_ref], depth + 1)
                })
                .collect();
            Some(element_with_children(
                "userTask",
                &[
                    ("id", Some(id)),
                    ("name", Some(label.as_str())),
                    ("implementation", Some("approval")),
                ],
                &children,
                depth,
            ))
        }
        NodeData::Condition {
            label, condition, ..
        } => {
            let children: Vec<String> = condition
                .as_deref()
                .filter(|text| !text.is_empty())
                .map(|text| element("documentation", &[], Some(text), depth + 1))
                .into_iter()
                .collect();
            Some(element_with_children(
                "exclusiveGateway",
                &[("id", Some(id)), ("name", Some(label.as_str()))],
                &children,
                depth,
            ))
        }
        NodeData::Unknown => None,
    }
}

/// Map one edge to a `sequenceFlow`.
///
/// The edge label is duplicated into a formal `conditionExpression` when
/// the source node is a condition node: BPMN readers evaluate branching
/// from `conditionExpression`, not from `name`. A missing source node
/// skips the enrichment without failing the conversion.
fn sequence_flow_element(edge: &WorkflowEdge, nodes: &[WorkflowNode]) -> String {
    let source_node = nodes.iter().find(|node| node.id == edge.source);
    let from_condition =
        source_node.is_some_and(|node| node.data.node_type() == NodeType::Condition);
    let label = edge.label.as_deref();

    let attrs = [
        ("id", Some(edge.id.as_str())),
        ("name", label),
        ("sourceRef", Some(edge.source.as_str())),
        ("targetRef", Some(edge.target.as_str())),
    ];

    let expression = if from_condition {
        label.filter(|text| !text.is_empty())
    } else {
        None
    };
    match expression {
        Some(text) => {
            let condition = element(
                "conditionExpression",
                &[("xsi:type", Some("tFormalExpression"))],
                Some(text),
                3,
            );
            element_with_children("sequenceFlow", &attrs, &[condition], 2)
        }
        None => element("sequenceFlow", &attrs, None, 2),
    }
}

/// Build the lane set from the roster and the collected task ownership.
///
/// One lane per roster assignee with at least one task reference, in roster
/// order; roster entries nothing points at produce no lane. Returns `None`
/// when no lane remains.
fn lane_set_element(
    assignees: &[Assignee],
    lane_refs: &HashMap<&str, Vec<&str>>,
) -> Option<String> {
    let mut lanes: Vec<String> = Vec::new();
    for assignee in assignees {
        let Some(node_ids) = lane_refs.get(assignee.id.as_str()) else {
            continue;
        };
        let refs: Vec<String> = node_ids
            .iter()
            .map(|&node_id| element("flowNodeRef", &[], Some(node_id), 4))
            .collect();
        let lane_id = format!("Lane_{}", lanes.len() + 1);
        let lane_name = format!(
            "{} ({})",
            assignee.name,
            assignee.role.as_deref().unwrap_or("assignee")
        );
        lanes.push(element_with_children(
            "lane",
            &[("id", Some(lane_id.as_str())), ("name", Some(lane_name.as_str()))],
            &refs,
            3,
        ));
    }

    if lanes.is_empty() {
        None
    } else {
        Some(element_with_children(
            "laneSet",
            &[("id", Some("LaneSet_1"))],
            &lanes,
            2,
        ))
    }
}

/// Build a download file name for an exported workflow.
///
/// The name is sanitized to ASCII alphanumerics, Japanese script, `_` and
/// `-` (everything else becomes `_`), then suffixed with the UTC timestamp
/// at minute precision, colons replaced by hyphens.
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use workflow_modelling_sdk::export::bpmn_file_name;
///
/// let at = Utc.with_ymd_and_hms(2026, 8, 5, 9, 30, 12).unwrap();
/// assert_eq!(bpmn_file_name("My Flow!", at), "My_Flow__2026-08-05T09-30.bpmn");
/// ```
pub fn bpmn_file_name(workflow_name: &str, at: DateTime<Utc>) -> String {
    let name = if workflow_name.is_empty() {
        "workflow"
    } else {
        workflow_name
    };
    let sanitized = FILE_NAME_UNSAFE.replace_all(name, "_");
    format!("{}_{}.bpmn", sanitized, at.format("%Y-%m-%dT%H-%M"))
}

/// [`bpmn_file_name`] stamped with the current time.
pub fn bpmn_file_name_now(workflow_name: &str) -> String {
    bpmn_file_name(workflow_name, Utc::now())
}

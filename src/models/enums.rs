//! Enums for the workflow model
//!
//! # Serde Casing Conventions
//!
//! Serialized values match the editor's JSON documents so saved workflows
//! load without migration:
//!
//! - Node type tags use the editor's camelCase element names (`startNode`,
//!   `approvalNode`, ...)
//! - `ApprovalRule` uses `lowercase` (`all`, `any`, `majority`)

use serde::{Deserialize, Serialize};

/// Node types supported on the workflow canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeType {
    #[serde(rename = "startNode")]
    Start,
    #[serde(rename = "applicationNode")]
    Application,
    #[serde(rename = "approvalNode")]
    Approval,
    #[serde(rename = "conditionNode")]
    Condition,
    #[serde(rename = "endNode")]
    End,
    /// Tag not recognized by this version of the SDK. Unknown nodes stay in
    /// the model but contribute no BPMN element.
    #[serde(other)]
    Unknown,
}

/// Approval rule for task nodes with multiple assignees.
///
/// Not mapped to any BPMN construct; preserved through JSON round-trips so
/// re-imported workflows keep their rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalRule {
    /// All assignees must approve
    #[default]
    All,
    /// Any one assignee can approve
    Any,
    /// Majority of assignees must approve
    Majority,
}

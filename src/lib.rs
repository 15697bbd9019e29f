//! Workflow Modelling SDK - shared library for approval-workflow operations
//!
//! Provides unified interfaces for:
//! - Workflow model types (nodes, edges, the shared assignee roster)
//! - BPMN 2.0 export
//! - Workflow JSON import/export
//! - Structural validation logic
//!
//! Everything here is a pure, synchronous transform over in-memory graph
//! data: callers validate for UI display, export for download/preview, and
//! keep persistence concerns outside the SDK.

pub mod export;
pub mod import;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use export::{BpmnExporter, ExportError, ExportResult, bpmn_file_name, bpmn_file_name_now};
pub use import::{ImportError, ImportResult, WorkflowImporter};
pub use validation::{WorkflowValidationResult, WorkflowValidator, validate_xml_structure};

// Re-export models
pub use models::{
    ApprovalRule, Assignee, NodeData, NodeType, Workflow, WorkflowEdge, WorkflowMetadata,
    WorkflowNode,
};

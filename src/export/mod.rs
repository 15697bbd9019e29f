//! Export functionality
//!
//! Provides exporters for the formats the editor can hand to download,
//! preview, and clipboard collaborators:
//! - BPMN 2.0 XML (from the workflow graph)
//! - Workflow JSON (via [`crate::models::Workflow::to_json`])

pub mod bpmn;
pub mod xml;

/// Result of an export operation.
///
/// Contains the exported content and format identifier.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[must_use = "export results contain the exported content and should be used"]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Re-export for convenience
pub use bpmn::{BpmnExporter, bpmn_file_name, bpmn_file_name_now};

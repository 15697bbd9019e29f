//! Import functionality
//!
//! Provides parsers for workflow documents produced by the editor:
//! - Workflow JSON (the editor's save/export format)

pub mod json;

use crate::models::Workflow;

/// Result of an import operation.
///
/// Contains the parsed workflow and any non-fatal findings from the import
/// process.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[must_use = "import results should be processed or warnings checked"]
pub struct ImportResult {
    /// Workflow parsed from the document
    pub workflow: Workflow,
    /// Non-fatal findings (dangling references)
    pub warnings: Vec<String>,
}

/// Error during import
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

// Re-export for convenience
pub use json::WorkflowImporter;

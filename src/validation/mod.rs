//! Validation functionality
//!
//! Provides validation logic for:
//! - Workflow structure (start/end presence, connectivity, condition
//!   expressions, task assignment)
//! - XML well-formedness of exported documents

pub mod structure;
pub mod xml;

pub use structure::{WorkflowValidationResult, WorkflowValidator};
pub use xml::validate_xml_structure;

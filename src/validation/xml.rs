//! XML validation utilities
//!
//! Checks that a produced XML document is well-formed before it is handed
//! to download/preview collaborators.

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Validate that an XML document is well-formed.
///
/// Requires a leading XML declaration, then drives a full event-loop parse
/// so unbalanced or mismatched tags surface as errors.
///
/// # Arguments
///
/// * `xml_content` - The XML content to validate
///
/// # Example
///
/// ```rust
/// use workflow_modelling_sdk::validation::validate_xml_structure;
///
/// let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<definitions><process /></definitions>";
/// assert!(validate_xml_structure(xml).is_ok());
/// assert!(validate_xml_structure("<unclosed>").is_err());
/// ```
pub fn validate_xml_structure(xml_content: &str) -> Result<()> {
    if !xml_content.trim_start().starts_with("<?xml") {
        bail!("invalid XML: missing XML declaration");
    }

    let mut reader = Reader::from_str(xml_content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(_) => continue,
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("XML parsing error at byte {}", reader.buffer_position())
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_document() {
        let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a><b>text</b><c /></a>";
        assert!(validate_xml_structure(xml).is_ok());
    }

    #[test]
    fn rejects_missing_declaration() {
        assert!(validate_xml_structure("<a />").is_err());
    }

    #[test]
    fn rejects_mismatched_tags() {
        let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a><b></a></b>";
        assert!(validate_xml_structure(xml).is_err());
    }
}

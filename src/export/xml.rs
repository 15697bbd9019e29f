//! XML document builder
//!
//! String-level helpers for rendering escaped, indented XML elements. No
//! BPMN knowledge lives here; the BPMN exporter composes these into a full
//! document. Output is a byte-deterministic function of the inputs, which
//! snapshot tests and diffing tools rely on.

/// Indentation unit, two spaces per depth level.
const INDENT: &str = "  ";

/// Escape the five XML special characters.
///
/// Single-pass, so an ampersand introduced by an earlier replacement is
/// never escaped again. Applied to every attribute value and text-content
/// insertion exactly once.
///
/// # Example
///
/// ```rust
/// use workflow_modelling_sdk::export::xml::escape_xml;
///
/// assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
/// ```
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render an attribute list as `name="escaped-value"` pairs.
///
/// Entries with a `None` value are omitted; the slice order is preserved so
/// output stays deterministic.
pub fn build_attributes(attrs: &[(&str, Option<&str>)]) -> String {
    attrs
        .iter()
        .filter_map(|(name, value)| value.map(|v| format!("{}=\"{}\"", name, escape_xml(v))))
        .collect::<Vec<_>>()
        .join(" ")
}

fn open_fragment(tag: &str, attrs: &[(&str, Option<&str>)], depth: usize) -> String {
    let attributes = build_attributes(attrs);
    if attributes.is_empty() {
        format!("{}<{}", INDENT.repeat(depth), tag)
    } else {
        format!("{}<{} {}", INDENT.repeat(depth), tag, attributes)
    }
}

/// Render an element with optional text content.
///
/// Non-empty text renders inline (`<tag>text</tag>`) with the text escaped;
/// empty or absent text renders self-closing. Indentation is applied only
/// at the start of the line, so multi-line text content is left untouched.
pub fn element(tag: &str, attrs: &[(&str, Option<&str>)], text: Option<&str>, depth: usize) -> String {
    match text {
        Some(text) if !text.is_empty() => {
            format!("{}>{}</{}>", open_fragment(tag, attrs, depth), escape_xml(text), tag)
        }
        _ => format!("{} />", open_fragment(tag, attrs, depth)),
    }
}

/// Render an element wrapping pre-rendered child elements.
///
/// Children are expected to be indented to `depth + 1` already; they are
/// joined by newlines between an opening and closing tag at `depth`. An
/// empty child list renders self-closing.
pub fn element_with_children(
    tag: &str,
    attrs: &[(&str, Option<&str>)],
    children: &[String],
    depth: usize,
) -> String {
    if children.is_empty() {
        return format!("{} />", open_fragment(tag, attrs, depth));
    }
    format!(
        "{}>\n{}\n{}</{}>",
        open_fragment(tag, attrs, depth),
        children.join("\n"),
        INDENT.repeat(depth),
        tag
    )
}

/// The fixed XML declaration line.
pub fn xml_declaration() -> &'static str {
    r#"<?xml version="1.0" encoding="UTF-8"?>"#
}

/// Render the BPMN 2.0 `definitions` root with the standard namespace set.
pub fn bpmn_definitions(children: &[String]) -> String {
    element_with_children(
        "definitions",
        &[
            ("xmlns", Some("http://www.omg.org/spec/BPMN/20100524/MODEL")),
            ("xmlns:bpmndi", Some("http://www.omg.org/spec/BPMN/20100524/DI")),
            ("xmlns:omgdc", Some("http://www.omg.org/spec/DD/20100524/DC")),
            ("xmlns:omgdi", Some("http://www.omg.org/spec/DD/20100524/DI")),
            ("xmlns:xsi", Some("http://www.w3.org/2001/XMLSchema-instance")),
            ("id", Some("Definitions_1")),
            ("targetNamespace", Some("http://bpmn.io/schema/bpmn")),
            ("exporter", Some("Workflow Visual Editor")),
            ("exporterVersion", Some("1.0")),
        ],
        children,
        0,
    )
}

/// Re-indent an XML string, two spaces per nesting level.
///
/// Used by preview collaborators on documents whose original indentation
/// was lost (clipboard, hand edits). Lines that open and close an element
/// inline do not change the depth.
pub fn format_xml(xml: &str) -> String {
    let mut formatted = String::new();
    let mut depth: usize = 0;

    for line in xml.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with("</") {
            depth = depth.saturating_sub(1);
        }
        formatted.push_str(&INDENT.repeat(depth));
        formatted.push_str(trimmed);
        formatted.push('\n');

        let opens = trimmed.starts_with('<')
            && !trimmed.starts_with("</")
            && !trimmed.starts_with("<?")
            && !trimmed.ends_with("/>");
        if opens && !trimmed.contains("</") {
            depth += 1;
        }
    }

    formatted.trim_end().to_string()
}

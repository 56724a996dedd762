//! Inline rendering of a single mixed-content paragraph.

use crate::render::visited::VisitedSet;
use crate::render::{ExtractionPolicy, Fragments, extract_description};
use crate::xml::{Document, NodeId};

/// Render one paragraph's mixed content to a single Markdown line.
///
/// Fragments are trimmed and joined with single spaces, preserving reading
/// order: leading text, then each recognized child followed by its tail
/// text. Unrecognized inline kinds contribute nothing themselves, but their
/// tails still flow through.
pub fn render_inline(doc: &Document, para: NodeId, visited: &mut VisitedSet) -> String {
    let mut parts = Fragments::new();
    parts.push_trimmed(&doc.node(para).text);

    for child in doc.children(para) {
        match doc.tag(child) {
            "ref" => {
                let text = doc.inner_text(child);
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(format!("`{text}`"));
                }
            }
            "computeroutput" => {
                let code = doc.inner_text(child);
                let code = code.trim();
                if !code.is_empty() {
                    parts.push(format!("`{code}`"));
                }
            }
            "bold" => {
                let text = doc.inner_text(child);
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(format!("**{text}**"));
                }
            }
            "emphasis" => {
                let text = doc.inner_text(child);
                let text = text.trim();
                if !text.is_empty() {
                    parts.push(format!("*{text}*"));
                }
            }
            "simplesect" => {
                if let Some(label) = admonition_label(doc.attr(child, "kind")) {
                    // The admonition's own paragraphs are consumed here and
                    // tracked so a wider descendant pass won't re-emit them.
                    let body = extract_description(
                        doc,
                        Some(child),
                        ExtractionPolicy::DirectChildrenOnly,
                        visited,
                    );
                    if !body.is_empty() {
                        parts.push(format!("**{label}:** {body}"));
                    }
                }
            }
            _ => {}
        }
        parts.push_trimmed(&doc.node(child).tail);
    }

    parts.join_inline()
}

/// Callout label for an admonition kind. Only note, warning and see-also
/// sections render; the rest (return, since, ...) are handled elsewhere or
/// dropped.
fn admonition_label(kind: Option<&str>) -> Option<&'static str> {
    match kind {
        Some("note") => Some("Note"),
        Some("warning") => Some("Warning"),
        Some("see") => Some("See"),
        _ => None,
    }
}

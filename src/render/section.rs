//! Recursive rendering of titled section trees.

use crate::render::Fragments;
use crate::render::block::render_para;
use crate::render::visited::VisitedSet;
use crate::xml::{Document, NodeId};

/// Heading depth of a unit's first sub-section, one level below the page
/// title.
pub const TOP_SECTION_DEPTH: usize = 2;

/// Is this a Doxygen nested-section tag (`sect1`, `sect2`, ...)?
pub fn is_section_tag(tag: &str) -> bool {
    tag.strip_prefix("sect")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

/// Render a section node: title as a heading at `depth`, direct paragraphs
/// through the block renderer, nested sections at `depth + 1`.
///
/// A section with no renderable content produces nothing at all, including
/// its heading. Depth grows without an explicit cap; recursion ends when a
/// section has no nested children.
pub fn render_section(
    doc: &Document,
    sect: NodeId,
    depth: usize,
    visited: &mut VisitedSet,
) -> String {
    let mut body = Fragments::new();
    for child in doc.children(sect) {
        let tag = doc.tag(child);
        if tag == "para" {
            if !visited.was_visited(child) {
                visited.mark_visited(child);
                body.push(render_para(doc, child, visited));
            }
        } else if is_section_tag(tag) {
            body.push(render_section(doc, child, depth + 1, visited));
        }
    }

    if body.is_empty() {
        return String::new();
    }

    let mut parts = Fragments::new();
    if let Some(title) = doc.child(sect, "title") {
        let title = doc.inner_text(title);
        let title = title.trim();
        if !title.is_empty() {
            parts.push(format!("{} {title}", "#".repeat(depth)));
        }
    }
    parts.push(body.join_blocks());
    parts.join_blocks()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_str;

    fn render(xml: &str) -> String {
        let doc = parse_str(xml).unwrap();
        let mut visited = VisitedSet::new();
        render_section(&doc, doc.root(), TOP_SECTION_DEPTH, &mut visited)
    }

    #[test]
    fn test_section_tag_detection() {
        assert!(is_section_tag("sect1"));
        assert!(is_section_tag("sect4"));
        assert!(!is_section_tag("sect"));
        assert!(!is_section_tag("sectiondef"));
        assert!(!is_section_tag("simplesect"));
    }

    #[test]
    fn test_title_and_paragraphs() {
        let out = render("<sect1><title>Usage</title><para>Call init first.</para></sect1>");
        assert_eq!(out, "## Usage\n\nCall init first.");
    }

    #[test]
    fn test_nested_section_depth() {
        let out = render(
            "<sect1><title>A</title><para>top</para>\
             <sect2><title>B</title><para>inner</para></sect2></sect1>",
        );
        assert_eq!(out, "## A\n\ntop\n\n### B\n\ninner");
    }

    #[test]
    fn test_empty_section_emits_no_heading() {
        assert_eq!(render("<sect1><title>Empty</title></sect1>"), "");
    }

    #[test]
    fn test_heading_emitted_when_only_subsection_has_content() {
        let out = render(
            "<sect1><title>A</title><sect2><title>B</title><para>text</para></sect2></sect1>",
        );
        assert_eq!(out, "## A\n\n### B\n\ntext");
    }

    #[test]
    fn test_untitled_section_still_renders_content() {
        assert_eq!(render("<sect1><para>body only</para></sect1>"), "body only");
    }
}

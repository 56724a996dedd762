//! Description extraction: Doxygen description subtrees → Markdown.
//!
//! This is the rendering core. Given a `briefdescription` or
//! `detaileddescription` container it walks the mixed-content subtree
//! (paragraphs holding lists, tables, code listings, diagrams, inline
//! markup, recursively nested sections) and produces one flattened,
//! de-duplicated, order-preserving Markdown string.
//!
//! Duplicate suppression matters because the same paragraph can be reached
//! through more than one query path: a [`VisitedSet`] keyed on arena node
//! ids is owned by each top-level field extraction and threaded through the
//! whole descent. Fragment order always follows document order; nothing is
//! ever sorted.

mod block;
mod inline;
mod mermaid;
mod section;
mod visited;

pub use block::render_para;
pub use inline::render_inline;
pub use mermaid::{END_MARKER, START_MARKER, looks_like_diagram, normalize as normalize_diagram};
pub use section::{TOP_SECTION_DEPTH, is_section_tag, render_section};
pub use visited::VisitedSet;

use crate::xml::{Document, NodeId};

/// Which paragraph nodes under a container are eligible, and how they are
/// grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionPolicy {
    /// Immediate `para` children only. Short-form fields: briefs, parameter,
    /// return and enumerator descriptions.
    DirectChildrenOnly,
    /// Every `para` anywhere under the container, document order. Top-level
    /// page and member detailed descriptions, where legacy flat structure
    /// must be captured without section semantics.
    AllDescendants,
    /// Direct `para` children first, then each direct `sect1` child through
    /// the section renderer. Group detailed descriptions, where headings are
    /// meaningful structure.
    SectionsAware,
}

/// Extract one description container to a Markdown string.
///
/// `container` is the `briefdescription`/`detaileddescription` node (or
/// whatever wraps the paragraphs for the field at hand); an absent container
/// yields an empty string, never an error. The caller owns `visited` and
/// must reset it before each independent field extraction.
pub fn extract_description(
    doc: &Document,
    container: Option<NodeId>,
    policy: ExtractionPolicy,
    visited: &mut VisitedSet,
) -> String {
    let Some(container) = container else {
        return String::new();
    };

    let mut out = Fragments::new();
    match policy {
        ExtractionPolicy::DirectChildrenOnly => {
            for child in doc.children_tagged(container, "para") {
                if !visited.was_visited(child) {
                    visited.mark_visited(child);
                    out.push(render_para(doc, child, visited));
                }
            }
        }
        ExtractionPolicy::AllDescendants => {
            for node in doc.descendants(container) {
                if doc.tag(node) == "para" && !visited.was_visited(node) {
                    visited.mark_visited(node);
                    out.push(render_para(doc, node, visited));
                }
            }
        }
        ExtractionPolicy::SectionsAware => {
            for child in doc.children_tagged(container, "para") {
                if !visited.was_visited(child) {
                    visited.mark_visited(child);
                    out.push(render_para(doc, child, visited));
                }
            }
            for child in doc.children(container) {
                if is_section_tag(doc.tag(child)) {
                    out.push(render_section(doc, child, TOP_SECTION_DEPTH, visited));
                }
            }
        }
    }

    out.join_blocks()
}

/// Ordered accumulator for rendered fragments with the two join modes the
/// renderers need: blank-line-separated blocks and space-separated inline
/// runs. Empty fragments are dropped at the door so join separators never
/// stack up.
#[derive(Debug, Default)]
pub struct Fragments(Vec<String>);

impl Fragments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment; empty strings are discarded.
    pub fn push(&mut self, fragment: String) {
        if !fragment.is_empty() {
            self.0.push(fragment);
        }
    }

    /// Append a fragment after trimming surrounding whitespace.
    pub fn push_trimmed(&mut self, fragment: &str) {
        let trimmed = fragment.trim();
        if !trimmed.is_empty() {
            self.0.push(trimmed.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Join as block-level units separated by blank lines.
    pub fn join_blocks(self) -> String {
        self.0.join("\n\n")
    }

    /// Join as inline fragments within one paragraph line.
    pub fn join_inline(self) -> String {
        self.0.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_str;

    fn extract(xml: &str, policy: ExtractionPolicy) -> String {
        let doc = parse_str(xml).unwrap();
        let mut visited = VisitedSet::new();
        extract_description(&doc, Some(doc.root()), policy, &mut visited)
    }

    #[test]
    fn test_absent_container_is_empty() {
        let doc = parse_str("<root/>").unwrap();
        let mut visited = VisitedSet::new();
        for policy in [
            ExtractionPolicy::DirectChildrenOnly,
            ExtractionPolicy::AllDescendants,
            ExtractionPolicy::SectionsAware,
        ] {
            assert_eq!(extract_description(&doc, None, policy, &mut visited), "");
        }
    }

    #[test]
    fn test_direct_children_skips_nested() {
        let xml = "<briefdescription><para>top</para>\
                   <sect1><para>nested</para></sect1></briefdescription>";
        assert_eq!(extract(xml, ExtractionPolicy::DirectChildrenOnly), "top");
    }

    #[test]
    fn test_all_descendants_reaches_nested() {
        let xml = "<detaileddescription><para>top</para>\
                   <sect1><para>nested</para></sect1></detaileddescription>";
        assert_eq!(
            extract(xml, ExtractionPolicy::AllDescendants),
            "top\n\nnested"
        );
    }

    #[test]
    fn test_all_descendants_no_duplicates_from_lists() {
        // The outer para renders the list; the descendant pass must not
        // re-emit the item paragraphs it already consumed.
        let xml = "<detaileddescription><para><itemizedlist>\
                   <listitem><para>alpha</para></listitem>\
                   <listitem><para>beta</para></listitem>\
                   </itemizedlist></para></detaileddescription>";
        assert_eq!(
            extract(xml, ExtractionPolicy::AllDescendants),
            "- alpha\n- beta"
        );
    }

    #[test]
    fn test_sections_aware_renders_headings() {
        let xml = "<detaileddescription><para>intro</para>\
                   <sect1><title>Details</title><para>body</para></sect1>\
                   </detaileddescription>";
        assert_eq!(
            extract(xml, ExtractionPolicy::SectionsAware),
            "intro\n\n## Details\n\nbody"
        );
    }

    #[test]
    fn test_idempotent_with_fresh_trackers() {
        let doc = parse_str(
            "<detaileddescription><para>one</para><para>two</para></detaileddescription>",
        )
        .unwrap();
        let mut first = VisitedSet::new();
        let mut second = VisitedSet::new();
        let a = extract_description(
            &doc,
            Some(doc.root()),
            ExtractionPolicy::AllDescendants,
            &mut first,
        );
        let b = extract_description(
            &doc,
            Some(doc.root()),
            ExtractionPolicy::AllDescendants,
            &mut second,
        );
        assert_eq!(a, b);
        assert_eq!(a, "one\n\ntwo");
    }

    #[test]
    fn test_stale_tracker_suppresses_everything() {
        // The observed failure mode a per-field reset prevents.
        let doc =
            parse_str("<detaileddescription><para>text</para></detaileddescription>").unwrap();
        let mut visited = VisitedSet::new();
        let first = extract_description(
            &doc,
            Some(doc.root()),
            ExtractionPolicy::AllDescendants,
            &mut visited,
        );
        let second = extract_description(
            &doc,
            Some(doc.root()),
            ExtractionPolicy::AllDescendants,
            &mut visited,
        );
        assert_eq!(first, "text");
        assert_eq!(second, "");
        visited.reset();
        let third = extract_description(
            &doc,
            Some(doc.root()),
            ExtractionPolicy::AllDescendants,
            &mut visited,
        );
        assert_eq!(third, "text");
    }

    #[test]
    fn test_fragments_join_modes() {
        let mut f = Fragments::new();
        f.push("a".to_string());
        f.push(String::new());
        f.push("b".to_string());
        assert_eq!(f.join_blocks(), "a\n\nb");

        let mut f = Fragments::new();
        f.push_trimmed("  x  ");
        f.push_trimmed("   ");
        f.push_trimmed("y");
        assert_eq!(f.join_inline(), "x y");
    }
}

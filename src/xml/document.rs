//! Arena document model for parsed Doxygen XML.
//!
//! Nodes are allocated into a flat vector at parse time and addressed by
//! [`NodeId`] index. Two structurally identical elements at different tree
//! positions get distinct ids, which is what the extraction engine's
//! duplicate tracking keys on. The tree is never mutated after parsing.

/// Unique identifier for a node within a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A single element in the parsed tree.
///
/// Mixed content is modeled the same way Doxygen produces it: `text` holds
/// the character data before the first child element, and each element's
/// `tail` holds the character data between its end tag and the next sibling.
#[derive(Debug, Clone, Default)]
pub struct XmlNode {
    /// Element tag name (namespace prefix stripped).
    pub tag: String,
    /// Attributes in document order.
    pub attrs: Vec<(String, String)>,
    /// Character data before the first child element.
    pub text: String,
    /// Character data between this element's end tag and the next sibling.
    pub tail: String,
    /// Child elements in document order.
    pub children: Vec<NodeId>,
}

/// A parsed XML document backed by a node arena.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<XmlNode>,
    root: NodeId,
}

impl Document {
    pub(crate) fn new(nodes: Vec<XmlNode>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    /// The document's root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Access a node by id.
    pub fn node(&self, id: NodeId) -> &XmlNode {
        &self.nodes[id.0 as usize]
    }

    /// Tag name of a node.
    pub fn tag(&self, id: NodeId) -> &str {
        &self.node(id).tag
    }

    /// Attribute value by name.
    pub fn attr<'a>(&'a self, id: NodeId, name: &str) -> Option<&'a str> {
        self.node(id)
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id).children.iter().copied()
    }

    /// First direct child with the given tag.
    pub fn child(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.children(id).find(|&c| self.tag(c) == tag)
    }

    /// Direct children with the given tag, in document order.
    pub fn children_tagged<'a>(
        &'a self,
        id: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id).filter(move |&c| self.tag(c) == tag)
    }

    /// All descendants of a node (excluding the node itself) in document
    /// order (depth-first, pre-order).
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.node(id).children.clone();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// All descendants with the given tag, in document order.
    pub fn descendants_tagged(&self, id: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(id)
            .filter(|&n| self.tag(n) == tag)
            .collect()
    }

    /// First descendant with the given tag, in document order.
    pub fn find_descendant(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        self.descendants(id).find(|&n| self.tag(n) == tag)
    }

    /// Trimmed `text` of the first direct child with the given tag.
    ///
    /// Mirrors the common Doxygen pattern of `<name>foo</name>` lookups.
    pub fn child_text<'a>(&'a self, id: NodeId, tag: &str) -> Option<&'a str> {
        self.child(id, tag).map(|c| self.node(c).text.trim())
    }

    /// Concatenated text of a node and all its descendants, including tail
    /// text between children. No trimming or whitespace normalization.
    pub fn inner_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let node = self.node(id);
        out.push_str(&node.text);
        for &child in &node.children {
            self.collect_text(child, out);
            out.push_str(&self.node(child).tail);
        }
    }
}

/// Document-order (depth-first, pre-order) descendant iterator.
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        let children = &self.doc.node(id).children;
        self.stack.extend(children.iter().rev().copied());
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::xml::parse_str;

    #[test]
    fn test_descendants_document_order() {
        let doc = parse_str("<a><b><c/><d/></b><e/></a>").unwrap();
        let tags: Vec<&str> = doc
            .descendants(doc.root())
            .map(|id| doc.tag(id))
            .collect();
        assert_eq!(tags, vec!["b", "c", "d", "e"]);
    }

    #[test]
    fn test_inner_text_includes_tails() {
        let doc = parse_str("<p>one <b>two</b> three <i>four</i> five</p>").unwrap();
        assert_eq!(doc.inner_text(doc.root()), "one two three four five");
    }

    #[test]
    fn test_child_lookup() {
        let doc = parse_str("<m><name>foo</name><name>bar</name></m>").unwrap();
        assert_eq!(doc.child_text(doc.root(), "name"), Some("foo"));
        assert_eq!(doc.child_text(doc.root(), "missing"), None);
        let named: Vec<_> = doc.children_tagged(doc.root(), "name").collect();
        assert_eq!(named.len(), 2);
    }
}

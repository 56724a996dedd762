//! XML parsing into the arena document model.
//!
//! Built on quick-xml's event loop. Text is never globally trimmed: tail
//! whitespace between inline elements is significant for mixed-content
//! paragraphs, and the renderers apply their own trimming policies.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::Event;

use crate::error::Result;
use crate::xml::document::{Document, NodeId, XmlNode};

/// Parse an XML document from a file.
pub fn parse_file(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parse an XML document from a string.
pub fn parse_str(xml: &str) -> Result<Document> {
    let xml = xml.trim_start_matches('\u{feff}');
    let mut reader = Reader::from_str(xml);

    let mut nodes: Vec<XmlNode> = Vec::new();
    let mut stack: Vec<NodeId> = Vec::new();
    let mut root: Option<NodeId> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let id = alloc_node(&mut nodes, &stack, &mut root, &e)?;
                stack.push(id);
            }
            Event::Empty(e) => {
                alloc_node(&mut nodes, &stack, &mut root, &e)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(e) => {
                let raw = String::from_utf8_lossy(e.as_ref()).into_owned();
                let text = unescape(&raw).map(|s| s.into_owned()).unwrap_or(raw);
                append_text(&mut nodes, &stack, &text);
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                append_text(&mut nodes, &stack, &text);
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                if let Some(resolved) = resolve_entity(&entity) {
                    append_text(&mut nodes, &stack, &resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let root = root.ok_or_else(|| {
        crate::error::Error::InvalidDoc("document has no root element".to_string())
    })?;
    Ok(Document::new(nodes, root))
}

fn alloc_node(
    nodes: &mut Vec<XmlNode>,
    stack: &[NodeId],
    root: &mut Option<NodeId>,
    e: &quick_xml::events::BytesStart<'_>,
) -> Result<NodeId> {
    let name = e.name();
    let tag = String::from_utf8_lossy(local_name(name.as_ref())).into_owned();

    let mut attrs = Vec::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).into_owned();
        let raw = String::from_utf8_lossy(&attr.value).into_owned();
        let value = unescape(&raw).map(|s| s.into_owned()).unwrap_or(raw);
        attrs.push((key, value));
    }

    let id = NodeId(nodes.len() as u32);
    nodes.push(XmlNode {
        tag,
        attrs,
        ..XmlNode::default()
    });

    match stack.last().copied() {
        Some(p) => nodes[p.0 as usize].children.push(id),
        None => {
            if root.is_none() {
                *root = Some(id);
            }
        }
    }

    Ok(id)
}

/// Append character data to the current position: the open element's `text`
/// if it has no children yet, otherwise the last child's `tail`.
fn append_text(nodes: &mut [XmlNode], stack: &[NodeId], text: &str) {
    let Some(&current) = stack.last() else {
        return;
    };
    match nodes[current.0 as usize].children.last().copied() {
        Some(last_child) => nodes[last_child.0 as usize].tail.push_str(text),
        None => nodes[current.0 as usize].text.push_str(text),
    }
}

/// Strip a namespace prefix from an element or attribute name.
fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().rposition(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// Resolve a general entity reference (named or numeric character form).
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        if let Ok(code) = u32::from_str_radix(hex, 16)
            && let Some(c) = char::from_u32(code)
        {
            return Some(c.to_string());
        }
    } else if let Some(dec) = entity.strip_prefix('#')
        && let Ok(code) = dec.parse::<u32>()
        && let Some(c) = char::from_u32(code)
    {
        return Some(c.to_string());
    }

    None
}

//! Block-level classification and rendering of paragraph nodes.
//!
//! A Doxygen `para` either carries one special block (verbatim/diagram,
//! table, code listing, bullet list) or is ordinary inline prose. The first
//! matching block wins and is rendered by a dedicated routine; everything
//! else falls through to the inline renderer.

use crate::render::inline::render_inline;
use crate::render::mermaid;
use crate::render::visited::VisitedSet;
use crate::xml::{Document, NodeId};

/// Classified block kind of a paragraph, in match priority order.
enum BlockKind {
    Verbatim(NodeId),
    /// Diagram delimited in prose by explicit markers, no verbatim wrapper.
    /// Carries the paragraph's flattened text.
    InlineDiagram(String),
    Table(NodeId),
    Listing(NodeId),
    BulletList(NodeId),
    Prose,
}

fn classify(doc: &Document, para: NodeId) -> BlockKind {
    if let Some(verbatim) = doc.child(para, "verbatim") {
        return BlockKind::Verbatim(verbatim);
    }
    let flat = doc.inner_text(para);
    if has_diagram_markers(&flat) {
        return BlockKind::InlineDiagram(flat);
    }
    if let Some(table) = doc.child(para, "table") {
        return BlockKind::Table(table);
    }
    if let Some(listing) = doc.child(para, "programlisting") {
        return BlockKind::Listing(listing);
    }
    if let Some(list) = doc.child(para, "itemizedlist") {
        return BlockKind::BulletList(list);
    }
    BlockKind::Prose
}

/// Render one paragraph node to a Markdown block.
pub fn render_para(doc: &Document, para: NodeId, visited: &mut VisitedSet) -> String {
    match classify(doc, para) {
        BlockKind::Verbatim(verbatim) => render_verbatim(doc, verbatim),
        BlockKind::InlineDiagram(flat) => render_inline_diagram(&flat),
        BlockKind::Table(table) => render_table(doc, table, visited),
        BlockKind::Listing(listing) => render_listing(doc, listing),
        BlockKind::BulletList(list) => render_list(doc, list, visited),
        BlockKind::Prose => render_inline(doc, para, visited),
    }
}

fn has_diagram_markers(text: &str) -> bool {
    match text.split_once(mermaid::START_MARKER) {
        Some((_, rest)) => rest.contains(mermaid::END_MARKER),
        None => false,
    }
}

/// Verbatim block: mermaid-tagged fence if the content reads as diagram
/// notation, plain untagged fence otherwise.
fn render_verbatim(doc: &Document, verbatim: NodeId) -> String {
    let content = doc.inner_text(verbatim);
    let content = content.trim_matches('\n');
    if mermaid::looks_like_diagram(content) {
        format!("```mermaid\n{}\n```", mermaid::normalize(content))
    } else {
        format!("```\n{content}\n```")
    }
}

/// Diagram delimited inline in prose; surrounding text renders as ordinary
/// paragraphs around the fence. The caller has already checked that both
/// markers are present, in order.
fn render_inline_diagram(text: &str) -> String {
    let Some((before, rest)) = text.split_once(mermaid::START_MARKER) else {
        return text.trim().to_string();
    };
    let Some((body, after)) = rest.split_once(mermaid::END_MARKER) else {
        return text.trim().to_string();
    };

    let before = before.trim();
    let after = after.trim();

    let mut parts = Vec::new();
    if !before.is_empty() {
        parts.push(before.to_string());
    }
    parts.push(format!("```mermaid\n{}\n```", mermaid::normalize(body.trim())));
    if !after.is_empty() {
        parts.push(after.to_string());
    }
    parts.join("\n\n")
}

/// Table block: first row is the header, a `---` separator row is
/// synthesized per column, short data rows are padded to header width.
/// Cell text is concatenated descendant text with inline markup discarded.
fn render_table(doc: &Document, table: NodeId, visited: &mut VisitedSet) -> String {
    let rows: Vec<NodeId> = doc.children_tagged(table, "row").collect();
    if rows.is_empty() {
        return String::new();
    }

    // Cell paragraphs are consumed by the table; keep a descendant pass
    // from re-emitting them as standalone fragments.
    for node in doc.descendants(table) {
        if doc.tag(node) == "para" {
            visited.mark_visited(node);
        }
    }

    let cells_of = |row: NodeId| -> Vec<String> {
        doc.children_tagged(row, "entry")
            .map(|entry| collapse_whitespace(&doc.inner_text(entry)))
            .collect()
    };

    let header = cells_of(rows[0]);
    let width = header.len();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(format!("| {} |", header.join(" | ")));
    lines.push(format!("| {} |", vec!["---"; width].join(" | ")));

    for &row in &rows[1..] {
        let mut cells = cells_of(row);
        cells.resize(width.max(cells.len()), String::new());
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    lines.join("\n")
}

/// Code listing: each codeline is rebuilt from its token children so that
/// whitespace round-trips exactly, then fenced with an inferred language.
fn render_listing(doc: &Document, listing: NodeId) -> String {
    let mut lines = Vec::new();
    for codeline in doc.descendants_tagged(listing, "codeline") {
        let mut line = String::new();
        collect_code_text(doc, codeline, &mut line);
        lines.push(line);
    }
    let code = lines.join("\n");

    // Diagram notation embedded as a listing still gets the mermaid tag.
    if mermaid::looks_like_diagram(&code) {
        return format!("```mermaid\n{}\n```", mermaid::normalize(&code));
    }

    let lang = doc
        .attr(listing, "filename")
        .map(language_for_filename)
        .unwrap_or("c");
    format!("```{lang}\n{code}\n```")
}

/// Reassemble source text from a codeline subtree, translating whitespace
/// marker tokens back into literal characters.
fn collect_code_text(doc: &Document, id: NodeId, out: &mut String) {
    let node = doc.node(id);
    out.push_str(&node.text);
    for &child in &node.children {
        match doc.tag(child) {
            "sp" => match doc.attr(child, "value") {
                Some("9") => out.push('\t'),
                _ => out.push(' '),
            },
            "tab" => out.push('\t'),
            "linebreak" => out.push('\n'),
            _ => collect_code_text(doc, child, out),
        }
        out.push_str(&doc.node(child).tail);
    }
}

/// Fence language from a Doxygen `filename` hint like `.py` or `snippet.sh`.
fn language_for_filename(filename: &str) -> &'static str {
    let ext = filename.rsplit('.').next().unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "yml" | "yaml" => "yaml",
        "txt" => "text",
        "sh" => "bash",
        "json" => "json",
        "py" => "python",
        "md" => "markdown",
        _ => "c",
    }
}

/// Bullet list: one line per item from the item's first paragraph, plain
/// concatenated text only (inline markup intentionally discarded, matching
/// table cells). Each consumed paragraph is marked visited first.
fn render_list(doc: &Document, list: NodeId, visited: &mut VisitedSet) -> String {
    let mut items = Vec::new();
    for item in doc.children_tagged(list, "listitem") {
        let Some(para) = doc.child(item, "para") else {
            continue;
        };
        visited.mark_visited(para);
        let text = collapse_whitespace(&doc.inner_text(para));
        if !text.is_empty() {
            items.push(format!("- {text}"));
        }
    }
    items.join("\n")
}

/// Trim and collapse internal whitespace runs to single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

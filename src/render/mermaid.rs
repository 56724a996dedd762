//! Mermaid diagram detection and normalization.
//!
//! Doxygen has no native mermaid support, so diagram sources arrive as
//! verbatim blocks, code listings, or `@startmermaid`/`@endmermaid` spans
//! in prose. Detection is a whole-word keyword test against the mermaid
//! diagram-type vocabulary; matched blocks get cleaned up so the renderer
//! accepts them even when the source was wrapped in a C comment.

use std::sync::LazyLock;

use regex::Regex;

/// Inline delimiters for diagrams embedded directly in paragraph text.
pub const START_MARKER: &str = "@startmermaid";
pub const END_MARKER: &str = "@endmermaid";

static DIAGRAM_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(graph|flowchart|sequenceDiagram|classDiagram|stateDiagram(-v2)?|erDiagram|gantt|pie|journey|mindmap|timeline)\b",
    )
    .expect("diagram keyword pattern")
});

/// Does this text look like mermaid diagram notation?
pub fn looks_like_diagram(text: &str) -> bool {
    DIAGRAM_KEYWORD.is_match(text)
}

/// Clean up diagram text extracted from documentation comments.
///
/// - strips leading `*` comment-continuation markers from each line
/// - collapses no-break and narrow no-break spaces to plain spaces
/// - drops lines left empty by the above
/// - uppercases the orientation token after `graph`/`flowchart`
/// - collapses whitespace after the `style` directive keyword to one space,
///   leaving the rest of the line untouched
pub fn normalize(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for line in text.lines() {
        let line = line.replace(['\u{a0}', '\u{202f}'], " ");
        let line = strip_comment_marker(&line);
        if line.trim().is_empty() {
            continue;
        }
        let line = canonicalize_orientation(&line);
        let line = normalize_style_directive(&line);
        out.push(line);
    }

    out.join("\n")
}

/// Remove a leading `*` continuation marker (with its indent) from a line
/// that came out of a `/** ... */` comment.
fn strip_comment_marker(line: &str) -> String {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix('*') {
        rest.trim_start_matches('*').trim_start().to_string()
    } else {
        line.to_string()
    }
}

const ORIENTATIONS: [&str; 5] = ["TD", "TB", "LR", "RL", "BT"];

/// Uppercase the orientation token in `graph td` / `flowchart lr` headers.
fn canonicalize_orientation(line: &str) -> String {
    let mut tokens = line.split_whitespace();
    let (Some(keyword), Some(dir)) = (tokens.next(), tokens.next()) else {
        return line.to_string();
    };
    let is_header =
        keyword.eq_ignore_ascii_case("graph") || keyword.eq_ignore_ascii_case("flowchart");
    if !is_header || !ORIENTATIONS.iter().any(|o| dir.eq_ignore_ascii_case(o)) {
        return line.to_string();
    }

    // `dir` is a slice of `line`, so its byte offset is recoverable.
    let offset = dir.as_ptr() as usize - line.as_ptr() as usize;
    let mut result = String::with_capacity(line.len());
    result.push_str(&line[..offset]);
    result.push_str(&dir.to_ascii_uppercase());
    result.push_str(&line[offset + dir.len()..]);
    result
}

/// Collapse the whitespace run after a leading `style` keyword to one space.
fn normalize_style_directive(line: &str) -> String {
    let indent_len = line.len() - line.trim_start().len();
    let (indent, body) = line.split_at(indent_len);
    if let Some(rest) = body.strip_prefix("style")
        && rest.starts_with(char::is_whitespace)
    {
        return format!("{indent}style {}", rest.trim_start());
    }
    line.to_string()
}

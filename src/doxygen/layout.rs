//! DoxygenLayout.xml navigation reader.
//!
//! A much simpler tree walk than the description extractor: the sidebar
//! definition is a `navindex` of nested `tab` elements, each optionally
//! pointing at a group via an `@ref <name>` URL.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::Result;
use crate::xml::{self, Document, NodeId};

static GROUP_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@ref\s+(\w+)").expect("group ref pattern"));

/// One navigation tab, possibly nested.
#[derive(Debug, Clone)]
pub struct NavTab {
    /// Tab type attribute (`user`, `usergroup`, `mainpage`, ...).
    pub kind: String,
    pub title: String,
    /// Group name referenced by the tab URL, if any.
    pub group_ref: Option<String>,
    pub subtabs: Vec<NavTab>,
}

/// Read the navigation structure from a DoxygenLayout.xml file.
///
/// A missing file is not an error: navigation is optional and an empty
/// list simply produces a sidebar with only the overview entry. A file
/// that fails to parse is logged and treated the same way, so a broken
/// layout never aborts the conversion.
pub fn parse_layout(path: &Path) -> Result<Vec<NavTab>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let doc = match xml::parse_file(path) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "skipping unparsable layout file");
            return Ok(Vec::new());
        }
    };
    Ok(navigation_from(&doc))
}

/// Extract navigation tabs from a parsed layout document.
pub fn navigation_from(doc: &Document) -> Vec<NavTab> {
    let root = doc.root();
    let navindex = if doc.tag(root) == "navindex" {
        Some(root)
    } else {
        doc.find_descendant(root, "navindex")
    };
    let Some(navindex) = navindex else {
        return Vec::new();
    };

    doc.children_tagged(navindex, "tab")
        .filter(|&tab| doc.attr(tab, "visible").unwrap_or("yes") == "yes")
        .map(|tab| parse_tab(doc, tab))
        .collect()
}

fn parse_tab(doc: &Document, tab: NodeId) -> NavTab {
    let kind = doc.attr(tab, "type").unwrap_or("user").to_string();
    let title = doc.attr(tab, "title").unwrap_or_default().to_string();
    let url = doc.attr(tab, "url").unwrap_or_default();
    let group_ref = GROUP_REF
        .captures(url)
        .map(|caps| caps[1].to_string());

    let subtabs = doc
        .children_tagged(tab, "tab")
        .map(|sub| parse_tab(doc, sub))
        .collect();

    NavTab {
        kind,
        title,
        group_ref,
        subtabs,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_str;

    const LAYOUT_XML: &str = r#"<doxygenlayout version="1.0">
        <navindex>
            <tab type="mainpage" visible="yes" title="Home" url="@ref index"/>
            <tab type="usergroup" visible="yes" title="Core API" url="@ref group__core">
                <tab type="user" title="Memory" url="@ref group__mem"/>
            </tab>
            <tab type="user" visible="no" title="Hidden" url="@ref group__hidden"/>
        </navindex>
    </doxygenlayout>"#;

    #[test]
    fn test_navigation_tabs() {
        let doc = parse_str(LAYOUT_XML).unwrap();
        let tabs = navigation_from(&doc);
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs[0].kind, "mainpage");
        assert_eq!(tabs[1].title, "Core API");
        assert_eq!(tabs[1].group_ref.as_deref(), Some("group__core"));
        assert_eq!(tabs[1].subtabs.len(), 1);
        assert_eq!(tabs[1].subtabs[0].group_ref.as_deref(), Some("group__mem"));
    }

    #[test]
    fn test_invisible_tabs_skipped() {
        let doc = parse_str(LAYOUT_XML).unwrap();
        let tabs = navigation_from(&doc);
        assert!(tabs.iter().all(|t| t.title != "Hidden"));
    }

    #[test]
    fn test_tab_without_ref() {
        let doc = parse_str(
            r#"<navindex><tab type="user" title="External" url="https://example.com"/></navindex>"#,
        )
        .unwrap();
        let tabs = navigation_from(&doc);
        assert_eq!(tabs[0].group_ref, None);
    }

    #[test]
    fn test_missing_navindex() {
        let doc = parse_str("<doxygenlayout/>").unwrap();
        assert!(navigation_from(&doc).is_empty());
    }
}

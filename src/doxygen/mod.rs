//! Doxygen XML corpus parsing.
//!
//! Walks a Doxygen XML output directory: the index page
//! (`indexpage.xml`/`index.xml`) plus one `group__*.xml` file per module
//! group. Each compound hands its description containers to the extraction
//! engine and its `memberdef` children to the member builders. A group
//! file that fails to parse is logged and skipped; one bad file never
//! aborts the run.

pub mod layout;
pub mod member;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::render::{ExtractionPolicy, VisitedSet, extract_description};
use crate::xml::{self, Document, NodeId};

pub use layout::{NavTab, parse_layout};
pub use member::{Define, Enum, EnumValue, Function, Param, Typedef};

/// The documentation main page.
#[derive(Debug, Clone)]
pub struct PageDoc {
    pub title: String,
    pub brief: String,
    pub detailed: String,
}

/// Reference to a nested group.
#[derive(Debug, Clone)]
pub struct GroupRef {
    pub refid: String,
    pub name: String,
}

/// One documented module group with its members.
#[derive(Debug, Clone, Default)]
pub struct GroupDoc {
    /// Stable identifier (the Doxygen compound name).
    pub name: String,
    pub title: String,
    pub brief: String,
    pub detailed: String,
    pub subgroups: Vec<GroupRef>,
    pub functions: Vec<Function>,
    pub typedefs: Vec<Typedef>,
    pub enums: Vec<Enum>,
    pub defines: Vec<Define>,
}

/// The full parsed corpus: main page plus groups in filename order.
#[derive(Debug, Clone, Default)]
pub struct ApiDocs {
    pub index: Option<PageDoc>,
    pub groups: Vec<GroupDoc>,
}

impl ApiDocs {
    /// Look up a group by its stable name.
    pub fn group(&self, name: &str) -> Option<&GroupDoc> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Parse a Doxygen XML output directory.
pub fn parse_xml_dir(xml_dir: &Path) -> Result<ApiDocs> {
    let index = parse_index(xml_dir);

    let mut group_files: Vec<PathBuf> = fs::read_dir(xml_dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("group__") && n.ends_with(".xml"))
        })
        .collect();
    // read_dir order is platform-dependent; sort for deterministic output
    group_files.sort();

    let mut groups = Vec::new();
    for path in &group_files {
        match parse_group_file(path) {
            Ok(Some(group)) => {
                debug!(group = %group.name, "parsed group");
                groups.push(group);
            }
            Ok(None) => {}
            Err(e) => warn!(file = %path.display(), error = %e, "skipping unparsable group file"),
        }
    }

    Ok(ApiDocs { index, groups })
}

/// Parse the main page compound, if present. An index file that fails to
/// parse is logged and treated as absent; the groups still convert.
fn parse_index(xml_dir: &Path) -> Option<PageDoc> {
    for filename in ["indexpage.xml", "index.xml"] {
        let path = xml_dir.join(filename);
        if !path.exists() {
            continue;
        }
        let doc = match xml::parse_file(&path) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(file = %path.display(), error = %e, "skipping unparsable index file");
                continue;
            }
        };
        let Some(compound) = find_compound(&doc, "page") else {
            continue;
        };

        let title = doc
            .child_text(compound, "title")
            .filter(|t| !t.is_empty())
            .unwrap_or("API Documentation")
            .to_string();

        let mut visited = VisitedSet::new();
        let brief = extract_description(
            &doc,
            doc.child(compound, "briefdescription"),
            ExtractionPolicy::AllDescendants,
            &mut visited,
        );
        visited.reset();
        let detailed = extract_description(
            &doc,
            doc.child(compound, "detaileddescription"),
            ExtractionPolicy::AllDescendants,
            &mut visited,
        );

        return Some(PageDoc {
            title,
            brief,
            detailed,
        });
    }
    None
}

/// Parse a single `group__*.xml` file. `Ok(None)` when the file holds no
/// group compound.
pub fn parse_group_file(path: &Path) -> Result<Option<GroupDoc>> {
    let doc = xml::parse_file(path)?;
    Ok(parse_group(&doc))
}

/// Build a group record from a parsed group document.
pub fn parse_group(doc: &Document) -> Option<GroupDoc> {
    let compound = find_compound(doc, "group")?;

    let name = doc.child_text(compound, "compoundname")?.to_string();
    if name.is_empty() {
        return None;
    }
    let title = doc
        .child_text(compound, "title")
        .filter(|t| !t.is_empty())
        .unwrap_or(&name)
        .to_string();

    let mut visited = VisitedSet::new();
    let brief = extract_description(
        doc,
        doc.child(compound, "briefdescription"),
        ExtractionPolicy::DirectChildrenOnly,
        &mut visited,
    );
    visited.reset();
    // Group pages use their sections as real document structure.
    let detailed = extract_description(
        doc,
        doc.child(compound, "detaileddescription"),
        ExtractionPolicy::SectionsAware,
        &mut visited,
    );

    let subgroups = doc
        .descendants_tagged(compound, "innergroup")
        .into_iter()
        .filter_map(|ig| {
            let refid = doc.attr(ig, "refid")?.to_string();
            let name = doc.node(ig).text.trim().to_string();
            Some(GroupRef { refid, name })
        })
        .collect();

    let mut group = GroupDoc {
        name,
        title,
        brief,
        detailed,
        subgroups,
        ..GroupDoc::default()
    };

    for memberdef in doc.descendants_tagged(compound, "memberdef") {
        match doc.attr(memberdef, "kind") {
            Some("function") => {
                if let Some(func) = member::build_function(doc, memberdef) {
                    group.functions.push(func);
                }
            }
            Some("typedef") => {
                if let Some(td) = member::build_typedef(doc, memberdef) {
                    group.typedefs.push(td);
                }
            }
            Some("enum") => {
                if let Some(en) = member::build_enum(doc, memberdef) {
                    group.enums.push(en);
                }
            }
            Some("define") => {
                if let Some(def) = member::build_define(doc, memberdef) {
                    group.defines.push(def);
                }
            }
            _ => {}
        }
    }

    Some(group)
}

/// First `compounddef` descendant of the given kind.
fn find_compound(doc: &Document, kind: &str) -> Option<NodeId> {
    let root = doc.root();
    std::iter::once(root)
        .chain(doc.descendants(root))
        .find(|&n| doc.tag(n) == "compounddef" && doc.attr(n, "kind") == Some(kind))
}

//! Member models built from `memberdef` nodes.
//!
//! Each builder pulls a flat record out of one member: name, raw signature
//! text, and per-field descriptions extracted with a tracker reset between
//! fields. A member that can't be modeled (no name) yields `None` and the
//! group carries on without it.

use crate::render::{ExtractionPolicy, VisitedSet, extract_description};
use crate::xml::{Document, NodeId};

/// A documented function.
#[derive(Debug, Clone, Default)]
pub struct Function {
    pub name: String,
    /// Full signature: definition + argument string, as Doxygen records it.
    pub signature: String,
    pub brief: String,
    pub detailed: String,
    pub params: Vec<Param>,
    pub return_desc: String,
}

/// One function parameter with its matched description.
#[derive(Debug, Clone, Default)]
pub struct Param {
    pub ty: String,
    pub name: String,
    pub description: String,
}

/// A documented typedef.
#[derive(Debug, Clone, Default)]
pub struct Typedef {
    pub name: String,
    pub definition: String,
    pub brief: String,
}

/// A documented enumeration.
#[derive(Debug, Clone, Default)]
pub struct Enum {
    pub name: String,
    pub brief: String,
    pub values: Vec<EnumValue>,
}

/// One enumerator.
#[derive(Debug, Clone, Default)]
pub struct EnumValue {
    pub name: String,
    pub initializer: String,
    pub brief: String,
}

/// A documented preprocessor define.
#[derive(Debug, Clone, Default)]
pub struct Define {
    pub name: String,
    pub value: String,
    pub brief: String,
}

pub fn build_function(doc: &Document, member: NodeId) -> Option<Function> {
    let name = doc.child_text(member, "name")?.to_string();
    if name.is_empty() {
        return None;
    }

    let definition = doc.child_text(member, "definition").unwrap_or_default();
    let argsstring = doc.child_text(member, "argsstring").unwrap_or_default();
    let signature = format!("{definition}{argsstring}");

    let mut visited = VisitedSet::new();
    let brief = extract_field(doc, member, "briefdescription", &mut visited);
    visited.reset();
    let detailed = extract_description(
        doc,
        doc.child(member, "detaileddescription"),
        ExtractionPolicy::AllDescendants,
        &mut visited,
    );

    let mut params = Vec::new();
    for param in doc.children_tagged(member, "param") {
        let ty = param_type(doc, param);
        let pname = doc
            .child_text(param, "declname")
            .unwrap_or_default()
            .to_string();
        let description = param_description(doc, member, &pname);
        params.push(Param {
            ty,
            name: pname,
            description,
        });
    }

    let return_desc = return_description(doc, member);

    Some(Function {
        name,
        signature,
        brief,
        detailed,
        params,
        return_desc,
    })
}

pub fn build_typedef(doc: &Document, member: NodeId) -> Option<Typedef> {
    let name = doc.child_text(member, "name")?.to_string();
    if name.is_empty() {
        return None;
    }
    let definition = doc
        .child(member, "definition")
        .map(|d| collapse_whitespace(&doc.inner_text(d)))
        .unwrap_or_default();
    let mut visited = VisitedSet::new();
    let brief = extract_field(doc, member, "briefdescription", &mut visited);
    Some(Typedef {
        name,
        definition,
        brief,
    })
}

pub fn build_enum(doc: &Document, member: NodeId) -> Option<Enum> {
    let name = doc.child_text(member, "name")?.to_string();
    if name.is_empty() {
        return None;
    }
    let mut visited = VisitedSet::new();
    let brief = extract_field(doc, member, "briefdescription", &mut visited);

    let mut values = Vec::new();
    for value in doc.children_tagged(member, "enumvalue") {
        let vname = doc.child_text(value, "name").unwrap_or_default();
        if vname.is_empty() {
            continue;
        }
        let initializer = doc
            .child(value, "initializer")
            .map(|i| collapse_whitespace(&doc.inner_text(i)))
            .unwrap_or_default();
        visited.reset();
        let vbrief = extract_field(doc, value, "briefdescription", &mut visited);
        values.push(EnumValue {
            name: vname.to_string(),
            initializer,
            brief: vbrief,
        });
    }

    Some(Enum {
        name,
        brief,
        values,
    })
}

pub fn build_define(doc: &Document, member: NodeId) -> Option<Define> {
    let name = doc.child_text(member, "name")?.to_string();
    if name.is_empty() {
        return None;
    }
    let value = doc
        .child(member, "initializer")
        .map(|i| collapse_whitespace(&doc.inner_text(i)))
        .unwrap_or_default();
    let mut visited = VisitedSet::new();
    let brief = extract_field(doc, member, "briefdescription", &mut visited);
    Some(Define { name, value, brief })
}

/// Extract a short-form description child with a freshly reset tracker.
fn extract_field(doc: &Document, parent: NodeId, tag: &str, visited: &mut VisitedSet) -> String {
    visited.reset();
    extract_description(
        doc,
        doc.child(parent, tag),
        ExtractionPolicy::DirectChildrenOnly,
        visited,
    )
}

/// Parameter type text, including any cross-references flattened to text.
fn param_type(doc: &Document, param: NodeId) -> String {
    doc.child(param, "type")
        .map(|t| collapse_whitespace(&doc.inner_text(t)))
        .unwrap_or_default()
}

/// Description for a parameter, matched by name against the member's
/// `parameterlist`. When a name appears more than once, the last entry wins.
fn param_description(doc: &Document, member: NodeId, name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let mut description = String::new();
    for plist in doc.descendants_tagged(member, "parameterlist") {
        if doc.attr(plist, "kind") != Some("param") {
            continue;
        }
        for item in doc.children_tagged(plist, "parameteritem") {
            let matches = doc
                .find_descendant(item, "parametername")
                .map(|n| doc.inner_text(n).trim() == name)
                .unwrap_or(false);
            if !matches {
                continue;
            }
            if let Some(pdesc) = doc.find_descendant(item, "parameterdescription") {
                let mut visited = VisitedSet::new();
                description = extract_description(
                    doc,
                    Some(pdesc),
                    ExtractionPolicy::DirectChildrenOnly,
                    &mut visited,
                );
            }
        }
    }
    description
}

/// Return-value description from `simplesect kind="return"`. The last one
/// in document order wins.
fn return_description(doc: &Document, member: NodeId) -> String {
    let mut description = String::new();
    for sect in doc.descendants_tagged(member, "simplesect") {
        if doc.attr(sect, "kind") != Some("return") {
            continue;
        }
        let mut visited = VisitedSet::new();
        description = extract_description(
            doc,
            Some(sect),
            ExtractionPolicy::DirectChildrenOnly,
            &mut visited,
        );
    }
    description
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

//! # doxidown
//!
//! Convert Doxygen XML output into Docusaurus-ready Markdown.
//!
//! Point it at a Doxygen XML directory (produced with `GENERATE_XML=YES`)
//! and it writes a flat set of Markdown pages plus a `sidebars.json`: one
//! page per documented group, an index page from the main page compound,
//! and sidebar navigation taken from `DoxygenLayout.xml` when available.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//!
//! let docs = doxidown::parse_xml_dir(Path::new("build/xml")).unwrap();
//! let navigation = doxidown::parse_layout(Path::new("DoxygenLayout.xml")).unwrap();
//! doxidown::emit::generate(Path::new("docs/api"), &docs, &navigation).unwrap();
//! ```
//!
//! Descriptions are extracted by a recursive renderer that understands
//! Doxygen's mixed-content markup (nested sections, tables, code listings,
//! itemized lists, inline references) and recognizes Mermaid diagrams
//! embedded in comments, emitting them as fenced ```mermaid blocks.

pub mod doxygen;
pub mod emit;
pub mod error;
pub mod render;
pub mod xml;

pub use doxygen::{ApiDocs, GroupDoc, NavTab, PageDoc, parse_layout, parse_xml_dir};
pub use error::{Error, Result};
pub use render::{ExtractionPolicy, VisitedSet, extract_description};

//! Parsed XML document model and parser.
//!
//! The model mirrors what the description-extraction engine consumes: a
//! read-only tree of tagged nodes with ordered children, attribute maps,
//! and the text/tail split needed for mixed content.

mod document;
mod parser;

pub use document::{Descendants, Document, NodeId, XmlNode};
pub use parser::{parse_file, parse_str};

#![cfg_attr(docsrs, feature(doc_cfg))]
//! The `nodesetxml` resource format: nested `<nodeset>` documents resolved
//! into flat, uniquely named nodes.
//!
//! ```rust,no_run
//! use nodeset::{NodesetXmlParser, ResourceFormatParser};
//! use std::path::Path;
//!
//! # fn run() -> Result<(), nodeset::ParseError> {
//! let parser = NodesetXmlParser::new();
//! let nodes = parser.parse_path(Path::new("inventory.nodesetxml"))?;
//! for node in nodes.with_tag("web") {
//!     println!("{} {:?}", node.name, node.attribute("hostname"));
//! }
//! # Ok(())
//! # }
//! ```

pub use nodeset_core as model;
pub use nodeset_xml as xml;

pub mod format;

use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use nodeset_core::NodesetError;
use nodeset_xml::XmlError;
use thiserror::Error;
use tracing::debug;

pub use format::{NodesetXmlParser, ResourceFormatParser};
pub use nodeset_core::{NodeSet, NodeSink, ResolvedNode};

/// Error type produced when a document cannot be turned into nodes.
///
/// Every variant aborts the parse; no partial node set is returned.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document file could not be opened.
    #[error("open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading the document stream failed.
    #[error("read: {0}")]
    Io(#[source] io::Error),
    /// The document is not well-formed XML.
    #[error("malformed document: {0}")]
    Xml(#[source] XmlError),
    /// Well-formed XML that is not a nodeset document.
    #[error(transparent)]
    Format(#[from] NodesetError),
}

impl From<XmlError> for ParseError {
    fn from(err: XmlError) -> Self {
        match err {
            XmlError::Io(err) => ParseError::Io(err),
            other => ParseError::Xml(other),
        }
    }
}

/// Parse one document from an open stream into a fresh [`NodeSet`].
pub fn parse_reader<R: Read>(input: R) -> Result<NodeSet, ParseError> {
    let mut nodes = NodeSet::new();
    parse_reader_into(input, &mut nodes)?;
    Ok(nodes)
}

/// Parse one document from an open stream into `sink`.
///
/// `sink` is only written once the whole document has been read and
/// accepted.
pub fn parse_reader_into<R: Read, S: NodeSink>(input: R, sink: &mut S) -> Result<(), ParseError> {
    let doc = nodeset_xml::read_document(BufReader::new(input))?;
    nodeset_core::load_nodes_into(&doc.root, sink)?;
    debug!(nodes = sink.all().len(), "parsed nodeset document");
    Ok(())
}

/// Parse the document stored at `path`.
pub fn parse_path(path: impl AsRef<Path>) -> Result<NodeSet, ParseError> {
    NodesetXmlParser.parse_path(path.as_ref())
}

/// Parse an in-memory document.
pub fn parse_str(xml: &str) -> Result<NodeSet, ParseError> {
    parse_reader(xml.as_bytes())
}

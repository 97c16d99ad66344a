//! Resource format descriptors and the `nodesetxml` parser.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use nodeset_core::NodeSet;
use tracing::debug;

use crate::ParseError;

/// Format name of nested nodeset documents.
pub const NODESETXML: &str = "nodesetxml";
/// Human readable title of the format.
pub const TITLE: &str = "Nodeset XML Parser";
pub const DESCRIPTION: &str = "Parses nodes defined in the nodesetxml format";
/// File extensions associated with the format, dot included.
pub const FILE_EXTENSIONS: &[&str] = &[".nodesetxml"];
/// Content types associated with the format.
pub const MIME_TYPES: &[&str] = &["application/rundeck-nodeset,v1+xml"];

/// A parser turning one document format into a [`NodeSet`].
pub trait ResourceFormatParser {
    /// Short identifier of the format, e.g. `nodesetxml`.
    fn name(&self) -> &'static str;
    /// File extensions including the leading dot.
    fn file_extensions(&self) -> &'static [&'static str];
    fn mime_types(&self) -> &'static [&'static str];

    /// Parse one document from an already opened stream.
    ///
    /// The stream is left open; closing it is the caller's business.
    fn parse_reader(&self, input: &mut dyn Read) -> Result<NodeSet, ParseError>;

    /// Open `path`, parse it and release the file on every exit path.
    fn parse_path(&self, path: &Path) -> Result<NodeSet, ParseError> {
        debug!(path = %path.display(), format = self.name(), "opening document");
        let mut file = File::open(path).map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        // `file` is dropped on return; a failing close is not reported
        self.parse_reader(&mut file)
    }

    /// Whether the file name of `path` ends in one of [`Self::file_extensions`].
    fn accepts_path(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        self.file_extensions()
            .iter()
            .any(|known| known.strip_prefix('.') == Some(ext))
    }

    /// Whether `mime` names one of [`Self::mime_types`]; type names are
    /// compared without regard to ASCII case.
    fn accepts_mime(&self, mime: &str) -> bool {
        let mime = mime.trim();
        self.mime_types()
            .iter()
            .any(|known| known.eq_ignore_ascii_case(mime))
    }
}

/// Parser for the nested `<nodeset>` XML format.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodesetXmlParser;

impl NodesetXmlParser {
    pub fn new() -> Self {
        NodesetXmlParser
    }

    pub fn title(&self) -> &'static str {
        TITLE
    }

    pub fn description(&self) -> &'static str {
        DESCRIPTION
    }
}

impl ResourceFormatParser for NodesetXmlParser {
    fn name(&self) -> &'static str {
        NODESETXML
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        FILE_EXTENSIONS
    }

    fn mime_types(&self) -> &'static [&'static str] {
        MIME_TYPES
    }

    fn parse_reader(&self, input: &mut dyn Read) -> Result<NodeSet, ParseError> {
        crate::parse_reader(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_matching() {
        let parser = NodesetXmlParser::new();
        assert!(parser.accepts_path(Path::new("/etc/inventory/prod.nodesetxml")));
        assert!(!parser.accepts_path(Path::new("prod.xml")));
        assert!(!parser.accepts_path(Path::new("nodesetxml")));
    }

    #[test]
    fn mime_matching() {
        let parser = NodesetXmlParser::new();
        assert!(parser.accepts_mime("application/rundeck-nodeset,v1+xml"));
        assert!(parser.accepts_mime(" Application/Rundeck-Nodeset,v1+XML "));
        assert!(!parser.accepts_mime("application/xml"));
    }

    #[test]
    fn descriptor() {
        let parser = NodesetXmlParser::new();
        assert_eq!(parser.name(), "nodesetxml");
        assert_eq!(parser.title(), "Nodeset XML Parser");
        assert_eq!(parser.file_extensions(), &[".nodesetxml"]);
    }

    #[test]
    fn trait_object_parses() {
        let parser: Box<dyn ResourceFormatParser> = Box::new(NodesetXmlParser);
        let mut input: &[u8] = br#"<nodeset><node name="a"/></nodeset>"#;
        let nodes = parser.parse_reader(&mut input).expect("parse");
        assert!(nodes.contains("a"));
    }
}

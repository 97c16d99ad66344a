use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use nodeset::{NodeSet, NodesetXmlParser, ResolvedNode, ResourceFormatParser};
use serde::Serialize;
use tracing::{info, warn};

/// Input path meaning "read the document from stdin".
pub const STDIN_PATH: &str = "-";

#[derive(Serialize)]
pub struct NodeEntry<'a> {
    pub name: &'a str,
    pub attributes: &'a BTreeMap<String, String>,
    pub tags: Vec<&'a str>,
}

impl<'a> From<&'a ResolvedNode> for NodeEntry<'a> {
    fn from(node: &'a ResolvedNode) -> Self {
        NodeEntry {
            name: &node.name,
            attributes: &node.attributes,
            tags: node.tags.iter().map(String::as_str).collect(),
        }
    }
}

/// Load the nodes of `input`, a file path or `-` for stdin.
pub fn load_nodes(input: &Path) -> Result<NodeSet> {
    let parser = NodesetXmlParser::new();
    let nodes = if input.as_os_str() == STDIN_PATH {
        let stdin = io::stdin();
        let mut lock = stdin.lock();
        parser
            .parse_reader(&mut lock)
            .context("parse nodeset document from stdin")?
    } else {
        if !parser.accepts_path(input) {
            warn!(
                path = %input.display(),
                expected = ?parser.file_extensions(),
                "unexpected file extension, parsing anyway"
            );
        }
        parser
            .parse_path(input)
            .with_context(|| format!("parse nodeset document {}", input.display()))?
    };
    info!(count = nodes.len(), "resolved nodes");
    Ok(nodes)
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serialise JSON output")?;
    println!("{text}");
    Ok(())
}

pub fn format_tags(node: &ResolvedNode) -> String {
    node.tags
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn node_entry_serialises_sorted() {
        let nodes = nodeset::parse_str(
            r#"<nodeset tags="b, a"><node name="n" z="1" a="2"/></nodeset>"#,
        )
        .expect("parse");
        let entry = NodeEntry::from(nodes.get("n").expect("n"));
        let json = serde_json::to_string(&entry).expect("json");
        assert_eq!(
            json,
            r#"{"name":"n","attributes":{"a":"2","name":"n","z":"1"},"tags":["a","b"]}"#
        );
    }

    #[test]
    fn load_nodes_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"<nodeset><node name="x"/></nodeset>"#).expect("write");
        let nodes = load_nodes(file.path()).expect("load");
        assert!(nodes.contains("x"));
    }

    #[test]
    fn load_nodes_error_names_the_file() {
        let err = load_nodes(Path::new("/nonexistent/inventory.nodesetxml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/inventory.nodesetxml"));
    }

    #[test]
    fn tags_are_comma_joined() {
        let nodes = nodeset::parse_str(r#"<nodeset><node name="n" tags="web, db"/></nodeset>"#)
            .expect("parse");
        assert_eq!(format_tags(nodes.get("n").expect("n")), "db,web");
    }
}

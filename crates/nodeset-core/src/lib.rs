//! Nodeset inheritance: turn a nested `<nodeset>` tree into flat, named
//! node records.
//!
//! ```
//! use nodeset_core::load_nodes;
//!
//! let doc = nodeset_xml::parse_str(
//!     r#"<nodeset user="deploy" tags="prod">
//!            <node name="web1" hostname="10.0.0.1" tags="web"/>
//!        </nodeset>"#,
//! )
//! .unwrap();
//! let nodes = load_nodes(&doc.root).unwrap();
//! let web1 = nodes.get("web1").unwrap();
//! assert_eq!(web1.attribute("user"), Some("deploy"));
//! assert!(web1.has_tag("prod") && web1.has_tag("web"));
//! ```

pub mod resolve;
pub mod sink;
pub mod tags;
pub mod tree;

use nodeset_xml::Element;
use thiserror::Error;

pub use resolve::{compose, resolve};
pub use sink::{Attributes, NodeSet, NodeSink, ResolvedNode, Tags};
pub use tags::split_tags;
pub use tree::{Declarations, Group, GroupId, Item, ItemId, NodesetTree};

/// Error type produced while interpreting a nodeset document.
#[derive(Debug, Error)]
pub enum NodesetError {
    /// The document root is not a `<nodeset>` element.
    #[error("nodesetxml format error: root element should be 'nodeset'")]
    RootElement { found: String },
}

/// Resolve the document rooted at `root` into a fresh [`NodeSet`].
pub fn load_nodes(root: &Element) -> Result<NodeSet, NodesetError> {
    let mut nodes = NodeSet::new();
    load_nodes_into(root, &mut nodes)?;
    Ok(nodes)
}

/// Resolve the document rooted at `root` into a caller supplied sink.
///
/// Nothing is written to `sink` when the document is rejected.
pub fn load_nodes_into<S: NodeSink>(root: &Element, sink: &mut S) -> Result<(), NodesetError> {
    let tree = NodesetTree::build(root)?;
    resolve(&tree, sink);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(xml: &str) -> Result<NodeSet, NodesetError> {
        let doc = nodeset_xml::parse_str(xml).expect("parse xml");
        load_nodes(&doc.root)
    }

    #[test]
    fn two_level_scenario() {
        let nodes =
            load(r#"<nodeset><node name="a" x="1"/><nodeset tags="g"><node name="b" x="2"/></nodeset></nodeset>"#)
                .expect("load");
        assert_eq!(nodes.len(), 2);

        let a = nodes.get("a").expect("a");
        assert_eq!(a.attribute("x"), Some("1"));
        assert_eq!(a.attribute("name"), Some("a"));
        assert_eq!(a.attributes.len(), 2);
        assert!(a.tags.is_empty());

        let b = nodes.get("b").expect("b");
        assert_eq!(b.attribute("x"), Some("2"));
        assert_eq!(b.tags, Tags::from(["g".to_string()]));
    }

    #[test]
    fn empty_document_yields_no_nodes() {
        let nodes = load("<nodeset/>").expect("load");
        assert!(nodes.is_empty());
    }

    #[test]
    fn wrong_root_fails_without_touching_sink() {
        let doc = nodeset_xml::parse_str(r#"<project><node name="a"/></project>"#).expect("xml");
        let mut sink = NodeSet::new();
        let err = load_nodes_into(&doc.root, &mut sink).unwrap_err();
        assert_eq!(
            err.to_string(),
            "nodesetxml format error: root element should be 'nodeset'"
        );
        assert!(matches!(err, NodesetError::RootElement { ref found } if found == "project"));
        assert!(sink.is_empty());
    }

    #[test]
    fn namespace_declarations_do_not_reach_nodes() {
        let nodes = load(
            r#"<nodeset xmlns="urn:n" xmlns:x="urn:x" x:owner="ops">
                <nodeset xmlns:y="urn:y"><node name="a"/></nodeset>
            </nodeset>"#,
        )
        .expect("load");
        let a = nodes.get("a").expect("a");
        assert!(
            a.attributes.keys().all(|key| !key.starts_with("xmlns")),
            "{:?}",
            a.attributes
        );
        assert_eq!(a.attribute("owner"), Some("ops"));
        assert_eq!(a.attributes.len(), 2);
    }

    #[test]
    fn tags_never_appear_as_attribute() {
        let nodes = load(
            r#"<nodeset tags="a">
                <attributes><attribute name="tags" value="b, c"/></attributes>
                <node name="n" tags="d">
                    <attributes><attribute name="tags" value="e"/></attributes>
                </node>
            </nodeset>"#,
        )
        .expect("load");
        let n = nodes.get("n").expect("n");
        assert!(n.attribute("tags").is_none());
        let tags: Vec<_> = n.tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["a", "b", "c", "d", "e"]);
    }
}

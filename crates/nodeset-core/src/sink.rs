//! Destination for resolved nodes.

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

/// Attribute mapping of a resolved node.
pub type Attributes = BTreeMap<String, String>;
/// Tag set of a resolved node.
pub type Tags = BTreeSet<String>;

/// A node with its inherited attributes and tags fully composed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedNode {
    pub name: String,
    pub attributes: Attributes,
    pub tags: Tags,
}

impl ResolvedNode {
    pub fn new(name: impl Into<String>) -> Self {
        ResolvedNode {
            name: name.into(),
            ..ResolvedNode::default()
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Storage receiving resolved nodes.
///
/// `put` inserts or replaces the record for `name`; the resolver relies on
/// nothing else about how records are kept.
pub trait NodeSink {
    /// Insert the node, replacing any record with the same name.
    fn put(&mut self, name: String, attributes: Attributes, tags: Tags);
    /// Every stored node.
    fn all(&self) -> Vec<&ResolvedNode>;
}

/// Default sink: one node per name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    nodes: BTreeMap<String, ResolvedNode>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedNode> {
        self.nodes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, ResolvedNode> {
        self.nodes.values()
    }

    /// Nodes carrying `tag`, in name order.
    pub fn with_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a ResolvedNode> + 'a {
        self.iter().filter(move |node| node.has_tag(tag))
    }

    pub fn into_nodes(self) -> Vec<ResolvedNode> {
        self.nodes.into_values().collect()
    }
}

impl NodeSink for NodeSet {
    fn put(&mut self, name: String, attributes: Attributes, tags: Tags) {
        let mut node = ResolvedNode::new(name.clone());
        node.attributes = attributes;
        node.tags = tags;
        self.nodes.insert(name, node);
    }

    fn all(&self) -> Vec<&ResolvedNode> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = &'a ResolvedNode;
    type IntoIter = btree_map::Values<'a, String, ResolvedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for NodeSet {
    type Item = ResolvedNode;
    type IntoIter = btree_map::IntoValues<String, ResolvedNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_values()
    }
}

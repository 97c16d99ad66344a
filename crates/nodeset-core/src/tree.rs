//! Intermediate group/item tree built from a `<nodeset>` document.
//!
//! Groups and items live in two arenas owned by [`NodesetTree`]; parent
//! links are plain indices, so the tree has a single owner and no cycles.

use std::collections::{BTreeMap, BTreeSet};

use nodeset_xml::Element;
use tracing::{debug, trace};

use crate::tags::split_tags;
use crate::NodesetError;

pub const NODESET_ELEMENT: &str = "nodeset";
pub const NODE_ELEMENT: &str = "node";
/// Path of nested attribute declarations below a group or node element.
pub const ATTRIBUTE_PATH: &str = "attributes/attribute";
/// Attribute name holding a tag list instead of a plain value.
pub const TAGS_ATTRIBUTE: &str = "tags";

/// Index of a group in [`NodesetTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

/// Index of an item in [`NodesetTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(usize);

/// Attributes and tags declared directly on one element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    pub attributes: BTreeMap<String, String>,
    pub tags: BTreeSet<String>,
}

impl Declarations {
    /// Collect declarations from `element`: its XML attributes first, then
    /// nested `<attributes><attribute name=".." value=".."/></attributes>`
    /// entries, which win over plain attributes of the same name. Prefixed
    /// XML attributes are declared under their local name.
    pub fn from_element(element: &Element) -> Self {
        let mut decls = Declarations::default();
        for (name, value) in &element.attributes {
            decls.declare(local_name(name), value);
        }
        for attr in element.select(ATTRIBUTE_PATH) {
            match (attr.attribute("name"), attr.attribute("value")) {
                (Some(name), Some(value)) => decls.declare(name, value),
                _ => trace!("skipping <attribute> without name or value"),
            }
        }
        decls
    }

    fn declare(&mut self, name: &str, value: &str) {
        if name == TAGS_ATTRIBUTE {
            self.tags.extend(split_tags(value));
        } else {
            self.attributes.insert(name.to_string(), value.to_string());
        }
    }
}

fn local_name(qualified: &str) -> &str {
    qualified
        .split_once(':')
        .map_or(qualified, |(_, local)| local)
}

/// A `<node>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub decls: Declarations,
    /// Group the node was declared in.
    pub parent: GroupId,
}

impl Item {
    /// Locally declared `name`, the identity of the resolved node.
    pub fn name(&self) -> Option<&str> {
        self.decls.attributes.get("name").map(String::as_str)
    }
}

/// A `<nodeset>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub decls: Declarations,
    /// `None` only for the document root.
    pub parent: Option<GroupId>,
    pub items: Vec<ItemId>,
    pub groups: Vec<GroupId>,
}

/// Arena holding every group and item of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodesetTree {
    groups: Vec<Group>,
    items: Vec<Item>,
}

impl NodesetTree {
    /// Build the tree from a parsed document root.
    ///
    /// Items are numbered in discovery order: a group's own `<node>`
    /// children first, then the items of each nested `<nodeset>` in turn.
    pub fn build(root: &Element) -> Result<Self, NodesetError> {
        if root.name != NODESET_ELEMENT {
            return Err(NodesetError::RootElement {
                found: root.name.clone(),
            });
        }
        let mut tree = NodesetTree {
            groups: Vec::new(),
            items: Vec::new(),
        };
        tree.add_group(root, None);
        debug!(
            groups = tree.groups.len(),
            items = tree.items.len(),
            "nodeset tree built"
        );
        Ok(tree)
    }

    fn add_group(&mut self, element: &Element, parent: Option<GroupId>) -> GroupId {
        let id = GroupId(self.groups.len());
        self.groups.push(Group {
            decls: Declarations::from_element(element),
            parent,
            items: Vec::new(),
            groups: Vec::new(),
        });

        for node in element.children_named(NODE_ELEMENT) {
            let item = ItemId(self.items.len());
            self.items.push(Item {
                decls: Declarations::from_element(node),
                parent: id,
            });
            self.groups[id.0].items.push(item);
        }

        for nested in element.children_named(NODESET_ELEMENT) {
            let child = self.add_group(nested, Some(id));
            self.groups[id.0].groups.push(child);
        }
        id
    }

    /// The document root group.
    pub fn root(&self) -> &Group {
        &self.groups[0]
    }

    pub fn group(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }

    pub fn item(&self, id: ItemId) -> &Item {
        &self.items[id.0]
    }

    /// Every item in discovery order.
    pub fn items(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items
            .iter()
            .enumerate()
            .map(|(idx, item)| (ItemId(idx), item))
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Groups enclosing `id`, root first, innermost last.
    pub fn ancestors(&self, id: ItemId) -> Vec<&Group> {
        let mut chain = Vec::new();
        let mut next = Some(self.item(id).parent);
        while let Some(group_id) = next {
            let group = self.group(group_id);
            chain.push(group);
            next = group.parent;
        }
        chain.reverse();
        chain
    }
}

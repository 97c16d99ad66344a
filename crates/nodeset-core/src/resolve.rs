//! Attribute and tag inheritance from the group chain down to each node.

use tracing::{debug, warn};

use crate::sink::{Attributes, NodeSink, Tags};
use crate::tree::{Declarations, NodesetTree};

/// Resolve every item of `tree` into `sink`, in discovery order.
///
/// Each node starts empty and folds in the declarations of its enclosing
/// groups from the root inwards, then its own. Attributes are overwritten by
/// later declarations; tags only accumulate. A node is keyed by its own
/// `name` attribute, so a later node with the same name replaces an earlier
/// one. A node without a local `name` is stored under the empty name.
pub fn resolve<S: NodeSink>(tree: &NodesetTree, sink: &mut S) {
    for (id, item) in tree.items() {
        let name = match item.name() {
            Some(name) => name.to_string(),
            None => {
                warn!(item = ?id, "node declared without a name attribute");
                String::new()
            }
        };

        let chain = tree.ancestors(id);
        let (attributes, tags) = compose(
            chain
                .iter()
                .map(|group| &group.decls)
                .chain(std::iter::once(&item.decls)),
        );

        debug!(
            node = %name,
            depth = chain.len(),
            attributes = attributes.len(),
            tags = tags.len(),
            "resolved node"
        );
        sink.put(name, attributes, tags);
    }
}

/// Fold declarations outermost first into a fresh attribute map and tag set.
pub fn compose<'a, I>(chain: I) -> (Attributes, Tags)
where
    I: IntoIterator<Item = &'a Declarations>,
{
    let mut attributes = Attributes::new();
    let mut tags = Tags::new();
    for decls in chain {
        attributes.extend(
            decls
                .attributes
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        tags.extend(decls.tags.iter().cloned());
    }
    (attributes, tags)
}

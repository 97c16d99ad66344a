use std::path::Path;

use anyhow::Result;
use nodeset::ResolvedNode;

use crate::common::{self, NodeEntry};

pub fn run(input: &Path, tag: Option<&str>, json: bool) -> Result<()> {
    let nodes = common::load_nodes(input)?;
    let selected: Vec<&ResolvedNode> = match tag {
        Some(tag) => nodes.with_tag(tag).collect(),
        None => nodes.iter().collect(),
    };

    if json {
        let entries: Vec<NodeEntry<'_>> = selected.iter().copied().map(NodeEntry::from).collect();
        common::print_json(&entries)?;
        return Ok(());
    }

    if selected.is_empty() {
        println!("No nodes resolved.");
        return Ok(());
    }

    println!("{:<24} {:<28} {:<6} {}", "NAME", "HOSTNAME", "ATTRS", "TAGS");
    for node in selected {
        println!(
            "{:<24} {:<28} {:<6} {}",
            node.name,
            node.attribute("hostname").unwrap_or("-"),
            node.attributes.len(),
            common::format_tags(node),
        );
    }

    Ok(())
}

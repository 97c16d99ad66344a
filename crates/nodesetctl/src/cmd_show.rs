use std::path::Path;

use anyhow::{anyhow, Result};

use crate::common::{self, NodeEntry};

pub fn run(input: &Path, name: &str, json: bool) -> Result<()> {
    let nodes = common::load_nodes(input)?;
    let node = nodes
        .get(name)
        .ok_or_else(|| anyhow!("node '{name}' not found in {}", input.display()))?;

    if json {
        common::print_json(&NodeEntry::from(node))?;
        return Ok(());
    }

    println!("{}", node.name);
    for (key, value) in &node.attributes {
        println!("  {key:<24} {value}");
    }
    println!("  {:<24} {}", "tags", common::format_tags(node));
    Ok(())
}

use anyhow::Result;
use nodeset::{NodesetXmlParser, ResourceFormatParser};
use serde::Serialize;

#[derive(Serialize)]
struct FormatEntry {
    name: &'static str,
    title: &'static str,
    description: &'static str,
    extensions: &'static [&'static str],
    mime_types: &'static [&'static str],
}

pub fn run(json: bool) -> Result<()> {
    let parser = NodesetXmlParser::new();
    let entry = FormatEntry {
        name: parser.name(),
        title: parser.title(),
        description: parser.description(),
        extensions: parser.file_extensions(),
        mime_types: parser.mime_types(),
    };

    if json {
        return crate::common::print_json(&[entry]);
    }

    println!("{:<12} {:<14} {}", "FORMAT", "EXTENSIONS", "MIME TYPES");
    println!(
        "{:<12} {:<14} {}",
        entry.name,
        entry.extensions.join(","),
        entry.mime_types.join(" ")
    );
    Ok(())
}

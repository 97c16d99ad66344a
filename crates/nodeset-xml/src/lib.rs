//! Read XML documents into an owned element tree using quick-xml.

mod model;

use std::fmt::Display;
use std::io::{self, BufRead};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;
use tracing::trace;

pub use model::{Content, Document, Element};

#[derive(Debug, Error)]
pub enum XmlError {
    /// The input is not well-formed XML.
    #[error("xml: {0}")]
    Xml(String),
    /// Reading the underlying stream failed.
    #[error("io: {0}")]
    Io(#[source] io::Error),
}

/// Parse an in-memory XML document.
pub fn parse_str(xml: &str) -> Result<Document, XmlError> {
    read_document(xml.as_bytes())
}

/// Read a whole document from `input`.
///
/// The reader is borrowed for the duration of the call only; closing it
/// stays with whoever opened it.
pub fn read_document<R: BufRead>(input: R) -> Result<Document, XmlError> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                stack.push(open_element(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let element = open_element(&e)?;
                attach(element, &mut stack, &mut root, reader.buffer_position())?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    XmlError::Xml(format!(
                        "unexpected closing tag at byte {}",
                        reader.buffer_position()
                    ))
                })?;
                attach(element, &mut stack, &mut root, reader.buffer_position())?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| syntax(err, reader.buffer_position()))?
                    .into_owned();
                push_text(&mut stack, text, reader.buffer_position())?;
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8(e.into_inner().into_owned())
                    .map_err(|err| XmlError::Xml(format!("invalid UTF-8 in CDATA: {err}")))?;
                push_text(&mut stack, text, reader.buffer_position())?;
            }
            Ok(Event::Eof) => break,
            Err(quick_xml::Error::Io(err)) => {
                return Err(XmlError::Io(io::Error::new(err.kind(), err.to_string())));
            }
            Err(err) => return Err(syntax(err, reader.buffer_position())),
            // declarations, comments, processing instructions, doctype
            Ok(_) => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::Xml(format!(
            "unexpected end of document: <{}> is not closed",
            open.name
        )));
    }
    let root = root.ok_or_else(|| XmlError::Xml("document has no root element".into()))?;
    trace!(root = %root.name, "xml document loaded");
    Ok(Document { root })
}

fn open_element(event: &BytesStart<'_>) -> Result<Element, XmlError> {
    let name = utf8(event.name().as_ref())?;
    let mut element = Element::new(name);
    for attr in event.attributes() {
        let attr = attr.map_err(|err| XmlError::Xml(err.to_string()))?;
        // `xmlns` / `xmlns:*` bind prefixes, they are not attributes
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = utf8(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|err| XmlError::Xml(err.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
    position: impl Display,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Content::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::Xml(format!(
            "second root element <{}> at byte {position}",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], text: String, position: impl Display) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Content::Text(text));
            Ok(())
        }
        None if text.trim_start_matches('\u{feff}').trim().is_empty() => Ok(()),
        None => Err(XmlError::Xml(format!(
            "text outside of the root element at byte {position}"
        ))),
    }
}

fn utf8(bytes: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|err| XmlError::Xml(format!("invalid UTF-8 in name: {err}")))
}

fn syntax(err: quick_xml::Error, position: impl Display) -> XmlError {
    XmlError::Xml(format!("{err} (at byte {position})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Read};

    #[test]
    fn parse_nested_document() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <!-- inventory -->
            <nodeset tags="a, b" owner="ops &amp; dev">
                <node name="n1"/>
                <nodeset>
                    <node name="n2">note</node>
                </nodeset>
            </nodeset>
        "#;
        let doc = parse_str(xml).expect("parse xml");
        let root = &doc.root;
        assert_eq!(root.name, "nodeset");
        assert_eq!(root.attribute("tags"), Some("a, b"));
        assert_eq!(root.attribute("owner"), Some("ops & dev"));
        assert_eq!(root.elements().count(), 2);
        let nested = root.children_named("nodeset").next().expect("nested set");
        let n2 = nested.children_named("node").next().expect("n2");
        assert_eq!(n2.attribute("name"), Some("n2"));
        assert_eq!(n2.text(), "note");
    }

    #[test]
    fn attributes_keep_declaration_order() {
        let doc = parse_str(r#"<node z="1" a="2" m="3"/>"#).expect("parse xml");
        let keys: Vec<_> = doc.root.attributes.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn namespace_bindings_are_not_attributes() {
        let doc = parse_str(r#"<nodeset xmlns="urn:n" xmlns:x="urn:x" x:owner="ops"/>"#)
            .expect("parse xml");
        assert_eq!(
            doc.root.attributes,
            vec![("x:owner".to_string(), "ops".to_string())]
        );
    }

    #[test]
    fn cdata_becomes_text() {
        let doc = parse_str("<node><![CDATA[a < b]]></node>").expect("parse xml");
        assert_eq!(doc.root.text(), "a < b");
    }

    #[test]
    fn mismatched_end_tag_is_rejected() {
        let err = parse_str("<nodeset><node></nodeset>").unwrap_err();
        assert!(matches!(err, XmlError::Xml(_)), "{err}");
    }

    #[test]
    fn unclosed_root_is_rejected() {
        let err = parse_str("<nodeset><node/>").unwrap_err();
        assert!(err.to_string().contains("not closed"), "{err}");
    }

    #[test]
    fn missing_root_is_rejected() {
        let err = parse_str("<!-- nothing here -->").unwrap_err();
        assert!(err.to_string().contains("no root"), "{err}");
        assert!(parse_str("").is_err());
    }

    #[test]
    fn second_root_is_rejected() {
        let err = parse_str("<nodeset/><nodeset/>").unwrap_err();
        assert!(err.to_string().contains("second root"), "{err}");
    }

    #[test]
    fn duplicate_attribute_is_rejected() {
        assert!(parse_str(r#"<node name="a" name="b"/>"#).is_err());
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream gone"))
        }
    }

    #[test]
    fn reader_failure_surfaces_as_io() {
        let err = read_document(BufReader::new(FailingReader)).unwrap_err();
        match err {
            XmlError::Io(io) => assert_eq!(io.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

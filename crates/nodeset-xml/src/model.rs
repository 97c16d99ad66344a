//! Owned element tree produced by the reader.

/// A parsed XML document with exactly one root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

/// XML element with attributes kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Qualified tag name as written in the document.
    pub name: String,
    /// `(name, value)` pairs, values already unescaped.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Content>,
}

/// Child content of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    /// Create an empty element named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Element::default()
        }
    }

    /// Builder style helper used when assembling trees by hand.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder style helper appending a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Content::Element(child));
        self
    }

    /// Value of the attribute `name`, if declared.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|content| match content {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// Direct child elements whose tag name equals `name`.
    pub fn children_named<'s, 'n>(&'s self, name: &'n str) -> impl Iterator<Item = &'s Element> + 'n
    where
        's: 'n,
    {
        self.elements().filter(move |element| element.name == name)
    }

    /// Resolve a relative, slash separated child path such as
    /// `attributes/attribute`.
    ///
    /// Every step matches direct children by name; results keep document
    /// order. Empty steps are ignored, so `a//b` behaves like `a/b`.
    pub fn select(&self, path: &str) -> Vec<&Element> {
        let mut current = vec![self];
        for step in path.split('/').filter(|step| !step.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|element| element.elements().filter(move |child| child.name == step))
                .collect();
        }
        current
    }

    /// Concatenated text of the direct text children.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|content| match content {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect()
    }
}

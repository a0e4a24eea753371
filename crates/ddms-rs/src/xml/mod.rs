// crates/ddms-rs/src/xml/mod.rs

//! Minimal namespace-aware XML element tree.
//!
//! This is the input contract of every component's parse path: a node with a
//! namespace-qualified name, ordered attributes, ordered children and optional
//! text. It is also the intermediate form the XML renderer writes out.

mod reader;
mod writer;

pub use writer::write;

use crate::error::XmlError;

/// A namespace-qualified name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub local: String,
}

impl QName {
    /// A name with no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self {
            namespace: None,
            prefix: None,
            local: local.into(),
        }
    }

    pub fn qualified(namespace: &str, prefix: &str, local: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            prefix: (!prefix.is_empty()).then(|| prefix.to_string()),
            local: local.to_string(),
        }
    }

    /// True when the name is `local` in `namespace` (`None` meaning "no namespace").
    pub fn matches(&self, namespace: Option<&str>, local: &str) -> bool {
        self.local == local && self.namespace.as_deref() == namespace
    }

    /// The lexical `prefix:local` form.
    pub fn lexical(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.local),
            None => self.local.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QName,
    pub value: String,
}

/// A parsed or generated XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: QName,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
    pub text: Option<String>,
}

impl Element {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Parses a document and returns its root element.
    pub fn parse(xml: &str) -> Result<Element, XmlError> {
        reader::parse(xml)
    }

    pub fn with_attribute(mut self, name: QName, value: impl Into<String>) -> Self {
        self.push_attribute(name, value);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn push_attribute(&mut self, name: QName, value: impl Into<String>) {
        self.attributes.push(Attribute {
            name,
            value: value.into(),
        });
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Looks up an attribute by namespace URI (`None` for unqualified) and local name.
    pub fn attribute(&self, namespace: Option<&str>, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.matches(namespace, local))
            .map(|a| a.value.as_str())
    }

    /// First child with the given name.
    pub fn child(&self, namespace: &str, local: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.name.matches(Some(namespace), local))
    }

    /// All children with the given name, in document order.
    pub fn children_named<'a, 'n>(
        &'a self,
        namespace: &'n str,
        local: &'n str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'n> {
        self.children
            .iter()
            .filter(move |c| c.name.matches(Some(namespace), local))
    }

    /// The element's text content, or `""` when it has none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

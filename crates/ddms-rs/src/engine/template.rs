// crates/ddms-rs/src/engine/template.rs

//! The ordered output template every component declares.
//!
//! A [`Template`] lists a component's attributes, simple child elements, text
//! and nested components in output order. The XML, HTML and Text renderers all
//! walk the same template, so the three formats cannot drift apart.
//!
//! Leaves are labelled with dotted paths built from the component labels on the
//! way down (`geospatialCoverage.boundingBox.westBL`). Repeated siblings with the
//! same label get a 1-based `[n]` suffix when more than one is present. Empty
//! values are written to XML but omitted from the HTML and Text summaries.

use super::component::Component;
use crate::attributes::{SecurityAttributes, SrsAttributes};
use crate::version::{DdmsVersion, Namespace};
use crate::xml::{Element, QName};
use quick_xml::escape::escape;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    version: DdmsVersion,
    name: QName,
    label: String,
    entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Attribute {
        name: QName,
        label: String,
        value: String,
    },
    Element {
        name: QName,
        label: String,
        value: String,
    },
    /// Text content, labelled with the enclosing component's path.
    Text(String),
    Child {
        label: String,
        template: Template,
    },
    /// A structural element that contributes nothing to labels.
    Wrapper(Template),
}

impl Template {
    /// Starts a template for the element `namespace:name`, labelled with `name`
    /// (first letter lowercased).
    pub fn new(version: DdmsVersion, namespace: Namespace, name: &str) -> Self {
        Self {
            version,
            name: version.qname(namespace, name),
            label: lower_first(name),
            entries: Vec::new(),
        }
    }

    pub fn labelled(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    // --- Declaration ---

    pub fn attribute(mut self, namespace: Namespace, name: &str, value: impl ToString) -> Self {
        self.entries.push(Entry::Attribute {
            name: self.version.qname(namespace, name),
            label: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn optional_attribute<T: ToString>(
        self,
        namespace: Namespace,
        name: &str,
        value: Option<T>,
    ) -> Self {
        match value {
            Some(value) => self.attribute(namespace, name, value),
            None => self,
        }
    }

    /// An attribute in no namespace.
    pub fn plain_attribute<T: ToString>(mut self, name: &str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.entries.push(Entry::Attribute {
                name: QName::local(name),
                label: name.to_string(),
                value: value.to_string(),
            });
        }
        self
    }

    /// An optional attribute whose summary label differs from its local name,
    /// for attributes that share a local name across namespaces.
    pub fn labelled_attribute<T: ToString>(
        mut self,
        namespace: Namespace,
        name: &str,
        label: &str,
        value: Option<T>,
    ) -> Self {
        if let Some(value) = value {
            self.entries.push(Entry::Attribute {
                name: self.version.qname(namespace, name),
                label: label.to_string(),
                value: value.to_string(),
            });
        }
        self
    }

    /// A child element holding only text.
    pub fn element(mut self, namespace: Namespace, name: &str, value: impl ToString) -> Self {
        self.entries.push(Entry::Element {
            name: self.version.qname(namespace, name),
            label: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn optional_element<T: ToString>(
        self,
        namespace: Namespace,
        name: &str,
        value: Option<T>,
    ) -> Self {
        match value {
            Some(value) => self.element(namespace, name, value),
            None => self,
        }
    }

    /// Repeated text-only child elements, indexed in labels when more than one.
    pub fn elements<T: ToString>(mut self, namespace: Namespace, name: &str, values: &[T]) -> Self {
        let indexed = values.len() > 1;
        for (i, value) in values.iter().enumerate() {
            let label = if indexed {
                format!("{}[{}]", name, i + 1)
            } else {
                name.to_string()
            };
            self.entries.push(Entry::Element {
                name: self.version.qname(namespace, name),
                label,
                value: value.to_string(),
            });
        }
        self
    }

    pub fn text(mut self, value: impl ToString) -> Self {
        self.entries.push(Entry::Text(value.to_string()));
        self
    }

    pub fn child<C: Component>(self, child: &C) -> Self {
        self.children(std::iter::once(child))
    }

    pub fn optional_child<C: Component>(self, child: Option<&C>) -> Self {
        self.children(child)
    }

    /// Nested components, indexed per label when a label repeats.
    pub fn children<'a, C, I>(mut self, children: I) -> Self
    where
        C: Component + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        let templates: Vec<Template> = children.into_iter().map(Component::template).collect();
        let mut totals: HashMap<String, usize> = HashMap::new();
        for template in &templates {
            *totals.entry(template.label.clone()).or_default() += 1;
        }
        let mut seen: HashMap<String, usize> = HashMap::new();
        for template in templates {
            let label = if totals.get(&template.label).copied().unwrap_or_default() > 1 {
                let n = seen.entry(template.label.clone()).or_default();
                *n += 1;
                format!("{}[{}]", template.label, n)
            } else {
                template.label.clone()
            };
            self.entries.push(Entry::Child { label, template });
        }
        self
    }

    /// A structural wrapper element (`ddms:Subject`, `gml:exterior`) whose
    /// content is declared by `build`. Wrappers do not appear in labels.
    pub fn wrapper(
        mut self,
        namespace: Namespace,
        name: &str,
        build: impl FnOnce(Template) -> Template,
    ) -> Self {
        let inner = build(Template::new(self.version, namespace, name));
        self.entries.push(Entry::Wrapper(inner));
        self
    }

    pub fn security(self, attributes: &SecurityAttributes) -> Self {
        attributes.render(self)
    }

    pub fn srs(self, attributes: &SrsAttributes) -> Self {
        attributes.render(self)
    }

    // --- Rendering ---

    pub fn to_element(&self) -> Element {
        let mut element = Element::new(self.name.clone());
        for entry in &self.entries {
            match entry {
                Entry::Attribute { name, value, .. } => {
                    element.push_attribute(name.clone(), value.clone())
                }
                Entry::Element { name, value, .. } => {
                    let mut child = Element::new(name.clone());
                    if !value.is_empty() {
                        child.text = Some(value.clone());
                    }
                    element.push_child(child);
                }
                Entry::Text(value) => {
                    if !value.is_empty() {
                        element.text = Some(value.clone());
                    }
                }
                Entry::Child { template, .. } | Entry::Wrapper(template) => {
                    element.push_child(template.to_element())
                }
            }
        }
        element
    }

    /// The non-empty `(label, value)` leaves in template order. Line breaks and
    /// tabs inside a value are folded into single spaces.
    pub fn leaves(&self) -> Vec<(String, String)> {
        let mut leaves = Vec::new();
        self.collect(&self.label, &mut leaves);
        leaves
    }

    fn collect(&self, path: &str, leaves: &mut Vec<(String, String)>) {
        for entry in &self.entries {
            match entry {
                Entry::Attribute { label, value, .. } | Entry::Element { label, value, .. } => {
                    let value = single_line(value);
                    if !value.is_empty() {
                        leaves.push((format!("{}.{}", path, label), value));
                    }
                }
                Entry::Text(value) => {
                    let value = single_line(value);
                    if !value.is_empty() {
                        leaves.push((path.to_string(), value));
                    }
                }
                Entry::Child { label, template } => {
                    template.collect(&format!("{}.{}", path, label), leaves)
                }
                Entry::Wrapper(template) => template.collect(path, leaves),
            }
        }
    }

    /// One `<meta>` tag per leaf.
    pub fn to_html(&self) -> String {
        self.leaves()
            .iter()
            .map(|(label, value)| {
                format!(
                    "<meta name=\"{}\" content=\"{}\" />\n",
                    escape(label.as_str()),
                    escape(value.as_str())
                )
            })
            .collect()
    }

    /// One `label: value` line per leaf.
    pub fn to_text(&self) -> String {
        self.leaves()
            .iter()
            .map(|(label, value)| format!("{}: {}\n", label, value))
            .collect()
    }
}

fn single_line(value: &str) -> String {
    if !value.contains(['\n', '\r', '\t']) {
        return value.to_string();
    }
    value
        .split(['\n', '\r', '\t'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// crates/ddms-rs/src/xml/writer.rs

//! Serializes an [`Element`] tree with `quick-xml`'s event writer.

use super::{Element, QName};
use crate::config::RenderOptions;
use crate::error::XmlError;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Writes `element` as an XML fragment (no declaration).
///
/// Namespace declarations are emitted on the first element that needs a binding
/// not already in scope, so fragments taken from the middle of a tree are
/// self-contained.
pub fn write(element: &Element, options: &RenderOptions) -> Result<String, XmlError> {
    let mut writer = if options.pretty {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    };
    write_element(&mut writer, element, &BTreeMap::new())?;
    String::from_utf8(writer.into_inner()).map_err(writing)
}

/// `scope` maps prefixes ("" for the default namespace) to bound URIs.
fn write_element(
    writer: &mut Writer<Vec<u8>>,
    element: &Element,
    scope: &BTreeMap<String, String>,
) -> Result<(), XmlError> {
    let mut scope = scope.clone();
    let mut declarations: Vec<(String, String)> = Vec::new();

    bind(&element.name, true, &mut scope, &mut declarations);
    for attribute in &element.attributes {
        bind(&attribute.name, false, &mut scope, &mut declarations);
    }

    let name = element.name.lexical();
    let mut start = BytesStart::new(name.as_str());
    for (prefix, uri) in &declarations {
        let key = if prefix.is_empty() {
            "xmlns".to_string()
        } else {
            format!("xmlns:{}", prefix)
        };
        start.push_attribute((key.as_str(), uri.as_str()));
    }
    for attribute in &element.attributes {
        let key = attribute.name.lexical();
        start.push_attribute((key.as_str(), attribute.value.as_str()));
    }

    let text = element.text.as_deref().filter(|t| !t.is_empty());
    if element.children.is_empty() && text.is_none() {
        return writer.write_event(Event::Empty(start)).map_err(writing);
    }

    writer.write_event(Event::Start(start)).map_err(writing)?;
    if let Some(text) = text {
        writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(writing)?;
    }
    for child in &element.children {
        write_element(writer, child, &scope)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(name.as_str())))
        .map_err(writing)
}

/// Records a declaration when `name`'s prefix is not yet bound to its namespace.
///
/// Unprefixed attributes never take the default namespace, so they need no binding.
fn bind(
    name: &QName,
    is_element: bool,
    scope: &mut BTreeMap<String, String>,
    declarations: &mut Vec<(String, String)>,
) {
    let Some(uri) = name.namespace.as_deref() else {
        return;
    };
    let prefix = name.prefix.clone().unwrap_or_default();
    if prefix.is_empty() && !is_element {
        return;
    }
    if scope.get(&prefix).map(String::as_str) != Some(uri) {
        scope.insert(prefix.clone(), uri.to_string());
        declarations.push((prefix, uri.to_string()));
    }
}

fn writing(e: impl Display) -> XmlError {
    XmlError::Writing(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DDMS: &str = "urn:us:mil:ces:metadata:ddms:4";
    const ISM: &str = "urn:us:gov:ic:ism";

    fn title() -> Element {
        Element::new(QName::qualified(DDMS, "ddms", "title"))
            .with_attribute(QName::qualified(ISM, "ISM", "classification"), "U")
            .with_text("Fish & Chips")
    }

    #[test]
    fn test_write_declares_namespaces_once() {
        let element = Element::new(QName::qualified(DDMS, "ddms", "resource")).with_child(title());
        let xml = write(&element, &RenderOptions::default()).unwrap();
        assert_eq!(
            xml,
            "<ddms:resource xmlns:ddms=\"urn:us:mil:ces:metadata:ddms:4\">\
<ddms:title xmlns:ISM=\"urn:us:gov:ic:ism\" ISM:classification=\"U\">Fish &amp; Chips</ddms:title>\
</ddms:resource>"
        );
    }

    #[test]
    fn test_write_empty_element_and_unqualified_attribute() {
        let element = Element::new(QName::qualified(DDMS, "ddms", "keyword"))
            .with_attribute(QName::local("note"), "a\"b");
        let xml = write(&element, &RenderOptions::default()).unwrap();
        assert_eq!(
            xml,
            "<ddms:keyword xmlns:ddms=\"urn:us:mil:ces:metadata:ddms:4\" note=\"a&quot;b\"/>"
        );
    }

    #[test]
    fn test_pretty_printing_only_changes_whitespace() {
        let element = Element::new(QName::qualified(DDMS, "ddms", "resource"))
            .with_child(title())
            .with_child(title());
        let compact = write(&element, &RenderOptions::default()).unwrap();
        let pretty = write(&element, &RenderOptions::pretty()).unwrap();
        assert!(pretty.contains('\n'));
        assert_ne!(compact, pretty);
        let reparsed_compact = Element::parse(&compact).unwrap();
        let reparsed_pretty = Element::parse(&pretty).unwrap();
        assert_eq!(reparsed_compact, reparsed_pretty);
    }

    #[test]
    fn test_write_then_parse_preserves_tree() {
        let element = Element::new(QName::qualified(DDMS, "ddms", "resource")).with_child(title());
        let xml = write(&element, &RenderOptions::default()).unwrap();
        assert_eq!(Element::parse(&xml).unwrap(), element);
    }
}

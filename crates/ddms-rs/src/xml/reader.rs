// crates/ddms-rs/src/xml/reader.rs

//! Builds an [`Element`] tree from text using `quick-xml`'s namespace-resolving reader.

use super::{Element, QName};
use crate::error::XmlError;
use log::trace;
use quick_xml::NsReader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};
use quick_xml::name::ResolveResult;
use std::fmt::Display;

/// Parses `xml` and returns the root element.
///
/// Text is accumulated per element (entity and character references resolved,
/// CDATA included) and trimmed once the element closes. Comments, processing
/// instructions and the XML declaration are skipped.
pub(super) fn parse(xml: &str) -> Result<Element, XmlError> {
    let mut reader = NsReader::from_str(xml);
    // Open elements with their pending text.
    let mut stack: Vec<(Element, String)> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => {
                let element = open_element(&reader, &start)?;
                stack.push((element, String::new()));
            }
            Event::Empty(start) => {
                let element = open_element(&reader, &start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let (mut element, text) = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unexpected closing tag".to_string()))?;
                let text = text.trim();
                if !text.is_empty() {
                    element.text = Some(text.to_string());
                }
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some((_, buffer)) = stack.last_mut() {
                    buffer.push_str(&text.decode().map_err(malformed)?);
                }
            }
            Event::CData(data) => {
                if let Some((_, buffer)) = stack.last_mut() {
                    buffer.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::GeneralRef(reference) => {
                if let Some((_, buffer)) = stack.last_mut() {
                    buffer.push_str(&resolve_reference(&reference)?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::Malformed("unexpected end of document".to_string()));
    }
    let root = root.ok_or(XmlError::MissingRoot)?;
    trace!("Parsed XML element tree rooted at {}", root.name.lexical());
    Ok(root)
}

fn open_element(reader: &NsReader<&[u8]>, start: &BytesStart) -> Result<Element, XmlError> {
    let (resolved, local) = reader.resolve_element(start.name());
    let mut element = Element::new(QName {
        namespace: namespace_of(resolved)?,
        prefix: start
            .name()
            .prefix()
            .map(|p| decode(p.as_ref()))
            .transpose()?,
        local: decode(local.as_ref())?,
    });

    for attribute in start.attributes() {
        let attribute = attribute.map_err(malformed)?;
        // xmlns declarations are consumed by the reader's resolver.
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        let (resolved, local) = reader.resolve_attribute(attribute.key);
        let name = QName {
            namespace: namespace_of(resolved)?,
            prefix: attribute
                .key
                .prefix()
                .map(|p| decode(p.as_ref()))
                .transpose()?,
            local: decode(local.as_ref())?,
        };
        let value = attribute
            .decode_and_unescape_value(reader.decoder())
            .map_err(malformed)?;
        element.push_attribute(name, value.into_owned());
    }
    Ok(element)
}

fn attach(
    stack: &mut [(Element, String)],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some((parent, _)) => parent.push_child(element),
        None if root.is_some() => {
            return Err(XmlError::Malformed(
                "document has more than one root element".to_string(),
            ));
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn namespace_of(resolved: ResolveResult) -> Result<Option<String>, XmlError> {
    match resolved {
        ResolveResult::Bound(namespace) => Ok(Some(decode(namespace.as_ref())?)),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(XmlError::Malformed(format!(
            "unbound namespace prefix '{}'",
            String::from_utf8_lossy(&prefix)
        ))),
    }
}

fn resolve_reference(reference: &BytesRef) -> Result<String, XmlError> {
    if let Some(ch) = reference.resolve_char_ref().map_err(malformed)? {
        return Ok(ch.to_string());
    }
    let name = reference.decode().map_err(malformed)?;
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| XmlError::Malformed(format!("unknown entity reference '&{};'", name)))
}

fn decode(bytes: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(malformed)
}

fn malformed(e: impl Display) -> XmlError {
    XmlError::Malformed(e.to_string())
}

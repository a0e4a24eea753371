// crates/ddms-rs/src/engine/source.rs

//! Field extraction for the parse path.

use super::component::Component;
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

/// An element opened for extraction under one revision.
///
/// Lookups resolve names through the revision's namespace table. Child
/// components are parsed with their failures re-rooted under this element's
/// locator, and coercion failures become [`ValidationError`]s.
pub(crate) struct Source<'a> {
    version: DdmsVersion,
    element: &'a Element,
    locator: String,
}

impl<'a> Source<'a> {
    /// Checks that `element` is `namespace:name` in `version`.
    pub(crate) fn open(
        version: DdmsVersion,
        element: &'a Element,
        namespace: Namespace,
        name: &str,
    ) -> Result<Self, ValidationError> {
        let locator = version.qualified(namespace, name);
        let expected = version.namespace_uri(namespace);
        if expected.is_none() || !element.name.matches(expected, name) {
            return Err(ValidationError::new(
                locator,
                format!(
                    "Unexpected element {} in namespace {}.",
                    element.name.local,
                    element.name.namespace.as_deref().unwrap_or("(none)")
                ),
            ));
        }
        Ok(Self {
            version,
            element,
            locator,
        })
    }

    pub(crate) fn element(&self) -> &'a Element {
        self.element
    }

    fn fail(&self, message: impl Into<String>) -> ValidationError {
        ValidationError::new(self.locator.clone(), message)
    }

    // --- Attributes and text ---

    pub(crate) fn attr(&self, namespace: Namespace, local: &str) -> Option<String> {
        let uri = self.version.namespace_uri(namespace)?;
        self.element.attribute(Some(uri), local).map(str::to_string)
    }

    /// An attribute in no namespace.
    pub(crate) fn plain_attr(&self, local: &str) -> Option<String> {
        self.element.attribute(None, local).map(str::to_string)
    }

    pub(crate) fn text(&self) -> String {
        self.element.text().to_string()
    }

    // --- Children ---

    pub(crate) fn child(&self, namespace: Namespace, local: &str) -> Option<&'a Element> {
        let uri = self.version.namespace_uri(namespace)?;
        self.element.child(uri, local)
    }

    pub(crate) fn children(&self, namespace: Namespace, local: &str) -> Vec<&'a Element> {
        match self.version.namespace_uri(namespace) {
            Some(uri) => self.element.children_named(uri, local).collect(),
            None => Vec::new(),
        }
    }

    pub(crate) fn child_text(&self, namespace: Namespace, local: &str) -> Option<String> {
        self.child(namespace, local).map(|e| e.text().to_string())
    }

    pub(crate) fn child_texts(&self, namespace: Namespace, local: &str) -> Vec<String> {
        self.children(namespace, local)
            .into_iter()
            .map(|e| e.text().to_string())
            .collect()
    }

    /// Opens a required structural child such as `ddms:Subject`.
    pub(crate) fn wrapper(&self, namespace: Namespace, local: &str) -> Result<Source<'a>, ValidationError> {
        let qualified = self.version.qualified(namespace, local);
        let element = self
            .child(namespace, local)
            .ok_or_else(|| self.fail(format!("{} is required.", qualified)))?;
        Ok(Source {
            version: self.version,
            element,
            locator: format!("{}/{}", self.locator, qualified),
        })
    }

    // --- Child components ---

    pub(crate) fn parse<C: Component>(&self, element: &Element) -> Result<C, ValidationError> {
        C::from_element(self.version, element).map_err(|e| e.within(&self.locator))
    }

    /// The first `namespace:local` child, parsed as `C`.
    pub(crate) fn component<C: Component>(
        &self,
        namespace: Namespace,
        local: &str,
    ) -> Result<Option<C>, ValidationError> {
        self.child(namespace, local)
            .map(|e| self.parse(e))
            .transpose()
    }

    pub(crate) fn components<C: Component>(
        &self,
        namespace: Namespace,
        local: &str,
    ) -> Result<Vec<C>, ValidationError> {
        self.children(namespace, local)
            .into_iter()
            .map(|e| self.parse(e))
            .collect()
    }

    // --- Coercion ---

    pub(crate) fn number(&self, raw: Option<String>, field: &str) -> Result<Option<f64>, ValidationError> {
        raw.map(|raw| {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| self.fail(format!("The {} value, \"{}\", is not a valid number.", field, raw)))
        })
        .transpose()
    }

    pub(crate) fn integer(&self, raw: Option<String>, field: &str) -> Result<Option<i64>, ValidationError> {
        raw.map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| self.fail(format!("The {} value, \"{}\", is not a valid integer.", field, raw)))
        })
        .transpose()
    }

    /// Accepts the xs:boolean lexical forms `true`, `false`, `1` and `0`.
    pub(crate) fn boolean(&self, raw: Option<String>, field: &str) -> Result<Option<bool>, ValidationError> {
        raw.map(|raw| match raw.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(self.fail(format!("The {} value, \"{}\", is not a valid boolean.", field, raw))),
        })
        .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::QName;

    const DDMS_3_1: &str = "http://metadata.dod.mil/mdr/ns/DDMS/3.1/";

    fn element() -> Element {
        Element::new(QName::qualified(DDMS_3_1, "ddms", "boundingBox"))
            .with_child(Element::new(QName::qualified(DDMS_3_1, "ddms", "WestBL")).with_text("12.5"))
            .with_child(Element::new(QName::qualified(DDMS_3_1, "ddms", "EastBL")).with_text("east"))
    }

    #[test]
    fn test_open_checks_name_and_namespace() {
        let element = element();
        assert!(Source::open(DdmsVersion::V3_1, &element, Namespace::Ddms, "boundingBox").is_ok());

        let err = Source::open(DdmsVersion::V4_1, &element, Namespace::Ddms, "boundingBox")
            .err()
            .unwrap();
        assert!(err.message().starts_with("Unexpected element"));
        assert_eq!(err.locator(), "ddms:boundingBox");

        assert!(Source::open(DdmsVersion::V3_1, &element, Namespace::Ddms, "dates").is_err());
    }

    #[test]
    fn test_coercion() {
        let element = element();
        let source = Source::open(DdmsVersion::V3_1, &element, Namespace::Ddms, "boundingBox").unwrap();
        let west = source.number(source.child_text(Namespace::Ddms, "WestBL"), "WestBL");
        assert_eq!(west, Ok(Some(12.5)));

        let east = source.number(source.child_text(Namespace::Ddms, "EastBL"), "EastBL");
        let err = east.unwrap_err();
        assert_eq!(err.message(), "The EastBL value, \"east\", is not a valid number.");

        assert_eq!(source.number(None, "SouthBL"), Ok(None));
        assert_eq!(source.boolean(Some("1".to_string()), "flag"), Ok(Some(true)));
        assert!(source.boolean(Some("yes".to_string()), "flag").is_err());
        assert_eq!(source.integer(Some(" 7 ".to_string()), "order"), Ok(Some(7)));
    }

    #[test]
    fn test_missing_wrapper() {
        let element = element();
        let source = Source::open(DdmsVersion::V3_1, &element, Namespace::Ddms, "boundingBox").unwrap();
        let err = source.wrapper(Namespace::Ddms, "Subject").err().unwrap();
        assert_eq!(err.message(), "ddms:Subject is required.");
    }

    #[test]
    fn test_children_outlive_the_name() {
        let element = element();
        let source = Source::open(DdmsVersion::V3_1, &element, Namespace::Ddms, "boundingBox").unwrap();
        let found = {
            let local = format!("{}BL", "West");
            source.children(Namespace::Ddms, &local)
        };
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text(), "12.5");
        assert!(source.children(Namespace::Gml, "WestBL").is_empty());
    }
}

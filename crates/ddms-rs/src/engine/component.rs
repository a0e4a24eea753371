// crates/ddms-rs/src/engine/component.rs

use super::template::Template;
use super::validation::ValidationWarning;
use crate::config::RenderOptions;
use crate::error::{DdmsError, ValidationError, XmlError};
use crate::version::{DdmsVersion, Namespace};
use crate::xml::{self, Element};
use std::fmt::Debug;
use std::hash::Hash;

/// The contract shared by every DDMS component.
///
/// Implementors provide the parse path ([`Component::from_element`]), the
/// revision they were validated under, their warnings and their output
/// [`Template`]. Value-path constructors are inherent `new` functions on each
/// type; both paths end in the same private validation routine.
///
/// Components are immutable. Equality and hashing are structural and include
/// the version, so components validated under different revisions never
/// compare equal.
pub trait Component: Clone + Debug + PartialEq + Eq + Hash + Send + Sync {
    /// Builds the component from a parsed element, validating it under `version`.
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError>;

    fn version(&self) -> DdmsVersion;

    /// Local element name in this component's revision.
    fn name(&self) -> &'static str;

    fn namespace(&self) -> Namespace {
        Namespace::Ddms
    }

    fn warnings(&self) -> &[ValidationWarning];

    fn template(&self) -> Template;

    /// `prefix:name`, as used in locators.
    fn qualified_name(&self) -> String {
        self.version().qualified(self.namespace(), self.name())
    }

    /// Parses `xml` and builds the component from its root element.
    fn from_xml(version: DdmsVersion, xml: &str) -> Result<Self, DdmsError> {
        let element = Element::parse(xml)?;
        Ok(Self::from_element(version, &element)?)
    }

    fn to_element(&self) -> Element {
        self.template().to_element()
    }

    fn to_xml(&self) -> Result<String, XmlError> {
        self.to_xml_with(&RenderOptions::default())
    }

    fn to_xml_with(&self, options: &RenderOptions) -> Result<String, XmlError> {
        xml::write(&self.to_element(), options)
    }

    fn to_html(&self) -> String {
        self.template().to_html()
    }

    fn to_text(&self) -> String {
        self.template().to_text()
    }
}

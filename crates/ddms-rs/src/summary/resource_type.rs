// crates/ddms-rs/src/summary/resource_type.rs

use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

const NAME: &str = "type";

/// The nature, genre or discipline of the resource (`ddms:type`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceType {
    version: DdmsVersion,
    qualifier: Option<String>,
    value: Option<String>,
    description: String,
    warnings: Warnings,
}

impl ResourceType {
    /// A non-empty `description` needs DDMS 4.1.
    pub fn new(
        version: DdmsVersion,
        qualifier: Option<&str>,
        value: Option<&str>,
        description: &str,
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            qualifier.map(str::to_string),
            value.map(str::to_string),
            description.to_string(),
        )
    }

    fn validated(
        version: DdmsVersion,
        qualifier: Option<String>,
        value: Option<String>,
        description: String,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, NAME);
        let has_qualifier = qualifier.as_deref().is_some_and(|q| !q.is_empty());
        let has_value = value.as_deref().is_some_and(|q| !q.is_empty());
        if has_value && !has_qualifier {
            return Err(v.fail("A qualifier attribute must be set if a value attribute is set."));
        }
        if !description.is_empty() {
            v.require_since(DdmsVersion::V4_1, "definition of a type")?;
        }
        if !has_qualifier && !has_value && description.is_empty() {
            v.warn("A ddms:type element was found with no qualifier, value or description.");
        }
        Ok(Self {
            version,
            qualifier,
            value,
            description,
            warnings: v.finish(),
        })
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Component for ResourceType {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, NAME)?;
        Self::validated(
            version,
            source.attr(Namespace::Ddms, "qualifier"),
            source.attr(Namespace::Ddms, "value"),
            source.text(),
        )
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        Template::new(self.version, Namespace::Ddms, NAME)
            .text(&self.description)
            .optional_attribute(Namespace::Ddms, "qualifier", self.qualifier.as_ref())
            .optional_attribute(Namespace::Ddms, "value", self.value.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceTypeBuilder {
    pub qualifier: Option<String>,
    pub value: Option<String>,
    pub description: Option<String>,
}

impl From<&ResourceType> for ResourceTypeBuilder {
    fn from(resource_type: &ResourceType) -> Self {
        Self {
            qualifier: resource_type.qualifier.clone(),
            value: resource_type.value.clone(),
            description: Some(resource_type.description.clone()),
        }
    }
}

impl Builder for ResourceTypeBuilder {
    type Target = ResourceType;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<ResourceType>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        ResourceType::validated(
            version,
            self.qualifier.clone(),
            self.value.clone(),
            self.description.clone().unwrap_or_default(),
        )
        .map(Some)
    }
}

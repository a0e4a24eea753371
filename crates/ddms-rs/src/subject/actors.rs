// crates/ddms-rs/src/subject/actors.rs

//! Subject components introduced in DDMS 4.0.1.

use crate::attributes::SecurityAttributes;
use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

/// A metric used to measure production, tied to a subject and a coverage area.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductionMetric {
    version: DdmsVersion,
    subject: String,
    coverage: String,
    warnings: Warnings,
}

impl ProductionMetric {
    pub fn new(version: DdmsVersion, subject: &str, coverage: &str) -> Result<Self, ValidationError> {
        Self::validated(version, subject.to_string(), coverage.to_string())
    }

    fn validated(version: DdmsVersion, subject: String, coverage: String) -> Result<Self, ValidationError> {
        let v = Validator::new(version, Namespace::Ddms, "productionMetric");
        v.require_text(&subject, "subject attribute")?;
        v.require_text(&coverage, "coverage attribute")?;
        v.require_since(DdmsVersion::V4_0_1, "productionMetric element")?;
        Ok(Self {
            version,
            subject,
            coverage,
            warnings: v.finish(),
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn coverage(&self) -> &str {
        &self.coverage
    }
}

impl Component for ProductionMetric {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, "productionMetric")?;
        Self::validated(
            version,
            source.attr(Namespace::Ddms, "subject").unwrap_or_default(),
            source.attr(Namespace::Ddms, "coverage").unwrap_or_default(),
        )
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        "productionMetric"
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        Template::new(self.version, Namespace::Ddms, "productionMetric")
            .attribute(Namespace::Ddms, "subject", &self.subject)
            .attribute(Namespace::Ddms, "coverage", &self.coverage)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductionMetricBuilder {
    pub subject: Option<String>,
    pub coverage: Option<String>,
}

impl From<&ProductionMetric> for ProductionMetricBuilder {
    fn from(metric: &ProductionMetric) -> Self {
        Self {
            subject: Some(metric.subject.clone()),
            coverage: Some(metric.coverage.clone()),
        }
    }
}

impl Builder for ProductionMetricBuilder {
    type Target = ProductionMetric;

    fn is_empty(&self) -> bool {
        self.subject.is_none() && self.coverage.is_none()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<ProductionMetric>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        ProductionMetric::validated(
            version,
            self.subject.clone().unwrap_or_default(),
            self.coverage.clone().unwrap_or_default(),
        )
        .map(Some)
    }
}

/// A non-state actor relevant to the subject.
///
/// `qualifier` needs DDMS 4.1. An empty actor is kept with a warning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonStateActor {
    version: DdmsVersion,
    value: String,
    order: Option<i64>,
    qualifier: Option<String>,
    security: SecurityAttributes,
    warnings: Warnings,
}

impl NonStateActor {
    pub fn new(
        version: DdmsVersion,
        value: &str,
        order: Option<i64>,
        qualifier: Option<&str>,
        security: SecurityAttributes,
    ) -> Result<Self, ValidationError> {
        Self::validated(version, value.to_string(), order, qualifier.map(str::to_string), security)
    }

    fn validated(
        version: DdmsVersion,
        value: String,
        order: Option<i64>,
        qualifier: Option<String>,
        security: SecurityAttributes,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, "nonStateActor");
        security.validate(&v)?;
        v.require_since(DdmsVersion::V4_0_1, "nonStateActor element")?;
        if qualifier.is_some() {
            v.require_since(DdmsVersion::V4_1, "qualifier attribute")?;
        }
        if value.trim().is_empty() {
            v.warn("A ddms:nonStateActor element was found with no value.");
        }
        Ok(Self {
            version,
            value,
            order,
            qualifier,
            security,
            warnings: v.finish(),
        })
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn order(&self) -> Option<i64> {
        self.order
    }

    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }

    pub fn security_attributes(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl Component for NonStateActor {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, "nonStateActor")?;
        Self::validated(
            version,
            source.text(),
            source.integer(source.attr(Namespace::Ddms, "order"), "order")?,
            source.attr(Namespace::Ddms, "qualifier"),
            SecurityAttributes::from_source(&source),
        )
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        "nonStateActor"
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        Template::new(self.version, Namespace::Ddms, "nonStateActor")
            .text(&self.value)
            .optional_attribute(Namespace::Ddms, "order", self.order)
            .optional_attribute(Namespace::Ddms, "qualifier", self.qualifier.as_ref())
            .security(&self.security)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NonStateActorBuilder {
    pub value: Option<String>,
    pub order: Option<i64>,
    pub qualifier: Option<String>,
    pub security: SecurityAttributes,
}

impl From<&NonStateActor> for NonStateActorBuilder {
    fn from(actor: &NonStateActor) -> Self {
        Self {
            value: Some(actor.value.clone()),
            order: actor.order,
            qualifier: actor.qualifier.clone(),
            security: actor.security.clone(),
        }
    }
}

impl Builder for NonStateActorBuilder {
    type Target = NonStateActor;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<NonStateActor>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        NonStateActor::validated(
            version,
            self.value.clone().unwrap_or_default(),
            self.order,
            self.qualifier.clone(),
            self.security.clone(),
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_metric_is_version_gated() {
        for version in [DdmsVersion::V2_0, DdmsVersion::V3_0, DdmsVersion::V3_1] {
            let err = ProductionMetric::new(version, "FOOD", "AFG").unwrap_err();
            assert_eq!(
                err.message(),
                "The productionMetric element cannot be used until DDMS 4.0.1 or later."
            );
        }
        for version in [DdmsVersion::V4_0_1, DdmsVersion::V4_1] {
            assert!(ProductionMetric::new(version, "FOOD", "AFG").is_ok());
        }
    }

    #[test]
    fn test_non_state_actor() {
        let actor = NonStateActor::new(
            DdmsVersion::V4_1,
            "Laotian Monks",
            Some(1),
            Some("urn:sample"),
            SecurityAttributes::new("U", &["USA"]),
        )
        .unwrap();
        assert_eq!(
            actor.to_text(),
            "nonStateActor: Laotian Monks\n\
             nonStateActor.order: 1\n\
             nonStateActor.qualifier: urn:sample\n\
             nonStateActor.classification: U\n\
             nonStateActor.ownerProducer: USA\n"
        );

        let err = NonStateActor::new(DdmsVersion::V4_0_1, "Monks", None, Some("urn:sample"), SecurityAttributes::default())
            .unwrap_err();
        assert_eq!(
            err.message(),
            "The qualifier attribute cannot be used until DDMS 4.1 or later."
        );
    }

    #[test]
    fn test_empty_actor_warns() {
        let actor = NonStateActor::new(DdmsVersion::V4_0_1, "", None, None, SecurityAttributes::default()).unwrap();
        assert_eq!(actor.warnings().len(), 1);
        assert_eq!(actor.warnings()[0].locator(), "ddms:nonStateActor");
    }

    #[test]
    fn test_bad_order() {
        let xml = r#"<ddms:nonStateActor xmlns:ddms="urn:us:mil:ces:metadata:ddms:4" ddms:order="first">Monks</ddms:nonStateActor>"#;
        let err = NonStateActor::from_xml(DdmsVersion::V4_1, xml).unwrap_err();
        assert!(err.to_string().contains("is not a valid integer"));
    }
}

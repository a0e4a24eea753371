// crates/ddms-rs/src/security.rs

use crate::attributes::SecurityAttributes;
use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Feature, Namespace};
use crate::xml::Element;

const NAME: &str = "security";
const EXCLUDE_FROM_ROLLUP: &str = "excludeFromRollup";

/// The overall security marking of the resource.
///
/// From DDMS 3.0 the element also carries `ISM:excludeFromRollup="true"`;
/// the value-path constructor adds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Security {
    version: DdmsVersion,
    security: SecurityAttributes,
    warnings: Warnings,
}

impl Security {
    pub fn new(version: DdmsVersion, security: SecurityAttributes) -> Result<Self, ValidationError> {
        let exclude = version
            .has(Feature::ExcludeFromRollup)
            .then(|| "true".to_string());
        Self::validated(version, exclude, security)
    }

    fn validated(
        version: DdmsVersion,
        exclude_from_rollup: Option<String>,
        security: SecurityAttributes,
    ) -> Result<Self, ValidationError> {
        let v = Validator::new(version, Namespace::Ddms, NAME);
        security.require_marking(&v)?;
        if version.has(Feature::ExcludeFromRollup) {
            let exclude = v.require_some(exclude_from_rollup, "excludeFromRollup attribute")?;
            if exclude != "true" {
                return Err(v.fail(
                    "The excludeFromRollup attribute must have a fixed value of \"true\".",
                ));
            }
        } else if exclude_from_rollup.is_some() {
            v.require_since(DdmsVersion::V3_0, "excludeFromRollup attribute")?;
        }
        Ok(Self {
            version,
            security,
            warnings: v.finish(),
        })
    }

    pub fn security_attributes(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl Component for Security {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, NAME)?;
        Self::validated(
            version,
            source.attr(Namespace::Ism, EXCLUDE_FROM_ROLLUP),
            SecurityAttributes::from_source(&source),
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
        let exclude = self
            .version
            .has(Feature::ExcludeFromRollup)
            .then_some("true");
        Template::new(self.version, Namespace::Ddms, NAME)
            .optional_attribute(Namespace::Ism, EXCLUDE_FROM_ROLLUP, exclude)
            .security(&self.security)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecurityBuilder {
    pub security: SecurityAttributes,
}

impl From<&Security> for SecurityBuilder {
    fn from(security: &Security) -> Self {
        Self {
            security: security.security.clone(),
        }
    }
}

impl Builder for SecurityBuilder {
    type Target = Security;

    fn is_empty(&self) -> bool {
        self.security.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<Security>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        Security::new(version, self.security.clone()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marking() -> SecurityAttributes {
        SecurityAttributes::new("U", &["USA"])
    }

    #[test]
    fn test_exclude_from_rollup_by_version() {
        let xml = r#"<ddms:security xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/2.0/"
            xmlns:ICISM="urn:us:gov:ic:ism:v2"
            ICISM:classification="U" ICISM:ownerProducer="USA"/>"#;
        let security = Security::from_xml(DdmsVersion::V2_0, xml).unwrap();
        assert_eq!(security, Security::new(DdmsVersion::V2_0, marking()).unwrap());
        assert!(security.to_element().attribute(Some("urn:us:gov:ic:ism:v2"), "excludeFromRollup").is_none());

        let xml = r#"<ddms:security xmlns:ddms="urn:us:mil:ces:metadata:ddms:4" xmlns:ISM="urn:us:gov:ic:ism"
            ISM:classification="U" ISM:ownerProducer="USA"/>"#;
        let err = Security::from_xml(DdmsVersion::V4_1, xml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ddms:security: excludeFromRollup attribute is required."
        );

        let xml = r#"<ddms:security xmlns:ddms="urn:us:mil:ces:metadata:ddms:4" xmlns:ISM="urn:us:gov:ic:ism"
            ISM:excludeFromRollup="false" ISM:classification="U" ISM:ownerProducer="USA"/>"#;
        assert!(Security::from_xml(DdmsVersion::V4_1, xml).is_err());
    }

    #[test]
    fn test_value_path_adds_exclude_from_rollup() {
        let security = Security::new(DdmsVersion::V3_1, marking()).unwrap();
        assert_eq!(
            security.to_text(),
            "security.excludeFromRollup: true\nsecurity.classification: U\nsecurity.ownerProducer: USA\n"
        );
        let reparsed = Security::from_xml(DdmsVersion::V3_1, &security.to_xml().unwrap()).unwrap();
        assert_eq!(reparsed, security);
    }

    #[test]
    fn test_marking_required() {
        let err = Security::new(DdmsVersion::V4_1, SecurityAttributes::default()).unwrap_err();
        assert_eq!(err.message(), "classification is required.");
        let err = Security::new(DdmsVersion::V4_1, SecurityAttributes::new("U", &[])).unwrap_err();
        assert_eq!(err.message(), "At least 1 ownerProducer must exist.");
        assert_eq!(SecurityBuilder::default().commit(DdmsVersion::V4_1), Ok(None));
    }
}

// crates/ddms-rs/src/summary/rights.rs

use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

const NAME: &str = "rights";

/// Information about rights held in and over the resource. Unset flags read as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rights {
    version: DdmsVersion,
    privacy_act: bool,
    intellectual_property: bool,
    copyright: bool,
    warnings: Warnings,
}

impl Rights {
    pub fn new(
        version: DdmsVersion,
        privacy_act: bool,
        intellectual_property: bool,
        copyright: bool,
    ) -> Result<Self, ValidationError> {
        let v = Validator::new(version, Namespace::Ddms, NAME);
        Ok(Self {
            version,
            privacy_act,
            intellectual_property,
            copyright,
            warnings: v.finish(),
        })
    }

    pub fn privacy_act(&self) -> bool {
        self.privacy_act
    }

    pub fn intellectual_property(&self) -> bool {
        self.intellectual_property
    }

    pub fn copyright(&self) -> bool {
        self.copyright
    }
}

impl Component for Rights {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, NAME)?;
        let flag = |name: &str| {
            source
                .boolean(source.attr(Namespace::Ddms, name), name)
                .map(Option::unwrap_or_default)
        };
        Self::new(
            version,
            flag("privacyAct")?,
            flag("intellectualProperty")?,
            flag("copyright")?,
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
            .attribute(Namespace::Ddms, "privacyAct", self.privacy_act)
            .attribute(Namespace::Ddms, "intellectualProperty", self.intellectual_property)
            .attribute(Namespace::Ddms, "copyright", self.copyright)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RightsBuilder {
    pub privacy_act: Option<bool>,
    pub intellectual_property: Option<bool>,
    pub copyright: Option<bool>,
}

impl From<&Rights> for RightsBuilder {
    fn from(rights: &Rights) -> Self {
        Self {
            privacy_act: Some(rights.privacy_act),
            intellectual_property: Some(rights.intellectual_property),
            copyright: Some(rights.copyright),
        }
    }
}

impl Builder for RightsBuilder {
    type Target = Rights;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<Rights>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        Rights::new(
            version,
            self.privacy_act.unwrap_or_default(),
            self.intellectual_property.unwrap_or_default(),
            self.copyright.unwrap_or_default(),
        )
        .map(Some)
    }
}

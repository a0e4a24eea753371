// crates/ddms-rs/src/summary/text.rs

//! Title, subtitle and description: text content under ISM markings.

use crate::attributes::SecurityAttributes;
use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

/// Declares a marked-text component and its builder.
///
/// `required` decides whether empty text fails or only warns.
macro_rules! marked_text {
    ($(#[$doc:meta])* $component:ident, $builder:ident, $name:literal, required: $required:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $component {
            version: DdmsVersion,
            value: String,
            security: SecurityAttributes,
            warnings: Warnings,
        }

        impl $component {
            pub fn new(
                version: DdmsVersion,
                value: &str,
                security: SecurityAttributes,
            ) -> Result<Self, ValidationError> {
                Self::validated(version, value.to_string(), security)
            }

            fn validated(
                version: DdmsVersion,
                value: String,
                security: SecurityAttributes,
            ) -> Result<Self, ValidationError> {
                let mut v = Validator::new(version, Namespace::Ddms, $name);
                if $required {
                    v.require_text(&value, concat!($name, " value"))?;
                }
                security.require_marking(&v)?;
                if value.trim().is_empty() {
                    v.warn(format!(
                        "A {} element was found with no value.",
                        version.qualified(Namespace::Ddms, $name)
                    ));
                }
                Ok(Self {
                    version,
                    value,
                    security,
                    warnings: v.finish(),
                })
            }

            pub fn value(&self) -> &str {
                &self.value
            }

            pub fn security_attributes(&self) -> &SecurityAttributes {
                &self.security
            }
        }

        impl Component for $component {
            fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
                let source = Source::open(version, element, Namespace::Ddms, $name)?;
                Self::validated(version, source.text(), SecurityAttributes::from_source(&source))
            }

            fn version(&self) -> DdmsVersion {
                self.version
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn warnings(&self) -> &[ValidationWarning] {
                &self.warnings
            }

            fn template(&self) -> Template {
                Template::new(self.version, Namespace::Ddms, $name)
                    .text(&self.value)
                    .security(&self.security)
            }
        }

        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $builder {
            pub value: Option<String>,
            pub security: SecurityAttributes,
        }

        impl From<&$component> for $builder {
            fn from(component: &$component) -> Self {
                Self {
                    value: Some(component.value.clone()),
                    security: component.security.clone(),
                }
            }
        }

        impl Builder for $builder {
            type Target = $component;

            fn is_empty(&self) -> bool {
                self.value.is_none() && self.security.is_empty()
            }

            fn commit(&self, version: DdmsVersion) -> Result<Option<$component>, ValidationError> {
                if self.is_empty() {
                    return Ok(None);
                }
                $component::validated(
                    version,
                    self.value.clone().unwrap_or_default(),
                    self.security.clone(),
                )
                .map(Some)
            }
        }
    };
}

marked_text!(
    /// A name by which the resource is formally known.
    Title,
    TitleBuilder,
    "title",
    required: true
);

marked_text!(
    /// A secondary or subordinate title.
    Subtitle,
    SubtitleBuilder,
    "subtitle",
    required: false
);

marked_text!(
    /// An account of the content of the resource.
    Description,
    DescriptionBuilder,
    "description",
    required: false
);

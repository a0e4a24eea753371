// crates/ddms-rs/src/engine/declare.rs

//! Field tables for components whose content is a flat set of `ddms:`
//! attributes.
//!
//! One table row per attribute drives the struct, the value-path
//! constructor, the parse path, the template and the builder, so the three
//! paths cannot disagree on names or order.
//!
//! ```ignore
//! attribute_component!(
//!     /// A single keyword describing the subject.
//!     Keyword, KeywordBuilder, "keyword" {
//!         value: required "value",
//!     }
//! );
//! ```
//!
//! A `required` row is a `String` that must hold non-blank text; an
//! `optional` row is an `Option<String>`. `since:` gates the whole element on
//! a revision, and `check:` names a function run after the table rules with
//! the validator and a tuple holding a reference to every field, in table
//! order.

/// Expands one row kind of an [`attribute_component!`] table.
macro_rules! attribute_field {
    (ty required) => { String };
    (ty optional) => { Option<String> };

    (param required) => { &str };
    (param optional) => { Option<&str> };

    (getter required) => { &str };
    (getter optional) => { Option<&str> };

    (own required, $value:expr) => { $value.to_string() };
    (own optional, $value:expr) => { $value.map(str::to_string) };

    (get required, $value:expr) => { $value.as_str() };
    (get optional, $value:expr) => { $value.as_deref() };

    (parse required, $raw:expr) => { $raw.unwrap_or_default() };
    (parse optional, $raw:expr) => { $raw };

    (validate required, $v:expr, $value:expr, $xml:literal) => {
        $v.require_text(&$value, concat!($xml, " attribute"))?
    };
    (validate optional, $v:expr, $value:expr, $xml:literal) => {};

    (render required, $template:expr, $value:expr, $xml:literal) => {
        $template.attribute($crate::version::Namespace::Ddms, $xml, &$value)
    };
    (render optional, $template:expr, $value:expr, $xml:literal) => {
        $template.optional_attribute($crate::version::Namespace::Ddms, $xml, $value.as_ref())
    };

    (load required, $value:expr) => { Some($value.clone()) };
    (load optional, $value:expr) => { $value.clone() };

    (commit required, $value:expr) => { $value.clone().unwrap_or_default() };
    (commit optional, $value:expr) => { $value.clone() };
}

/// Declares an attribute-only component and its builder from a field table.
macro_rules! attribute_component {
    (
        $(#[$doc:meta])*
        $component:ident, $builder:ident, $name:literal {
            $($field:ident : $kind:ident $xml:literal),+ $(,)?
        }
        $(since: $since:expr,)?
        $(check: $check:path,)?
    ) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $component {
            version: $crate::version::DdmsVersion,
            $($field: $crate::engine::attribute_field!(ty $kind),)+
            warnings: $crate::engine::Warnings,
        }

        impl $component {
            pub fn new(
                version: $crate::version::DdmsVersion,
                $($field: $crate::engine::attribute_field!(param $kind),)+
            ) -> Result<Self, $crate::error::ValidationError> {
                Self::validated(version, $($crate::engine::attribute_field!(own $kind, $field)),+)
            }

            fn validated(
                version: $crate::version::DdmsVersion,
                $($field: $crate::engine::attribute_field!(ty $kind),)+
            ) -> Result<Self, $crate::error::ValidationError> {
                #[allow(unused_mut)]
                let mut v = $crate::engine::Validator::new(
                    version,
                    $crate::version::Namespace::Ddms,
                    $name,
                );
                $($crate::engine::attribute_field!(validate $kind, v, $field, $xml);)+
                $(v.require_since($since, concat!($name, " element"))?;)?
                let _fields = ($(&$field,)+);
                $($check(&mut v, _fields)?;)?
                Ok(Self {
                    version,
                    $($field,)+
                    warnings: v.finish(),
                })
            }

            $(
                pub fn $field(&self) -> $crate::engine::attribute_field!(getter $kind) {
                    $crate::engine::attribute_field!(get $kind, self.$field)
                }
            )+
        }

        impl $crate::engine::Component for $component {
            fn from_element(
                version: $crate::version::DdmsVersion,
                element: &$crate::xml::Element,
            ) -> Result<Self, $crate::error::ValidationError> {
                let source = $crate::engine::Source::open(
                    version,
                    element,
                    $crate::version::Namespace::Ddms,
                    $name,
                )?;
                Self::validated(
                    version,
                    $($crate::engine::attribute_field!(
                        parse $kind,
                        source.attr($crate::version::Namespace::Ddms, $xml)
                    )),+
                )
            }

            fn version(&self) -> $crate::version::DdmsVersion {
                self.version
            }

            fn name(&self) -> &'static str {
                $name
            }

            fn warnings(&self) -> &[$crate::engine::ValidationWarning] {
                &self.warnings
            }

            fn template(&self) -> $crate::engine::Template {
                let template = $crate::engine::Template::new(
                    self.version,
                    $crate::version::Namespace::Ddms,
                    $name,
                );
                $(let template = $crate::engine::attribute_field!(render $kind, template, self.$field, $xml);)+
                template
            }
        }

        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct $builder {
            $(pub $field: Option<String>,)+
        }

        impl From<&$component> for $builder {
            fn from(component: &$component) -> Self {
                Self {
                    $($field: $crate::engine::attribute_field!(load $kind, component.$field),)+
                }
            }
        }

        impl $crate::engine::Builder for $builder {
            type Target = $component;

            fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())+
            }

            fn commit(
                &self,
                version: $crate::version::DdmsVersion,
            ) -> Result<Option<$component>, $crate::error::ValidationError> {
                if $crate::engine::Builder::is_empty(self) {
                    return Ok(None);
                }
                $component::validated(
                    version,
                    $($crate::engine::attribute_field!(commit $kind, self.$field)),+
                )
                .map(Some)
            }
        }
    };
}

pub(crate) use attribute_component;
pub(crate) use attribute_field;

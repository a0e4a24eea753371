// crates/ddms-rs/src/attributes/srs.rs

use crate::engine::{Source, Template, Validator};
use crate::error::ValidationError;

/// GML spatial reference system attributes (`srsName`, `srsDimension`,
/// `axisLabels`, `uomLabels`). All are unqualified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SrsAttributes {
    pub srs_name: Option<String>,
    pub srs_dimension: Option<i64>,
    pub axis_labels: Vec<String>,
    pub uom_labels: Vec<String>,
}

impl SrsAttributes {
    pub fn named(srs_name: &str) -> Self {
        Self {
            srs_name: Some(srs_name.to_string()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn from_source(source: &Source) -> Result<Self, ValidationError> {
        let tokens = |name: &str| {
            source
                .plain_attr(name)
                .map(|v| v.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default()
        };
        Ok(Self {
            srs_name: source.plain_attr("srsName"),
            srs_dimension: source.integer(source.plain_attr("srsDimension"), "srsDimension")?,
            axis_labels: tokens("axisLabels"),
            uom_labels: tokens("uomLabels"),
        })
    }

    pub(crate) fn validate(&self, validator: &Validator) -> Result<(), ValidationError> {
        if let Some(name) = &self.srs_name {
            validator.require_text(name, "srsName")?;
        }
        if matches!(self.srs_dimension, Some(d) if d < 1) {
            return Err(validator.fail("The srsDimension must be a positive integer."));
        }
        if !self.axis_labels.is_empty() && self.srs_name.is_none() {
            return Err(validator.fail("The srsName must exist when axisLabels is set."));
        }
        if !self.uom_labels.is_empty() && self.axis_labels.is_empty() {
            return Err(validator.fail("The axisLabels must exist when uomLabels is set."));
        }
        Ok(())
    }

    pub(crate) fn render(&self, template: Template) -> Template {
        let joined = |tokens: &[String]| (!tokens.is_empty()).then(|| tokens.join(" "));
        template
            .plain_attribute("srsName", self.srs_name.as_ref())
            .plain_attribute("srsDimension", self.srs_dimension)
            .plain_attribute("axisLabels", joined(&self.axis_labels))
            .plain_attribute("uomLabels", joined(&self.uom_labels))
    }
}

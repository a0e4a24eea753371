// crates/ddms-rs/src/attributes/security.rs

use crate::engine::{DatePrecision, Source, Template, Validator};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};

/// Classification levels accepted in `ISM:classification`. US and NATO markings.
pub const CLASSIFICATIONS: [&str; 17] = [
    "U", "C", "S", "TS", "R", "CTS", "CTS-B", "CTS-BALK", "NU", "NR", "NC", "NS", "NS-S",
    "NS-A", "CTSA", "NSAT", "NCA",
];

/// Intelligence Community security markings (ISM attribute group).
///
/// The bag is plain data and doubles as its own builder. Token-list attributes
/// are held one token per entry and written space-separated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SecurityAttributes {
    pub classification: Option<String>,
    pub owner_producers: Vec<String>,
    pub sci_controls: Vec<String>,
    pub dissemination_controls: Vec<String>,
    pub releasable_to: Vec<String>,
    pub non_ic_markings: Vec<String>,
    pub classified_by: Option<String>,
    /// An xs:date.
    pub declass_date: Option<String>,
    /// Available from DDMS 3.1.
    pub complies_with: Vec<String>,
}

impl SecurityAttributes {
    /// The common case of a classification and its owners.
    pub fn new(classification: &str, owner_producers: &[&str]) -> Self {
        Self {
            classification: Some(classification.to_string()),
            owner_producers: owner_producers.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn from_source(source: &Source) -> Self {
        let text = |name: &str| source.attr(Namespace::Ism, name);
        let tokens = |name: &str| {
            text(name)
                .map(|v| v.split_whitespace().map(str::to_string).collect())
                .unwrap_or_default()
        };
        Self {
            classification: text("classification"),
            owner_producers: tokens("ownerProducer"),
            sci_controls: tokens("SCIcontrols"),
            dissemination_controls: tokens("disseminationControls"),
            releasable_to: tokens("releasableTo"),
            non_ic_markings: tokens("nonICmarkings"),
            classified_by: text("classifiedBy"),
            declass_date: text("declassDate"),
            complies_with: tokens("compliesWith"),
        }
    }

    /// Checks value formats and revision restrictions of whatever is set.
    pub(crate) fn validate(&self, validator: &Validator) -> Result<(), ValidationError> {
        if let Some(classification) = &self.classification {
            validator.require_one_of(classification, &CLASSIFICATIONS, "classification")?;
        }
        if let Some(date) = &self.declass_date {
            let parsed = validator.require_date(date, "declassDate")?;
            if parsed.precision() != DatePrecision::Date {
                return Err(validator.fail("The declassDate must be in the xs:date format (YYYY-MM-DD)."));
            }
        }
        if !self.complies_with.is_empty() {
            validator.require_since(DdmsVersion::V3_1, "compliesWith attribute")?;
        }
        Ok(())
    }

    /// Requires a classification and at least one owner, then validates the rest.
    pub(crate) fn require_marking(&self, validator: &Validator) -> Result<(), ValidationError> {
        let classification = self.classification.as_deref().unwrap_or_default();
        validator.require_text(classification, "classification")?;
        validator.require_at_least(self.owner_producers.len(), 1, "ownerProducer")?;
        self.validate(validator)
    }

    pub(crate) fn render(&self, template: Template) -> Template {
        let joined = |tokens: &[String]| (!tokens.is_empty()).then(|| tokens.join(" "));
        template
            .optional_attribute(Namespace::Ism, "classification", self.classification.as_ref())
            .optional_attribute(Namespace::Ism, "ownerProducer", joined(&self.owner_producers))
            .optional_attribute(Namespace::Ism, "SCIcontrols", joined(&self.sci_controls))
            .optional_attribute(
                Namespace::Ism,
                "disseminationControls",
                joined(&self.dissemination_controls),
            )
            .optional_attribute(Namespace::Ism, "releasableTo", joined(&self.releasable_to))
            .optional_attribute(Namespace::Ism, "nonICmarkings", joined(&self.non_ic_markings))
            .optional_attribute(Namespace::Ism, "classifiedBy", self.classified_by.as_ref())
            .optional_attribute(Namespace::Ism, "declassDate", self.declass_date.as_ref())
            .optional_attribute(Namespace::Ism, "compliesWith", joined(&self.complies_with))
    }
}

// crates/ddms-rs/src/temporal.rs

//! Temporal coverage: when the resource applies.

use crate::engine::{
    Builder, Component, DateValue, Source, Template, ValidationWarning, Validator, Warnings,
};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;
use std::fmt;

const NAME: &str = "temporalCoverage";
const WRAPPER: &str = "TimePeriod";

/// One end of a time period.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TimeBound {
    Date(DateValue),
    NotApplicable,
    Unknown,
}

impl TimeBound {
    /// Accepts a date in any supported precision or one of the two keywords.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "Not Applicable" => Some(TimeBound::NotApplicable),
            "Unknown" => Some(TimeBound::Unknown),
            other => DateValue::parse(other).map(TimeBound::Date),
        }
    }
}

impl fmt::Display for TimeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeBound::Date(date) => write!(f, "{}", date),
            TimeBound::NotApplicable => f.write_str("Not Applicable"),
            TimeBound::Unknown => f.write_str("Unknown"),
        }
    }
}

/// A named time period with a start and an end.
///
/// ```xml
/// <ddms:temporalCoverage>
///   <ddms:TimePeriod>
///     <ddms:name>Cold War</ddms:name>
///     <ddms:start>1947</ddms:start>
///     <ddms:end>1991-12-26</ddms:end>
///   </ddms:TimePeriod>
/// </ddms:temporalCoverage>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemporalCoverage {
    version: DdmsVersion,
    name: Option<String>,
    start: TimeBound,
    end: TimeBound,
    warnings: Warnings,
}

impl TemporalCoverage {
    pub fn new(
        version: DdmsVersion,
        name: Option<&str>,
        start: &str,
        end: &str,
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            name.map(str::to_string),
            Some(start.to_string()),
            Some(end.to_string()),
        )
    }

    fn validated(
        version: DdmsVersion,
        name: Option<String>,
        start: Option<String>,
        end: Option<String>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, NAME);
        let start = v.require_some(start, "start")?;
        let end = v.require_some(end, "end")?;
        v.require_text(&start, "start")?;
        v.require_text(&end, "end")?;
        let bound = |value: &str, field: &str| {
            TimeBound::parse(value).ok_or_else(|| {
                v.fail(format!(
                    "The {} value must be a valid date or one of Not Applicable, Unknown.",
                    field
                ))
            })
        };
        let start = bound(&start, "start")?;
        let end = bound(&end, "end")?;
        if name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            v.warn("A ddms:name element was found with no value.");
        }
        Ok(Self {
            version,
            name,
            start,
            end,
            warnings: v.finish(),
        })
    }

    pub fn time_period_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn start(&self) -> &TimeBound {
        &self.start
    }

    pub fn end(&self) -> &TimeBound {
        &self.end
    }
}

impl Component for TemporalCoverage {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, NAME)?;
        let period = source.wrapper(Namespace::Ddms, WRAPPER)?;
        Self::validated(
            version,
            period.child_text(Namespace::Ddms, "name"),
            period.child_text(Namespace::Ddms, "start"),
            period.child_text(Namespace::Ddms, "end"),
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
        Template::new(self.version, Namespace::Ddms, NAME).wrapper(Namespace::Ddms, WRAPPER, |t| {
            t.optional_element(Namespace::Ddms, "name", self.name.as_ref())
                .element(Namespace::Ddms, "start", &self.start)
                .element(Namespace::Ddms, "end", &self.end)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemporalCoverageBuilder {
    pub name: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl From<&TemporalCoverage> for TemporalCoverageBuilder {
    fn from(coverage: &TemporalCoverage) -> Self {
        Self {
            name: coverage.name.clone(),
            start: Some(coverage.start.to_string()),
            end: Some(coverage.end.to_string()),
        }
    }
}

impl Builder for TemporalCoverageBuilder {
    type Target = TemporalCoverage;

    fn is_empty(&self) -> bool {
        self.name.is_none() && self.start.is_none() && self.end.is_none()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<TemporalCoverage>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        TemporalCoverage::validated(version, self.name.clone(), self.start.clone(), self.end.clone())
            .map(Some)
    }
}

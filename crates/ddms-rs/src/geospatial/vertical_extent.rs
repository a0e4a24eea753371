// crates/ddms-rs/src/geospatial/vertical_extent.rs

use crate::engine::{
    Builder, Component, Double, Source, Template, ValidationWarning, Validator, Warnings,
};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Feature, Namespace};
use crate::xml::Element;

const NAME: &str = "verticalExtent";

pub const UNITS_OF_MEASURE: [&str; 8] = [
    "Fathom",
    "Foot",
    "Inch",
    "Kilometer",
    "Meter",
    "Mile",
    "Millimeter",
    "Yard",
];

pub const DATUMS: [&str; 3] = ["AGL", "ASL", "HAE"];

fn extent_names(version: DdmsVersion) -> (&'static str, &'static str) {
    if version.has(Feature::CapitalizedChildNames) {
        ("MinVerticalExtent", "MaxVerticalExtent")
    } else {
        ("minVerticalExtent", "maxVerticalExtent")
    }
}

/// A vertical range with its unit of measure and vertical datum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerticalExtent {
    version: DdmsVersion,
    min: Double,
    max: Double,
    unit_of_measure: String,
    datum: String,
    warnings: Warnings,
}

impl VerticalExtent {
    pub fn new(
        version: DdmsVersion,
        min: f64,
        max: f64,
        unit_of_measure: &str,
        datum: &str,
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            Some(min),
            Some(max),
            Some(unit_of_measure.to_string()),
            Some(datum.to_string()),
        )
    }

    fn validated(
        version: DdmsVersion,
        min: Option<f64>,
        max: Option<f64>,
        unit_of_measure: Option<String>,
        datum: Option<String>,
    ) -> Result<Self, ValidationError> {
        let v = Validator::new(version, Namespace::Ddms, NAME);
        let (min_name, max_name) = extent_names(version);
        let unit_of_measure = v.require_some(unit_of_measure, "unitOfMeasure attribute")?;
        let datum = v.require_some(datum, "datum attribute")?;
        let min = v.require_some(min, min_name)?;
        let max = v.require_some(max, max_name)?;
        v.require_one_of(&unit_of_measure, &UNITS_OF_MEASURE, "unitOfMeasure")?;
        v.require_one_of(&datum, &DATUMS, "datum")?;
        if !min.is_finite() || !max.is_finite() {
            return Err(v.fail("Vertical extents must be finite numbers."));
        }
        if min > max {
            return Err(v.fail("Minimum vertical extent must be less than or equal to maximum vertical extent."));
        }
        Ok(Self {
            version,
            min: min.into(),
            max: max.into(),
            unit_of_measure,
            datum,
            warnings: v.finish(),
        })
    }

    pub fn min(&self) -> f64 {
        self.min.get()
    }

    pub fn max(&self) -> f64 {
        self.max.get()
    }

    pub fn unit_of_measure(&self) -> &str {
        &self.unit_of_measure
    }

    pub fn datum(&self) -> &str {
        &self.datum
    }
}

impl Component for VerticalExtent {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, NAME)?;
        let (min_name, max_name) = extent_names(version);
        Self::validated(
            version,
            source.number(source.child_text(Namespace::Ddms, min_name), min_name)?,
            source.number(source.child_text(Namespace::Ddms, max_name), max_name)?,
            source.attr(Namespace::Ddms, "unitOfMeasure"),
            source.attr(Namespace::Ddms, "datum"),
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
        let (min_name, max_name) = extent_names(self.version);
        Template::new(self.version, Namespace::Ddms, NAME)
            .attribute(Namespace::Ddms, "unitOfMeasure", &self.unit_of_measure)
            .attribute(Namespace::Ddms, "datum", &self.datum)
            .element(Namespace::Ddms, min_name, self.min)
            .element(Namespace::Ddms, max_name, self.max)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerticalExtentBuilder {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub unit_of_measure: Option<String>,
    pub datum: Option<String>,
}

impl From<&VerticalExtent> for VerticalExtentBuilder {
    fn from(extent: &VerticalExtent) -> Self {
        Self {
            min: Some(extent.min()),
            max: Some(extent.max()),
            unit_of_measure: Some(extent.unit_of_measure.clone()),
            datum: Some(extent.datum.clone()),
        }
    }
}

impl Builder for VerticalExtentBuilder {
    type Target = VerticalExtent;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<VerticalExtent>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        VerticalExtent::validated(
            version,
            self.min,
            self.max,
            self.unit_of_measure.clone(),
            self.datum.clone(),
        )
        .map(Some)
    }
}

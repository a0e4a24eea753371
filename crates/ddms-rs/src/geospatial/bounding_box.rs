// crates/ddms-rs/src/geospatial/bounding_box.rs

use crate::engine::{
    Builder, Component, Double, Source, Template, ValidationWarning, Validator, Warnings,
};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Feature, Namespace};
use crate::xml::Element;

const NAME: &str = "boundingBox";

/// Child element names, capitalized before DDMS 4.0.1.
struct Bounds {
    west: &'static str,
    east: &'static str,
    south: &'static str,
    north: &'static str,
}

fn bounds(version: DdmsVersion) -> Bounds {
    if version.has(Feature::CapitalizedChildNames) {
        Bounds {
            west: "WestBL",
            east: "EastBL",
            south: "SouthBL",
            north: "NorthBL",
        }
    } else {
        Bounds {
            west: "westBL",
            east: "eastBL",
            south: "southBL",
            north: "northBL",
        }
    }
}

/// A rectangle in decimal degrees. Longitudes lie in [-180, 180] and latitudes
/// in [-90, 90].
///
/// ```xml
/// <ddms:boundingBox>
///   <ddms:westBL>12.3</ddms:westBL>
///   <ddms:eastBL>23.4</ddms:eastBL>
///   <ddms:southBL>34.5</ddms:southBL>
///   <ddms:northBL>45.6</ddms:northBL>
/// </ddms:boundingBox>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    version: DdmsVersion,
    west: Double,
    east: Double,
    south: Double,
    north: Double,
    warnings: Warnings,
}

impl BoundingBox {
    pub fn new(
        version: DdmsVersion,
        west: f64,
        east: f64,
        south: f64,
        north: f64,
    ) -> Result<Self, ValidationError> {
        Self::validated(version, Some(west), Some(east), Some(south), Some(north))
    }

    fn validated(
        version: DdmsVersion,
        west: Option<f64>,
        east: Option<f64>,
        south: Option<f64>,
        north: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let v = Validator::new(version, Namespace::Ddms, NAME);
        let names = bounds(version);
        let west = v.require_some(west, names.west)?;
        let east = v.require_some(east, names.east)?;
        let south = v.require_some(south, names.south)?;
        let north = v.require_some(north, names.north)?;
        v.require_range(west, -180.0, 180.0, names.west)?;
        v.require_range(east, -180.0, 180.0, names.east)?;
        v.require_range(south, -90.0, 90.0, names.south)?;
        v.require_range(north, -90.0, 90.0, names.north)?;
        Ok(Self {
            version,
            west: west.into(),
            east: east.into(),
            south: south.into(),
            north: north.into(),
            warnings: v.finish(),
        })
    }

    pub fn west(&self) -> f64 {
        self.west.get()
    }

    pub fn east(&self) -> f64 {
        self.east.get()
    }

    pub fn south(&self) -> f64 {
        self.south.get()
    }

    pub fn north(&self) -> f64 {
        self.north.get()
    }
}

impl Component for BoundingBox {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, NAME)?;
        let names = bounds(version);
        let coordinate = |name: &str| source.number(source.child_text(Namespace::Ddms, name), name);
        Self::validated(
            version,
            coordinate(names.west)?,
            coordinate(names.east)?,
            coordinate(names.south)?,
            coordinate(names.north)?,
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
        let names = bounds(self.version);
        Template::new(self.version, Namespace::Ddms, NAME)
            .element(Namespace::Ddms, names.west, self.west)
            .element(Namespace::Ddms, names.east, self.east)
            .element(Namespace::Ddms, names.south, self.south)
            .element(Namespace::Ddms, names.north, self.north)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingBoxBuilder {
    pub west: Option<f64>,
    pub east: Option<f64>,
    pub south: Option<f64>,
    pub north: Option<f64>,
}

impl From<&BoundingBox> for BoundingBoxBuilder {
    fn from(bounding_box: &BoundingBox) -> Self {
        Self {
            west: Some(bounding_box.west()),
            east: Some(bounding_box.east()),
            south: Some(bounding_box.south()),
            north: Some(bounding_box.north()),
        }
    }
}

impl Builder for BoundingBoxBuilder {
    type Target = BoundingBox;

    fn is_empty(&self) -> bool {
        self.west.is_none() && self.east.is_none() && self.south.is_none() && self.north.is_none()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<BoundingBox>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        BoundingBox::validated(version, self.west, self.east, self.south, self.north).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_west_names_the_field() {
        let builder = BoundingBoxBuilder {
            east: Some(23.4),
            south: Some(34.5),
            north: Some(45.6),
            ..BoundingBoxBuilder::default()
        };
        let err = builder.commit(DdmsVersion::V4_1).unwrap_err();
        assert_eq!(err.message(), "westBL is required.");
        let err = builder.commit(DdmsVersion::V3_1).unwrap_err();
        assert_eq!(err.message(), "WestBL is required.");

        let xml = r#"<ddms:boundingBox xmlns:ddms="urn:us:mil:ces:metadata:ddms:4">
            <ddms:eastBL>23.4</ddms:eastBL><ddms:southBL>34.5</ddms:southBL><ddms:northBL>45.6</ddms:northBL>
        </ddms:boundingBox>"#;
        let err = BoundingBox::from_xml(DdmsVersion::V4_1, xml).unwrap_err();
        assert_eq!(err.to_string(), "ddms:boundingBox: westBL is required.");
    }

    #[test]
    fn test_ranges() {
        let err = BoundingBox::new(DdmsVersion::V4_1, -181.0, 0.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err.message(), "westBL must be greater than or equal to -180.");
        let err = BoundingBox::new(DdmsVersion::V4_1, 181.0, 0.0, 0.0, 0.0).unwrap_err();
        assert_eq!(err.message(), "westBL must be less than or equal to 180.");
        let err = BoundingBox::new(DdmsVersion::V4_1, 0.0, 0.0, -90.5, 0.0).unwrap_err();
        assert_eq!(err.message(), "southBL must be greater than or equal to -90.");
        let err = BoundingBox::new(DdmsVersion::V2_0, 0.0, 0.0, 0.0, 91.0).unwrap_err();
        assert_eq!(err.message(), "NorthBL must be less than or equal to 90.");
        assert!(BoundingBox::new(DdmsVersion::V4_1, -180.0, 180.0, -90.0, 90.0).is_ok());
    }

    #[test]
    fn test_non_numeric_coordinate() {
        let xml = r#"<ddms:boundingBox xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.0/">
            <ddms:WestBL>west</ddms:WestBL><ddms:EastBL>1</ddms:EastBL>
            <ddms:SouthBL>1</ddms:SouthBL><ddms:NorthBL>1</ddms:NorthBL>
        </ddms:boundingBox>"#;
        let err = BoundingBox::from_xml(DdmsVersion::V3_0, xml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ddms:boundingBox: The WestBL value, \"west\", is not a valid number."
        );
    }

    #[test]
    fn test_cross_path_equality_and_hash() {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let xml = r#"<ddms:boundingBox xmlns:ddms="urn:us:mil:ces:metadata:ddms:4">
            <ddms:westBL>12.3</ddms:westBL><ddms:eastBL>23.4</ddms:eastBL>
            <ddms:southBL>34.5</ddms:southBL><ddms:northBL>45.6</ddms:northBL>
        </ddms:boundingBox>"#;
        let parsed = BoundingBox::from_xml(DdmsVersion::V4_1, xml).unwrap();
        let built = BoundingBox::new(DdmsVersion::V4_1, 12.3, 23.4, 34.5, 45.6).unwrap();
        assert_eq!(parsed, built);

        let hash = |b: &BoundingBox| {
            let mut hasher = DefaultHasher::new();
            b.hash(&mut hasher);
            hasher.finish()
        };
        assert_eq!(hash(&parsed), hash(&built));
        assert_eq!(
            built.to_text(),
            "boundingBox.westBL: 12.3\nboundingBox.eastBL: 23.4\nboundingBox.southBL: 34.5\nboundingBox.northBL: 45.6\n"
        );
    }
}

// crates/ddms-rs/src/geospatial/mod.rs

//! Geospatial coverage: where the resource applies.

mod bounding_box;
mod codes;
mod coverage;
mod geographic;
mod geometry;
mod gml;
mod postal;
mod vertical_extent;

pub use bounding_box::{BoundingBox, BoundingBoxBuilder};
pub use codes::{
    CountryCode, CountryCodeBuilder, FacilityIdentifier, FacilityIdentifierBuilder, SubDivisionCode,
    SubDivisionCodeBuilder,
};
pub use coverage::{GeospatialContent, GeospatialCoverage, GeospatialCoverageBuilder, PRECEDENCES};
pub use geographic::{GeographicIdentifier, GeographicIdentifierBuilder};
pub use geometry::{BoundingGeometry, BoundingGeometryBuilder};
pub use gml::{Point, PointBuilder, Polygon, PolygonBuilder, Position, PositionBuilder};
pub use postal::{PostalAddress, PostalAddressBuilder, Region};
pub use vertical_extent::{DATUMS, UNITS_OF_MEASURE, VerticalExtent, VerticalExtentBuilder};

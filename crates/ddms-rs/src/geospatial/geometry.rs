// crates/ddms-rs/src/geospatial/geometry.rs

use super::gml::{Point, PointBuilder, Polygon, PolygonBuilder};
use crate::engine::{
    Builder, BuilderList, Component, Source, Template, ValidationWarning, Validator, Warnings,
};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

const NAME: &str = "boundingGeometry";

/// A set of GML polygons and points bounding the covered area.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoundingGeometry {
    version: DdmsVersion,
    polygons: Vec<Polygon>,
    points: Vec<Point>,
    warnings: Warnings,
}

impl BoundingGeometry {
    pub fn new(
        version: DdmsVersion,
        polygons: Vec<Polygon>,
        points: Vec<Point>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, NAME);
        v.require_compatible(&polygons)?;
        v.require_compatible(&points)?;
        v.require_at_least(polygons.len() + points.len(), 1, "polygon or point")?;
        v.absorb_all(None, &polygons);
        v.absorb_all(None, &points);
        Ok(Self {
            version,
            polygons,
            points,
            warnings: v.finish(),
        })
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Component for BoundingGeometry {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, NAME)?;
        Self::new(
            version,
            source.components(Namespace::Gml, "Polygon")?,
            source.components(Namespace::Gml, "Point")?,
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
            .children(&self.polygons)
            .children(&self.points)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingGeometryBuilder {
    pub polygons: BuilderList<PolygonBuilder>,
    pub points: BuilderList<PointBuilder>,
}

impl From<&BoundingGeometry> for BoundingGeometryBuilder {
    fn from(geometry: &BoundingGeometry) -> Self {
        Self {
            polygons: BuilderList::of(&geometry.polygons),
            points: BuilderList::of(&geometry.points),
        }
    }
}

impl Builder for BoundingGeometryBuilder {
    type Target = BoundingGeometry;

    fn is_empty(&self) -> bool {
        self.polygons.is_empty() && self.points.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<BoundingGeometry>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        BoundingGeometry::new(
            version,
            self.polygons.commit_all(version)?,
            self.points.commit_all(version)?,
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::SrsAttributes;
    use crate::geospatial::gml::Position;

    const SRS: &str = "http://metadata.dod.mil/mdr/ns/GSIP/crs/WGS84E_2D";

    fn point(id: &str) -> Point {
        let pos = Position::new(DdmsVersion::V3_0, &[32.1, 40.1], SrsAttributes::named(SRS)).unwrap();
        Point::new(DdmsVersion::V3_0, id, SrsAttributes::named(SRS), pos).unwrap()
    }

    #[test]
    fn test_requires_a_shape() {
        let err = BoundingGeometry::new(DdmsVersion::V3_0, Vec::new(), Vec::new()).unwrap_err();
        assert_eq!(err.message(), "At least 1 polygon or point must exist.");
    }

    #[test]
    fn test_repeated_points_are_indexed() {
        let geometry =
            BoundingGeometry::new(DdmsVersion::V3_0, Vec::new(), vec![point("A"), point("B")]).unwrap();
        let text = geometry.to_text();
        assert!(text.contains("boundingGeometry.point[1].id: A\n"));
        assert!(text.contains("boundingGeometry.point[2].id: B\n"));
        assert_eq!(geometry.to_html().lines().count(), text.lines().count());
    }

    #[test]
    fn test_parse_points() {
        let xml = r#"<ddms:boundingGeometry xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.0/"
            xmlns:gml="http://www.opengis.net/gml/3.2">
            <gml:Point srsName="http://metadata.dod.mil/mdr/ns/GSIP/crs/WGS84E_2D" gml:id="A">
                <gml:pos>32.1 40.1</gml:pos>
            </gml:Point>
        </ddms:boundingGeometry>"#;
        let geometry = BoundingGeometry::from_xml(DdmsVersion::V3_0, xml).unwrap();
        assert_eq!(geometry.points().len(), 1);
        assert!(geometry.polygons().is_empty());
        assert_eq!(geometry.points()[0].position().coordinates(), vec![32.1, 40.1]);
    }

    #[test]
    fn test_builder_round_trip() {
        let geometry = BoundingGeometry::new(DdmsVersion::V3_0, Vec::new(), vec![point("A")]).unwrap();
        assert_eq!(
            BoundingGeometryBuilder::from(&geometry).commit(DdmsVersion::V3_0),
            Ok(Some(geometry))
        );
    }
}

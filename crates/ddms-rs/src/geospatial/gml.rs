// crates/ddms-rs/src/geospatial/gml.rs

//! The GML geometry subset used by bounding geometries: positions, points and
//! polygons.

use crate::attributes::SrsAttributes;
use crate::engine::{
    Builder, BuilderList, Component, DoubleBuilder, Double, Source, Template, ValidationWarning,
    Validator, Warnings,
};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

/// A coordinate tuple in a `gml:pos` element.
///
/// ```xml
/// <gml:pos srsName="http://metadata.dod.mil/mdr/ns/GSIP/crs/WGS84E_2D">32.1 40.1</gml:pos>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    version: DdmsVersion,
    coordinates: Vec<Double>,
    srs: SrsAttributes,
    warnings: Warnings,
}

impl Position {
    pub fn new(
        version: DdmsVersion,
        coordinates: &[f64],
        srs: SrsAttributes,
    ) -> Result<Self, ValidationError> {
        Self::validated(version, coordinates.to_vec(), srs)
    }

    fn validated(
        version: DdmsVersion,
        coordinates: Vec<f64>,
        srs: SrsAttributes,
    ) -> Result<Self, ValidationError> {
        let v = Validator::new(version, Namespace::Gml, "pos");
        srs.validate(&v)?;
        if !(2..=3).contains(&coordinates.len()) {
            return Err(v.fail("A position must be represented by either 2 or 3 coordinates."));
        }
        if coordinates.iter().any(|c| !c.is_finite()) {
            return Err(v.fail("A position coordinate must be a finite number."));
        }
        Ok(Self {
            version,
            coordinates: coordinates.into_iter().map(Double::new).collect(),
            srs,
            warnings: v.finish(),
        })
    }

    pub fn coordinates(&self) -> Vec<f64> {
        self.coordinates.iter().map(|c| c.get()).collect()
    }

    pub fn srs(&self) -> &SrsAttributes {
        &self.srs
    }

    /// Same coordinates, regardless of SRS attributes.
    pub fn same_place(&self, other: &Position) -> bool {
        self.coordinates == other.coordinates
    }

    fn srs_name(&self) -> Option<&str> {
        self.srs.srs_name.as_deref()
    }
}

impl Component for Position {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Gml, "pos")?;
        let srs = SrsAttributes::from_source(&source)?;
        let text = source.text();
        let mut coordinates = Vec::new();
        for token in text.split_whitespace() {
            if let Some(value) = source.number(Some(token.to_string()), "coordinate")? {
                coordinates.push(value);
            }
        }
        Self::validated(version, coordinates, srs)
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        "pos"
    }

    fn namespace(&self) -> Namespace {
        Namespace::Gml
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        let text = self
            .coordinates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        Template::new(self.version, Namespace::Gml, "pos")
            .srs(&self.srs)
            .text(text)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionBuilder {
    pub coordinates: BuilderList<DoubleBuilder>,
    pub srs: SrsAttributes,
}

impl From<&Position> for PositionBuilder {
    fn from(position: &Position) -> Self {
        Self {
            coordinates: position
                .coordinates
                .iter()
                .map(|c| DoubleBuilder::new(c.get()))
                .collect(),
            srs: position.srs.clone(),
        }
    }
}

impl Builder for PositionBuilder {
    type Target = Position;

    fn is_empty(&self) -> bool {
        self.coordinates.iter().all(DoubleBuilder::is_empty) && self.srs.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<Position>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        let coordinates = self.coordinates.iter().filter_map(|c| c.value).collect();
        Position::validated(version, coordinates, self.srs.clone()).map(Some)
    }
}

/// True for an XML non-colonized name, as required of `gml:id`.
fn is_ncname(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Shared by points and polygons: a valid `gml:id` and an `srsName`.
fn require_identity(v: &Validator, id: &str, srs: &SrsAttributes) -> Result<(), ValidationError> {
    v.require_text(srs.srs_name.as_deref().unwrap_or_default(), "srsName")?;
    v.require_text(id, "gml:id")?;
    if !is_ncname(id) {
        return Err(v.fail("The gml:id must be a valid NCName."));
    }
    srs.validate(v)
}

fn require_matching_srs(
    v: &Validator,
    owner: &str,
    srs: &SrsAttributes,
    positions: &[Position],
) -> Result<(), ValidationError> {
    for position in positions {
        if let Some(name) = position.srs_name() {
            if Some(name) != srs.srs_name.as_deref() {
                return Err(v.fail(format!(
                    "The srsName of each position must match the srsName of the {}.",
                    owner
                )));
            }
        }
    }
    Ok(())
}

/// A single location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    version: DdmsVersion,
    id: String,
    srs: SrsAttributes,
    position: Position,
    warnings: Warnings,
}

impl Point {
    pub fn new(
        version: DdmsVersion,
        id: &str,
        srs: SrsAttributes,
        position: Position,
    ) -> Result<Self, ValidationError> {
        Self::validated(version, id.to_string(), srs, Some(position))
    }

    fn validated(
        version: DdmsVersion,
        id: String,
        srs: SrsAttributes,
        position: Option<Position>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Gml, "Point");
        let position = v.require_some(position, "gml:pos")?;
        require_identity(&v, &id, &srs)?;
        v.require_compatible([&position])?;
        require_matching_srs(&v, "Point", &srs, std::slice::from_ref(&position))?;
        v.absorb(None, &position);
        Ok(Self {
            version,
            id,
            srs,
            position,
            warnings: v.finish(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn srs(&self) -> &SrsAttributes {
        &self.srs
    }

    pub fn position(&self) -> &Position {
        &self.position
    }
}

impl Component for Point {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Gml, "Point")?;
        Self::validated(
            version,
            source.attr(Namespace::Gml, "id").unwrap_or_default(),
            SrsAttributes::from_source(&source)?,
            source.component(Namespace::Gml, "pos")?,
        )
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        "Point"
    }

    fn namespace(&self) -> Namespace {
        Namespace::Gml
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        Template::new(self.version, Namespace::Gml, "Point")
            .srs(&self.srs)
            .attribute(Namespace::Gml, "id", &self.id)
            .child(&self.position)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointBuilder {
    pub id: Option<String>,
    pub srs: SrsAttributes,
    pub position: PositionBuilder,
}

impl From<&Point> for PointBuilder {
    fn from(point: &Point) -> Self {
        Self {
            id: Some(point.id.clone()),
            srs: point.srs.clone(),
            position: PositionBuilder::from(&point.position),
        }
    }
}

impl Builder for PointBuilder {
    type Target = Point;

    fn is_empty(&self) -> bool {
        self.id.is_none() && self.srs.is_empty() && self.position.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<Point>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        Point::validated(
            version,
            self.id.clone().unwrap_or_default(),
            self.srs.clone(),
            self.position.commit(version)?,
        )
        .map(Some)
    }
}

/// A closed ring of positions inside `gml:exterior/gml:LinearRing`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polygon {
    version: DdmsVersion,
    id: String,
    srs: SrsAttributes,
    positions: Vec<Position>,
    warnings: Warnings,
}

impl Polygon {
    pub fn new(
        version: DdmsVersion,
        id: &str,
        srs: SrsAttributes,
        positions: Vec<Position>,
    ) -> Result<Self, ValidationError> {
        Self::validated(version, id.to_string(), srs, positions)
    }

    fn validated(
        version: DdmsVersion,
        id: String,
        srs: SrsAttributes,
        positions: Vec<Position>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Gml, "Polygon");
        require_identity(&v, &id, &srs)?;
        v.require_compatible(&positions)?;
        require_matching_srs(&v, "Polygon", &srs, &positions)?;
        v.require_at_least(positions.len(), 4, "positions")?;
        if let (Some(first), Some(last)) = (positions.first(), positions.last()) {
            if !first.same_place(last) {
                return Err(v.fail("The first and last position in the Polygon must be the same."));
            }
        }
        v.absorb_all(Some("gml:exterior/gml:LinearRing"), &positions);
        Ok(Self {
            version,
            id,
            srs,
            positions,
            warnings: v.finish(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn srs(&self) -> &SrsAttributes {
        &self.srs
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

impl Component for Polygon {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Gml, "Polygon")?;
        let ring = source
            .wrapper(Namespace::Gml, "exterior")?
            .wrapper(Namespace::Gml, "LinearRing")?;
        Self::validated(
            version,
            source.attr(Namespace::Gml, "id").unwrap_or_default(),
            SrsAttributes::from_source(&source)?,
            ring.components(Namespace::Gml, "pos")?,
        )
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        "Polygon"
    }

    fn namespace(&self) -> Namespace {
        Namespace::Gml
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        Template::new(self.version, Namespace::Gml, "Polygon")
            .srs(&self.srs)
            .attribute(Namespace::Gml, "id", &self.id)
            .wrapper(Namespace::Gml, "exterior", |exterior| {
                exterior.wrapper(Namespace::Gml, "LinearRing", |ring| {
                    ring.children(&self.positions)
                })
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonBuilder {
    pub id: Option<String>,
    pub srs: SrsAttributes,
    pub positions: BuilderList<PositionBuilder>,
}

impl From<&Polygon> for PolygonBuilder {
    fn from(polygon: &Polygon) -> Self {
        Self {
            id: Some(polygon.id.clone()),
            srs: polygon.srs.clone(),
            positions: BuilderList::of(&polygon.positions),
        }
    }
}

impl Builder for PolygonBuilder {
    type Target = Polygon;

    fn is_empty(&self) -> bool {
        self.id.is_none() && self.srs.is_empty() && self.positions.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<Polygon>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        Polygon::validated(
            version,
            self.id.clone().unwrap_or_default(),
            self.srs.clone(),
            self.positions.commit_all(version)?,
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRS: &str = "http://metadata.dod.mil/mdr/ns/GSIP/crs/WGS84E_2D";

    fn pos(coordinates: &[f64]) -> Position {
        Position::new(DdmsVersion::V4_1, coordinates, SrsAttributes::named(SRS)).unwrap()
    }

    fn ring() -> Vec<Position> {
        vec![
            pos(&[32.1, 40.1]),
            pos(&[32.2, 40.2]),
            pos(&[32.3, 40.3]),
            pos(&[32.1, 40.1]),
        ]
    }

    #[test]
    fn test_position_dimensions() {
        assert!(Position::new(DdmsVersion::V4_1, &[1.0, 2.0, 3.0], SrsAttributes::default()).is_ok());
        let err = Position::new(DdmsVersion::V4_1, &[1.0], SrsAttributes::default()).unwrap_err();
        assert_eq!(
            err.message(),
            "A position must be represented by either 2 or 3 coordinates."
        );
        let xml = r#"<gml:pos xmlns:gml="http://www.opengis.net/gml/3.2">32.1 abc</gml:pos>"#;
        let err = Position::from_xml(DdmsVersion::V4_1, xml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "gml:pos: The coordinate value, \"abc\", is not a valid number."
        );
    }

    #[test]
    fn test_point_parse_and_output() {
        let xml = r#"<gml:Point xmlns:gml="http://www.opengis.net/gml/3.2"
            srsName="http://metadata.dod.mil/mdr/ns/GSIP/crs/WGS84E_2D" gml:id="IDValue">
            <gml:pos srsName="http://metadata.dod.mil/mdr/ns/GSIP/crs/WGS84E_2D">32.1 40.1</gml:pos>
        </gml:Point>"#;
        let point = Point::from_xml(DdmsVersion::V4_1, xml).unwrap();
        let expected =
            Point::new(DdmsVersion::V4_1, "IDValue", SrsAttributes::named(SRS), pos(&[32.1, 40.1]))
                .unwrap();
        assert_eq!(point, expected);
        assert_eq!(
            point.to_text(),
            format!("point.srsName: {SRS}\npoint.id: IDValue\npoint.pos.srsName: {SRS}\npoint.pos: 32.1 40.1\n")
        );
        assert_eq!(PointBuilder::from(&point).commit(DdmsVersion::V4_1), Ok(Some(point)));
    }

    #[test]
    fn test_point_rules() {
        let err = Point::new(DdmsVersion::V4_1, "1abc", SrsAttributes::named(SRS), pos(&[1.0, 2.0]))
            .unwrap_err();
        assert_eq!(err.message(), "The gml:id must be a valid NCName.");

        let err = Point::new(DdmsVersion::V4_1, "IDValue", SrsAttributes::default(), pos(&[1.0, 2.0]))
            .unwrap_err();
        assert_eq!(err.message(), "srsName is required.");

        let err = Point::new(
            DdmsVersion::V4_1,
            "IDValue",
            SrsAttributes::named("urn:other"),
            pos(&[1.0, 2.0]),
        )
        .unwrap_err();
        assert_eq!(
            err.message(),
            "The srsName of each position must match the srsName of the Point."
        );

        let older = Position::new(DdmsVersion::V3_0, &[1.0, 2.0], SrsAttributes::named(SRS)).unwrap();
        let err = Point::new(DdmsVersion::V4_1, "IDValue", SrsAttributes::named(SRS), older).unwrap_err();
        assert!(err.message().contains("different version of DDMS"));
    }

    #[test]
    fn test_polygon_ring() {
        let polygon = Polygon::new(DdmsVersion::V4_1, "IDValue", SrsAttributes::named(SRS), ring()).unwrap();
        let element = polygon.to_element();
        let ring_element = &element.children[0].children[0];
        assert_eq!(ring_element.name.lexical(), "gml:LinearRing");
        assert_eq!(ring_element.children.len(), 4);

        let text = polygon.to_text();
        assert!(text.contains("polygon.pos[4]: 32.1 40.1\n"));

        let reparsed = Polygon::from_xml(DdmsVersion::V4_1, &polygon.to_xml().unwrap()).unwrap();
        assert_eq!(reparsed, polygon);
    }

    #[test]
    fn test_polygon_rules() {
        let mut open = ring();
        open[3] = pos(&[32.4, 40.4]);
        let err = Polygon::new(DdmsVersion::V4_1, "IDValue", SrsAttributes::named(SRS), open).unwrap_err();
        assert_eq!(
            err.message(),
            "The first and last position in the Polygon must be the same."
        );

        let short = ring()[..3].to_vec();
        let err = Polygon::new(DdmsVersion::V4_1, "IDValue", SrsAttributes::named(SRS), short).unwrap_err();
        assert_eq!(err.message(), "At least 4 positions must exist.");

        let xml = r#"<gml:Polygon xmlns:gml="http://www.opengis.net/gml/3.2" srsName="urn:x" gml:id="P1"/>"#;
        let err = Polygon::from_xml(DdmsVersion::V4_1, xml).unwrap_err();
        assert_eq!(err.to_string(), "gml:Polygon: gml:exterior is required.");
    }

    #[test]
    fn test_polygon_builder_skips_empty_positions() {
        let polygon = Polygon::new(DdmsVersion::V4_1, "IDValue", SrsAttributes::named(SRS), ring()).unwrap();
        let mut builder = PolygonBuilder::from(&polygon);
        builder.positions.slot(6);
        assert_eq!(builder.positions.len(), 7);
        assert_eq!(builder.commit(DdmsVersion::V4_1), Ok(Some(polygon)));
    }
}

// crates/ddms-rs/src/geospatial/coverage.rs

use super::bounding_box::{BoundingBox, BoundingBoxBuilder};
use super::geographic::{GeographicIdentifier, GeographicIdentifierBuilder};
use super::geometry::{BoundingGeometry, BoundingGeometryBuilder};
use super::postal::{PostalAddress, PostalAddressBuilder};
use super::vertical_extent::{VerticalExtent, VerticalExtentBuilder};
use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Feature, Namespace};
use crate::xml::Element;

const NAME: &str = "geospatialCoverage";
const WRAPPER: &str = "GeospatialExtent";

pub const PRECEDENCES: [&str; 2] = ["Primary", "Secondary"];

/// The one place description a geospatial coverage holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GeospatialContent {
    GeographicIdentifier(GeographicIdentifier),
    BoundingBox(BoundingBox),
    BoundingGeometry(BoundingGeometry),
    PostalAddress(PostalAddress),
    VerticalExtent(VerticalExtent),
}

const CONTENT_NAMES: [&str; 5] = [
    "geographicIdentifier",
    "boundingBox",
    "boundingGeometry",
    "postalAddress",
    "verticalExtent",
];

impl From<GeographicIdentifier> for GeospatialContent {
    fn from(identifier: GeographicIdentifier) -> Self {
        GeospatialContent::GeographicIdentifier(identifier)
    }
}

impl From<BoundingBox> for GeospatialContent {
    fn from(bounding_box: BoundingBox) -> Self {
        GeospatialContent::BoundingBox(bounding_box)
    }
}

impl From<BoundingGeometry> for GeospatialContent {
    fn from(geometry: BoundingGeometry) -> Self {
        GeospatialContent::BoundingGeometry(geometry)
    }
}

impl From<PostalAddress> for GeospatialContent {
    fn from(address: PostalAddress) -> Self {
        GeospatialContent::PostalAddress(address)
    }
}

impl From<VerticalExtent> for GeospatialContent {
    fn from(extent: VerticalExtent) -> Self {
        GeospatialContent::VerticalExtent(extent)
    }
}

/// Applies `$body` to whichever component the content holds.
macro_rules! each_content {
    ($content:expr, $c:ident => $body:expr) => {
        match $content {
            GeospatialContent::GeographicIdentifier($c) => $body,
            GeospatialContent::BoundingBox($c) => $body,
            GeospatialContent::BoundingGeometry($c) => $body,
            GeospatialContent::PostalAddress($c) => $body,
            GeospatialContent::VerticalExtent($c) => $body,
        }
    };
}

impl Component for GeospatialContent {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        match element.name.local.as_str() {
            "geographicIdentifier" => GeographicIdentifier::from_element(version, element).map(Self::from),
            "boundingBox" => BoundingBox::from_element(version, element).map(Self::from),
            "boundingGeometry" => BoundingGeometry::from_element(version, element).map(Self::from),
            "postalAddress" => PostalAddress::from_element(version, element).map(Self::from),
            "verticalExtent" => VerticalExtent::from_element(version, element).map(Self::from),
            other => Err(ValidationError::new(
                element.name.lexical(),
                format!(
                    "Unexpected element {} in namespace {}.",
                    other,
                    element.name.namespace.as_deref().unwrap_or("(none)")
                ),
            )),
        }
    }

    fn version(&self) -> DdmsVersion {
        each_content!(self, c => c.version())
    }

    fn name(&self) -> &'static str {
        each_content!(self, c => c.name())
    }

    fn warnings(&self) -> &[ValidationWarning] {
        each_content!(self, c => c.warnings())
    }

    fn template(&self) -> Template {
        each_content!(self, c => c.template())
    }
}

/// The area the resource covers.
///
/// ```xml
/// <ddms:geospatialCoverage ddms:precedence="Primary" ddms:order="1">
///   <ddms:geographicIdentifier>
///     <ddms:countryCode ddms:qualifier="urn:us:gov:ic:cvenum:irm:coi:countrycodes" ddms:value="USA"/>
///   </ddms:geographicIdentifier>
/// </ddms:geospatialCoverage>
/// ```
///
/// Before DDMS 4.0.1 the content sits inside a `ddms:GeospatialExtent`
/// wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeospatialCoverage {
    version: DdmsVersion,
    content: GeospatialContent,
    precedence: Option<String>,
    order: Option<i64>,
    warnings: Warnings,
}

impl GeospatialCoverage {
    pub fn new(
        version: DdmsVersion,
        content: impl Into<GeospatialContent>,
        precedence: Option<&str>,
        order: Option<i64>,
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            vec![content.into()],
            precedence.map(str::to_string),
            order,
        )
    }

    fn validated(
        version: DdmsVersion,
        mut contents: Vec<GeospatialContent>,
        precedence: Option<String>,
        order: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, NAME);
        if contents.len() != 1 {
            return Err(v.fail(
                "Exactly 1 of geographicIdentifier, boundingBox, boundingGeometry, postalAddress or verticalExtent must exist.",
            ));
        }
        v.require_compatible(&contents)?;
        if let Some(precedence) = &precedence {
            v.require_one_of(precedence, &PRECEDENCES, "precedence")?;
            let country_code = matches!(
                &contents[0],
                GeospatialContent::GeographicIdentifier(g) if g.country_code().is_some()
            );
            if !country_code {
                return Err(v.fail(
                    "The precedence attribute must only be applied to a geographicIdentifier containing a country code.",
                ));
            }
            v.require_since(DdmsVersion::V4_1, "precedence attribute")?;
        }
        if order.is_some() {
            v.require_since(DdmsVersion::V4_1, "order attribute")?;
        }
        let wrapper = wrapper_name(version);
        v.absorb_all(wrapper.as_deref(), &contents);

        let content = contents.remove(0);
        Ok(Self {
            version,
            content,
            precedence,
            order,
            warnings: v.finish(),
        })
    }

    pub fn content(&self) -> &GeospatialContent {
        &self.content
    }

    pub fn precedence(&self) -> Option<&str> {
        self.precedence.as_deref()
    }

    pub fn order(&self) -> Option<i64> {
        self.order
    }
}

fn wrapper_name(version: DdmsVersion) -> Option<String> {
    version
        .has(Feature::CoverageWrappers)
        .then(|| version.qualified(Namespace::Ddms, WRAPPER))
}

impl Component for GeospatialCoverage {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let outer = Source::open(version, element, Namespace::Ddms, NAME)?;
        let precedence = outer.attr(Namespace::Ddms, "precedence");
        let order = outer.integer(outer.attr(Namespace::Ddms, "order"), "order")?;
        let source = if version.has(Feature::CoverageWrappers) {
            outer.wrapper(Namespace::Ddms, WRAPPER)?
        } else {
            outer
        };
        let mut contents = Vec::new();
        for name in CONTENT_NAMES {
            for child in source.children(Namespace::Ddms, name) {
                contents.push(source.parse::<GeospatialContent>(child)?);
            }
        }
        Self::validated(version, contents, precedence, order)
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
        let template = Template::new(self.version, Namespace::Ddms, NAME)
            .optional_attribute(Namespace::Ddms, "precedence", self.precedence.as_ref())
            .optional_attribute(Namespace::Ddms, "order", self.order);
        if self.version.has(Feature::CoverageWrappers) {
            template.wrapper(Namespace::Ddms, WRAPPER, |t| t.child(&self.content))
        } else {
            template.child(&self.content)
        }
    }
}

/// Fill exactly one of the content builders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeospatialCoverageBuilder {
    pub geographic_identifier: GeographicIdentifierBuilder,
    pub bounding_box: BoundingBoxBuilder,
    pub bounding_geometry: BoundingGeometryBuilder,
    pub postal_address: PostalAddressBuilder,
    pub vertical_extent: VerticalExtentBuilder,
    pub precedence: Option<String>,
    pub order: Option<i64>,
}

impl From<&GeospatialCoverage> for GeospatialCoverageBuilder {
    fn from(coverage: &GeospatialCoverage) -> Self {
        let mut builder = Self {
            precedence: coverage.precedence.clone(),
            order: coverage.order,
            ..Self::default()
        };
        match &coverage.content {
            GeospatialContent::GeographicIdentifier(c) => builder.geographic_identifier = c.into(),
            GeospatialContent::BoundingBox(c) => builder.bounding_box = c.into(),
            GeospatialContent::BoundingGeometry(c) => builder.bounding_geometry = c.into(),
            GeospatialContent::PostalAddress(c) => builder.postal_address = c.into(),
            GeospatialContent::VerticalExtent(c) => builder.vertical_extent = c.into(),
        }
        builder
    }
}

impl Builder for GeospatialCoverageBuilder {
    type Target = GeospatialCoverage;

    fn is_empty(&self) -> bool {
        self.geographic_identifier.is_empty()
            && self.bounding_box.is_empty()
            && self.bounding_geometry.is_empty()
            && self.postal_address.is_empty()
            && self.vertical_extent.is_empty()
            && self.precedence.is_none()
            && self.order.is_none()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<GeospatialCoverage>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        let contents = [
            self.geographic_identifier.commit(version)?.map(GeospatialContent::from),
            self.bounding_box.commit(version)?.map(GeospatialContent::from),
            self.bounding_geometry.commit(version)?.map(GeospatialContent::from),
            self.postal_address.commit(version)?.map(GeospatialContent::from),
            self.vertical_extent.commit(version)?.map(GeospatialContent::from),
        ];
        GeospatialCoverage::validated(
            version,
            contents.into_iter().flatten().collect(),
            self.precedence.clone(),
            self.order,
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geospatial::codes::CountryCode;

    const COUNTRY_CODES: &str = "urn:us:gov:ic:cvenum:irm:coi:countrycodes";

    fn usa(version: DdmsVersion) -> GeographicIdentifier {
        let code = CountryCode::new(version, COUNTRY_CODES, "USA").unwrap();
        GeographicIdentifier::new(version, &[], &[], Some(code), None, None).unwrap()
    }

    #[test]
    fn test_wrapper_before_4_0_1() {
        let bounding_box = BoundingBox::new(DdmsVersion::V3_1, 1.0, 2.0, 3.0, 4.0).unwrap();
        let coverage = GeospatialCoverage::new(DdmsVersion::V3_1, bounding_box, None, None).unwrap();
        let element = coverage.to_element();
        assert_eq!(element.children[0].name.lexical(), "ddms:GeospatialExtent");
        assert_eq!(element.children[0].children[0].name.lexical(), "ddms:boundingBox");
        assert!(coverage
            .to_text()
            .starts_with("geospatialCoverage.boundingBox.WestBL: 1\n"));

        let reparsed =
            GeospatialCoverage::from_xml(DdmsVersion::V3_1, &coverage.to_xml().unwrap()).unwrap();
        assert_eq!(reparsed, coverage);
    }

    #[test]
    fn test_missing_wrapper_fails() {
        let xml = r#"<ddms:geospatialCoverage xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.1/">
            <ddms:boundingBox><ddms:WestBL>1</ddms:WestBL></ddms:boundingBox>
        </ddms:geospatialCoverage>"#;
        let err = GeospatialCoverage::from_xml(DdmsVersion::V3_1, xml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ddms:geospatialCoverage: ddms:GeospatialExtent is required."
        );
    }

    #[test]
    fn test_exactly_one_content() {
        let xml = r#"<ddms:geospatialCoverage xmlns:ddms="urn:us:mil:ces:metadata:ddms:4">
            <ddms:geographicIdentifier><ddms:name>Alpha</ddms:name></ddms:geographicIdentifier>
            <ddms:geographicIdentifier><ddms:name>Bravo</ddms:name></ddms:geographicIdentifier>
        </ddms:geospatialCoverage>"#;
        let err = GeospatialCoverage::from_xml(DdmsVersion::V4_1, xml).unwrap_err();
        assert!(err.to_string().contains("Exactly 1 of geographicIdentifier"));

        let builder = GeospatialCoverageBuilder::default();
        assert_eq!(builder.commit(DdmsVersion::V4_1), Ok(None));
    }

    #[test]
    fn test_content_dispatch_rejects_unknown_elements() {
        let xml = r#"<ddms:virtualCoverage xmlns:ddms="urn:us:mil:ces:metadata:ddms:4" ddms:address="123.456.789.0"/>"#;
        let err = GeospatialContent::from_xml(DdmsVersion::V4_1, xml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ddms:virtualCoverage: Unexpected element virtualCoverage in namespace urn:us:mil:ces:metadata:ddms:4."
        );

        let xml = r#"<ddms:verticalExtent xmlns:ddms="urn:us:mil:ces:metadata:ddms:4"
            ddms:unitOfMeasure="Meter" ddms:datum="AGL">
            <ddms:minVerticalExtent>0.1</ddms:minVerticalExtent>
            <ddms:maxVerticalExtent>100.1</ddms:maxVerticalExtent>
        </ddms:verticalExtent>"#;
        let content = GeospatialContent::from_xml(DdmsVersion::V4_1, xml).unwrap();
        assert!(matches!(content, GeospatialContent::VerticalExtent(_)));
    }

    #[test]
    fn test_precedence_rules() {
        assert!(GeospatialCoverage::new(DdmsVersion::V4_1, usa(DdmsVersion::V4_1), Some("Primary"), Some(1)).is_ok());

        let err = GeospatialCoverage::new(DdmsVersion::V4_1, usa(DdmsVersion::V4_1), Some("Tertiary"), None)
            .unwrap_err();
        assert_eq!(err.message(), "The precedence must be one of Primary, Secondary.");

        let named = GeographicIdentifier::new(DdmsVersion::V4_1, &["Alpha"], &[], None, None, None).unwrap();
        let err = GeospatialCoverage::new(DdmsVersion::V4_1, named, Some("Primary"), None).unwrap_err();
        assert!(err.message().starts_with("The precedence attribute must only be applied"));

        let err = GeospatialCoverage::new(DdmsVersion::V4_0_1, usa(DdmsVersion::V4_0_1), None, Some(1))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "The order attribute cannot be used until DDMS 4.1 or later."
        );
    }

    #[test]
    fn test_child_warnings_are_located_under_wrapper() {
        let empty = PostalAddress::new(DdmsVersion::V3_0, &[], None, None, None, None).unwrap();
        let coverage = GeospatialCoverage::new(DdmsVersion::V3_0, empty, None, None).unwrap();
        assert_eq!(coverage.warnings().len(), 1);
        assert_eq!(
            coverage.warnings()[0].locator(),
            "ddms:geospatialCoverage/ddms:GeospatialExtent/ddms:postalAddress"
        );
    }

    #[test]
    fn test_builder_round_trip() {
        let coverage =
            GeospatialCoverage::new(DdmsVersion::V4_1, usa(DdmsVersion::V4_1), Some("Secondary"), Some(2))
                .unwrap();
        assert_eq!(
            GeospatialCoverageBuilder::from(&coverage).commit(DdmsVersion::V4_1),
            Ok(Some(coverage))
        );
    }
}

// crates/ddms-rs/src/geospatial/postal.rs

use super::codes::{CountryCode, CountryCodeBuilder};
use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

const NAME: &str = "postalAddress";

/// Whether the middle part of an address names a state or a province.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Region {
    State(String),
    Province(String),
}

impl Region {
    pub fn value(&self) -> &str {
        match self {
            Region::State(value) | Region::Province(value) => value,
        }
    }
}

/// A mailing address. Every part is optional, but a state and a province
/// cannot both be given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalAddress {
    version: DdmsVersion,
    streets: Vec<String>,
    city: Option<String>,
    region: Option<Region>,
    postal_code: Option<String>,
    country_code: Option<CountryCode>,
    warnings: Warnings,
}

impl PostalAddress {
    pub fn new(
        version: DdmsVersion,
        streets: &[&str],
        city: Option<&str>,
        region: Option<Region>,
        postal_code: Option<&str>,
        country_code: Option<CountryCode>,
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            streets.iter().map(|s| s.to_string()).collect(),
            city.map(str::to_string),
            region,
            postal_code.map(str::to_string),
            country_code,
        )
    }

    fn validated(
        version: DdmsVersion,
        streets: Vec<String>,
        city: Option<String>,
        region: Option<Region>,
        postal_code: Option<String>,
        country_code: Option<CountryCode>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, NAME);
        v.require_at_most(streets.len(), 6, "street elements")?;
        v.require_compatible(&country_code)?;
        v.absorb_all(None, &country_code);
        if streets.is_empty()
            && city.is_none()
            && region.is_none()
            && postal_code.is_none()
            && country_code.is_none()
        {
            v.warn("A completely empty ddms:postalAddress element was found.");
        }
        Ok(Self {
            version,
            streets,
            city,
            region,
            postal_code,
            country_code,
            warnings: v.finish(),
        })
    }

    pub fn streets(&self) -> &[String] {
        &self.streets
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn country_code(&self) -> Option<&CountryCode> {
        self.country_code.as_ref()
    }
}

/// Picks the state or the province, failing when both are present.
fn region(
    v: &Validator,
    state: Option<String>,
    province: Option<String>,
) -> Result<Option<Region>, ValidationError> {
    match (state, province) {
        (Some(_), Some(_)) => Err(v.fail("Only 1 of state or province can be used.")),
        (Some(state), None) => Ok(Some(Region::State(state))),
        (None, Some(province)) => Ok(Some(Region::Province(province))),
        (None, None) => Ok(None),
    }
}

impl Component for PostalAddress {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, NAME)?;
        let v = Validator::new(version, Namespace::Ddms, NAME);
        let region = region(
            &v,
            source.child_text(Namespace::Ddms, "state"),
            source.child_text(Namespace::Ddms, "province"),
        )?;
        Self::validated(
            version,
            source.child_texts(Namespace::Ddms, "street"),
            source.child_text(Namespace::Ddms, "city"),
            region,
            source.child_text(Namespace::Ddms, "postalCode"),
            source.component(Namespace::Ddms, "countryCode")?,
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
        let template = Template::new(self.version, Namespace::Ddms, NAME)
            .elements(Namespace::Ddms, "street", &self.streets)
            .optional_element(Namespace::Ddms, "city", self.city.as_deref());
        let template = match &self.region {
            Some(Region::State(state)) => template.element(Namespace::Ddms, "state", state),
            Some(Region::Province(province)) => {
                template.element(Namespace::Ddms, "province", province)
            }
            None => template,
        };
        template
            .optional_element(Namespace::Ddms, "postalCode", self.postal_code.as_deref())
            .optional_child(self.country_code.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostalAddressBuilder {
    pub streets: Vec<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: CountryCodeBuilder,
}

impl From<&PostalAddress> for PostalAddressBuilder {
    fn from(address: &PostalAddress) -> Self {
        let (state, province) = match &address.region {
            Some(Region::State(state)) => (Some(state.clone()), None),
            Some(Region::Province(province)) => (None, Some(province.clone())),
            None => (None, None),
        };
        Self {
            streets: address.streets.clone(),
            city: address.city.clone(),
            state,
            province,
            postal_code: address.postal_code.clone(),
            country_code: address
                .country_code
                .as_ref()
                .map(CountryCodeBuilder::from)
                .unwrap_or_default(),
        }
    }
}

impl Builder for PostalAddressBuilder {
    type Target = PostalAddress;

    fn is_empty(&self) -> bool {
        self.streets.iter().all(|s| s.is_empty())
            && self.city.is_none()
            && self.state.is_none()
            && self.province.is_none()
            && self.postal_code.is_none()
            && self.country_code.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<PostalAddress>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        let v = Validator::new(version, Namespace::Ddms, NAME);
        let region = region(&v, self.state.clone(), self.province.clone())?;
        let streets = self.streets.iter().filter(|s| !s.is_empty()).cloned().collect();
        PostalAddress::validated(
            version,
            streets,
            self.city.clone(),
            region,
            self.postal_code.clone(),
            self.country_code.commit(version)?,
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> PostalAddress {
        PostalAddress::new(
            DdmsVersion::V4_1,
            &["1600 Pennsylvania Avenue, NW"],
            Some("Washington"),
            Some(Region::State("DC".to_string())),
            Some("20500"),
            Some(
                CountryCode::new(DdmsVersion::V4_1, "urn:us:gov:ic:cvenum:irm:coi:countrycodes", "USA")
                    .unwrap(),
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_matches_value_path() {
        let xml = r#"<ddms:postalAddress xmlns:ddms="urn:us:mil:ces:metadata:ddms:4">
            <ddms:street>1600 Pennsylvania Avenue, NW</ddms:street>
            <ddms:city>Washington</ddms:city>
            <ddms:state>DC</ddms:state>
            <ddms:postalCode>20500</ddms:postalCode>
            <ddms:countryCode ddms:qualifier="urn:us:gov:ic:cvenum:irm:coi:countrycodes" ddms:value="USA"/>
        </ddms:postalAddress>"#;
        let parsed = PostalAddress::from_xml(DdmsVersion::V4_1, xml).unwrap();
        assert_eq!(parsed, address());
        assert!(parsed.warnings().is_empty());
        assert_eq!(parsed.region().map(Region::value), Some("DC"));
    }

    #[test]
    fn test_state_and_province_are_exclusive() {
        let builder = PostalAddressBuilder {
            state: Some("Virginia".to_string()),
            province: Some("Ontario".to_string()),
            ..PostalAddressBuilder::default()
        };
        let err = builder.commit(DdmsVersion::V4_1).unwrap_err();
        assert_eq!(err.message(), "Only 1 of state or province can be used.");
    }

    #[test]
    fn test_street_limit_and_empty_warning() {
        let streets = ["1", "2", "3", "4", "5", "6", "7"];
        let err = PostalAddress::new(DdmsVersion::V3_0, &streets, None, None, None, None).unwrap_err();
        assert_eq!(err.message(), "No more than 6 street elements can exist.");

        let empty = PostalAddress::new(DdmsVersion::V3_0, &[], None, None, None, None).unwrap();
        assert_eq!(
            empty.warnings()[0].message(),
            "A completely empty ddms:postalAddress element was found."
        );
    }

    #[test]
    fn test_builder_round_trip() {
        let address = address();
        assert_eq!(
            PostalAddressBuilder::from(&address).commit(DdmsVersion::V4_1),
            Ok(Some(address))
        );
    }
}

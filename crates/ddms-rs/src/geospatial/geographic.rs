// crates/ddms-rs/src/geospatial/geographic.rs

use super::codes::{
    CountryCode, CountryCodeBuilder, FacilityIdentifier, FacilityIdentifierBuilder, SubDivisionCode,
    SubDivisionCodeBuilder,
};
use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

const NAME: &str = "geographicIdentifier";

/// A place identified by name, region, code or facility.
///
/// A facility identifier stands alone; every other child may be combined.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeographicIdentifier {
    version: DdmsVersion,
    names: Vec<String>,
    regions: Vec<String>,
    country_code: Option<CountryCode>,
    sub_division_code: Option<SubDivisionCode>,
    facility_identifier: Option<FacilityIdentifier>,
    warnings: Warnings,
}

impl GeographicIdentifier {
    pub fn new(
        version: DdmsVersion,
        names: &[&str],
        regions: &[&str],
        country_code: Option<CountryCode>,
        sub_division_code: Option<SubDivisionCode>,
        facility_identifier: Option<FacilityIdentifier>,
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            names.iter().map(|s| s.to_string()).collect(),
            regions.iter().map(|s| s.to_string()).collect(),
            country_code,
            sub_division_code,
            facility_identifier,
        )
    }

    /// Identifies a facility and nothing else.
    pub fn facility(version: DdmsVersion, facility: FacilityIdentifier) -> Result<Self, ValidationError> {
        Self::validated(version, Vec::new(), Vec::new(), None, None, Some(facility))
    }

    fn validated(
        version: DdmsVersion,
        names: Vec<String>,
        regions: Vec<String>,
        country_code: Option<CountryCode>,
        sub_division_code: Option<SubDivisionCode>,
        facility_identifier: Option<FacilityIdentifier>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, NAME);
        let others = !names.is_empty()
            || !regions.is_empty()
            || country_code.is_some()
            || sub_division_code.is_some();
        if !others && facility_identifier.is_none() {
            return Err(v.fail(
                "At least 1 of name, region, countryCode, subDivisionCode or facilityIdentifier must exist.",
            ));
        }
        if others && facility_identifier.is_some() {
            return Err(v.fail("facilityIdentifier cannot be used in tandem with other components."));
        }
        v.require_compatible(&country_code)?;
        v.require_compatible(&sub_division_code)?;
        v.require_compatible(&facility_identifier)?;
        v.absorb_all(None, &country_code);
        v.absorb_all(None, &sub_division_code);
        v.absorb_all(None, &facility_identifier);
        if names.iter().chain(&regions).any(|s| s.trim().is_empty()) {
            v.warn("A ddms:name or ddms:region element was found with no value.");
        }
        Ok(Self {
            version,
            names,
            regions,
            country_code,
            sub_division_code,
            facility_identifier,
            warnings: v.finish(),
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn regions(&self) -> &[String] {
        &self.regions
    }

    pub fn country_code(&self) -> Option<&CountryCode> {
        self.country_code.as_ref()
    }

    pub fn sub_division_code(&self) -> Option<&SubDivisionCode> {
        self.sub_division_code.as_ref()
    }

    pub fn facility_identifier(&self) -> Option<&FacilityIdentifier> {
        self.facility_identifier.as_ref()
    }
}

impl Component for GeographicIdentifier {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, NAME)?;
        Self::validated(
            version,
            source.child_texts(Namespace::Ddms, "name"),
            source.child_texts(Namespace::Ddms, "region"),
            source.component(Namespace::Ddms, "countryCode")?,
            source.component(Namespace::Ddms, "subDivisionCode")?,
            source.component(Namespace::Ddms, "facilityIdentifier")?,
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
            .elements(Namespace::Ddms, "name", &self.names)
            .elements(Namespace::Ddms, "region", &self.regions)
            .optional_child(self.country_code.as_ref())
            .optional_child(self.sub_division_code.as_ref())
            .optional_child(self.facility_identifier.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeographicIdentifierBuilder {
    pub names: Vec<String>,
    pub regions: Vec<String>,
    pub country_code: CountryCodeBuilder,
    pub sub_division_code: SubDivisionCodeBuilder,
    pub facility_identifier: FacilityIdentifierBuilder,
}

impl From<&GeographicIdentifier> for GeographicIdentifierBuilder {
    fn from(identifier: &GeographicIdentifier) -> Self {
        Self {
            names: identifier.names.clone(),
            regions: identifier.regions.clone(),
            country_code: identifier
                .country_code
                .as_ref()
                .map(CountryCodeBuilder::from)
                .unwrap_or_default(),
            sub_division_code: identifier
                .sub_division_code
                .as_ref()
                .map(SubDivisionCodeBuilder::from)
                .unwrap_or_default(),
            facility_identifier: identifier
                .facility_identifier
                .as_ref()
                .map(FacilityIdentifierBuilder::from)
                .unwrap_or_default(),
        }
    }
}

impl Builder for GeographicIdentifierBuilder {
    type Target = GeographicIdentifier;

    fn is_empty(&self) -> bool {
        self.names.is_empty()
            && self.regions.is_empty()
            && self.country_code.is_empty()
            && self.sub_division_code.is_empty()
            && self.facility_identifier.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<GeographicIdentifier>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        GeographicIdentifier::validated(
            version,
            self.names.clone(),
            self.regions.clone(),
            self.country_code.commit(version)?,
            self.sub_division_code.commit(version)?,
            self.facility_identifier.commit(version)?,
        )
        .map(Some)
    }
}

// crates/ddms-rs/src/geospatial/codes.rs

//! Coded place references: country codes, subdivision codes and facility identifiers.

use crate::engine::attribute_component;
use crate::version::DdmsVersion;

attribute_component!(
    /// A country code from a named vocabulary such as `urn:us:gov:ic:cvenum:irm:coi:countrycodes`.
    CountryCode, CountryCodeBuilder, "countryCode" {
        qualifier: required "qualifier",
        value: required "value",
    }
);

attribute_component!(
    /// A country subdivision code (ISO 3166-2). Added in DDMS 4.1.
    SubDivisionCode, SubDivisionCodeBuilder, "subDivisionCode" {
        qualifier: required "qualifier",
        value: required "value",
    }
    since: DdmsVersion::V4_1,
);

attribute_component!(
    /// A facility identified by its Basic Encyclopedia number and O-suffix.
    FacilityIdentifier, FacilityIdentifierBuilder, "facilityIdentifier" {
        be_number: required "beNumber",
        osuffix: required "osuffix",
    }
);

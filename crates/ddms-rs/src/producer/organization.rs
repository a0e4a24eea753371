// crates/ddms-rs/src/producer/organization.rs

use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Feature, Namespace};
use crate::xml::Element;

pub(crate) fn element_name(version: DdmsVersion) -> &'static str {
    if version.has(Feature::CapitalizedEntityNames) {
        "Organization"
    } else {
        "organization"
    }
}

/// An organization acting as a producer.
///
/// `subOrganization` and `acronym` were added in DDMS 4.0.1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Organization {
    version: DdmsVersion,
    names: Vec<String>,
    phones: Vec<String>,
    emails: Vec<String>,
    sub_organizations: Vec<String>,
    acronym: Option<String>,
    warnings: Warnings,
}

impl Organization {
    pub fn new(
        version: DdmsVersion,
        names: &[&str],
        phones: &[&str],
        emails: &[&str],
        sub_organizations: &[&str],
        acronym: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            owned(names),
            owned(phones),
            owned(emails),
            owned(sub_organizations),
            acronym.map(str::to_string),
        )
    }

    fn validated(
        version: DdmsVersion,
        names: Vec<String>,
        phones: Vec<String>,
        emails: Vec<String>,
        sub_organizations: Vec<String>,
        acronym: Option<String>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, element_name(version));
        v.require_at_least(names.len(), 1, "name")?;
        for name in &names {
            v.require_text(name, "name")?;
        }
        if !sub_organizations.is_empty() {
            v.require_since(DdmsVersion::V4_0_1, "subOrganization element")?;
        }
        if acronym.is_some() {
            v.require_since(DdmsVersion::V4_0_1, "acronym attribute")?;
        }
        if sub_organizations.iter().any(|s| s.trim().is_empty()) {
            v.warn("A ddms:subOrganization element was found with no value.");
        }
        Ok(Self {
            version,
            names,
            phones,
            emails,
            sub_organizations,
            acronym,
            warnings: v.finish(),
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }

    pub fn sub_organizations(&self) -> &[String] {
        &self.sub_organizations
    }

    pub fn acronym(&self) -> Option<&str> {
        self.acronym.as_deref()
    }
}

impl Component for Organization {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, element_name(version))?;
        Self::validated(
            version,
            source.child_texts(Namespace::Ddms, "name"),
            source.child_texts(Namespace::Ddms, "phone"),
            source.child_texts(Namespace::Ddms, "email"),
            source.child_texts(Namespace::Ddms, "subOrganization"),
            source.attr(Namespace::Ddms, "acronym"),
        )
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        element_name(self.version)
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        Template::new(self.version, Namespace::Ddms, element_name(self.version))
            .optional_attribute(Namespace::Ddms, "acronym", self.acronym.as_ref())
            .elements(Namespace::Ddms, "name", &self.names)
            .elements(Namespace::Ddms, "phone", &self.phones)
            .elements(Namespace::Ddms, "email", &self.emails)
            .elements(Namespace::Ddms, "subOrganization", &self.sub_organizations)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrganizationBuilder {
    pub names: Vec<String>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub sub_organizations: Vec<String>,
    pub acronym: Option<String>,
}

impl From<&Organization> for OrganizationBuilder {
    fn from(organization: &Organization) -> Self {
        Self {
            names: organization.names.clone(),
            phones: organization.phones.clone(),
            emails: organization.emails.clone(),
            sub_organizations: organization.sub_organizations.clone(),
            acronym: organization.acronym.clone(),
        }
    }
}

impl Builder for OrganizationBuilder {
    type Target = Organization;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<Organization>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        Organization::validated(
            version,
            self.names.clone(),
            self.phones.clone(),
            self.emails.clone(),
            self.sub_organizations.clone(),
            self.acronym.clone(),
        )
        .map(Some)
    }
}

pub(super) fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_required() {
        let err = Organization::new(DdmsVersion::V4_1, &[], &[], &[], &[], None).unwrap_err();
        assert_eq!(err.message(), "At least 1 name must exist.");
        assert_eq!(err.locator(), "ddms:organization");

        let err = Organization::new(DdmsVersion::V3_0, &[""], &[], &[], &[], None).unwrap_err();
        assert_eq!(err.locator(), "ddms:Organization");
    }

    #[test]
    fn test_acronym_needs_4_0_1() {
        assert!(Organization::new(DdmsVersion::V3_1, &["DISA"], &[], &[], &[], Some("DISA")).is_err());
        let organization =
            Organization::new(DdmsVersion::V4_0_1, &["DISA"], &[], &[], &["Sales"], Some("DISA")).unwrap();
        assert_eq!(organization.acronym(), Some("DISA"));
    }

    #[test]
    fn test_parse_capitalized_name() {
        let xml = r#"<ddms:Organization xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/2.0/">
            <ddms:name>DISA</ddms:name><ddms:name>PEO-GES</ddms:name>
            <ddms:phone>703-882-1000</ddms:phone>
        </ddms:Organization>"#;
        let organization = Organization::from_xml(DdmsVersion::V2_0, xml).unwrap();
        assert_eq!(organization.names(), ["DISA", "PEO-GES"]);
        assert_eq!(
            organization.to_text(),
            "organization.name[1]: DISA\norganization.name[2]: PEO-GES\norganization.phone: 703-882-1000\n"
        );
        assert_eq!(
            OrganizationBuilder::from(&organization).commit(DdmsVersion::V2_0),
            Ok(Some(organization))
        );
    }
}

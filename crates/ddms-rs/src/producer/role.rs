// crates/ddms-rs/src/producer/role.rs

use super::organization::{self, Organization, OrganizationBuilder};
use super::person::{self, Person, PersonBuilder};
use crate::attributes::SecurityAttributes;
use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

/// The role a producer plays for the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProducerKind {
    Creator,
    Publisher,
    Contributor,
    PointOfContact,
}

impl ProducerKind {
    pub const ALL: [ProducerKind; 4] = [
        ProducerKind::Creator,
        ProducerKind::Publisher,
        ProducerKind::Contributor,
        ProducerKind::PointOfContact,
    ];

    pub fn element_name(self) -> &'static str {
        match self {
            ProducerKind::Creator => "creator",
            ProducerKind::Publisher => "publisher",
            ProducerKind::Contributor => "contributor",
            ProducerKind::PointOfContact => "pointOfContact",
        }
    }

    pub fn from_element_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.element_name() == name)
    }
}

/// The entity filling a producer role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Producer {
    Organization(Organization),
    Person(Person),
}

impl From<Organization> for Producer {
    fn from(organization: Organization) -> Self {
        Producer::Organization(organization)
    }
}

impl From<Person> for Producer {
    fn from(person: Person) -> Self {
        Producer::Person(person)
    }
}

impl Component for Producer {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        if element.name.local == person::element_name(version) {
            Person::from_element(version, element).map(Producer::Person)
        } else {
            Organization::from_element(version, element).map(Producer::Organization)
        }
    }

    fn version(&self) -> DdmsVersion {
        match self {
            Producer::Organization(o) => o.version(),
            Producer::Person(p) => p.version(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Producer::Organization(o) => o.name(),
            Producer::Person(p) => p.name(),
        }
    }

    fn warnings(&self) -> &[ValidationWarning] {
        match self {
            Producer::Organization(o) => o.warnings(),
            Producer::Person(p) => p.warnings(),
        }
    }

    fn template(&self) -> Template {
        match self {
            Producer::Organization(o) => o.template(),
            Producer::Person(p) => p.template(),
        }
    }
}

/// A producer in one of the four roles: `creator`, `publisher`, `contributor`
/// or `pointOfContact`.
///
/// ```xml
/// <ddms:creator ISM:classification="U" ISM:ownerProducer="USA">
///   <ddms:person><ddms:name>Brian</ddms:name><ddms:surname>Uri</ddms:surname></ddms:person>
/// </ddms:creator>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProducerRole {
    version: DdmsVersion,
    kind: ProducerKind,
    producer: Producer,
    poc_types: Vec<String>,
    security: SecurityAttributes,
    warnings: Warnings,
}

impl ProducerRole {
    /// `poc_types` is only allowed on a point of contact, from DDMS 4.1.
    pub fn new(
        version: DdmsVersion,
        kind: ProducerKind,
        producer: impl Into<Producer>,
        poc_types: &[&str],
        security: SecurityAttributes,
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            kind,
            vec![producer.into()],
            poc_types.iter().map(|s| s.to_string()).collect(),
            security,
        )
    }

    fn validated(
        version: DdmsVersion,
        kind: ProducerKind,
        mut producers: Vec<Producer>,
        poc_types: Vec<String>,
        security: SecurityAttributes,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, kind.element_name());
        if producers.len() != 1 {
            return Err(v.fail("Exactly 1 organization or person must exist."));
        }
        v.require_compatible(&producers)?;
        if !poc_types.is_empty() {
            if kind != ProducerKind::PointOfContact {
                return Err(v.fail("This producer type cannot have a POCType attribute."));
            }
            v.require_since(DdmsVersion::V4_1, "POCType attribute")?;
        }
        security.validate(&v)?;
        v.absorb_all(None, &producers);

        let producer = producers.remove(0);
        Ok(Self {
            version,
            kind,
            producer,
            poc_types,
            security,
            warnings: v.finish(),
        })
    }

    pub fn kind(&self) -> ProducerKind {
        self.kind
    }

    pub fn producer(&self) -> &Producer {
        &self.producer
    }

    pub fn poc_types(&self) -> &[String] {
        &self.poc_types
    }

    pub fn security_attributes(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl Component for ProducerRole {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let kind = ProducerKind::from_element_name(&element.name.local).unwrap_or(ProducerKind::Creator);
        let source = Source::open(version, element, Namespace::Ddms, kind.element_name())?;
        let organization = organization::element_name(version);
        let person = person::element_name(version);
        let producers = element
            .children
            .iter()
            .filter(|c| c.name.local == organization || c.name.local == person)
            .map(|c| source.parse::<Producer>(c))
            .collect::<Result<Vec<_>, _>>()?;
        let poc_types = source
            .attr(Namespace::Ddms, "POCType")
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        Self::validated(version, kind, producers, poc_types, SecurityAttributes::from_source(&source))
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        self.kind.element_name()
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        let poc_types = (!self.poc_types.is_empty()).then(|| self.poc_types.join(" "));
        Template::new(self.version, Namespace::Ddms, self.kind.element_name())
            .optional_attribute(Namespace::Ddms, "POCType", poc_types)
            .security(&self.security)
            .child(&self.producer)
    }
}

/// Builds a [`ProducerRole`]. Exactly one of the entity builders should be filled.
#[derive(Debug, Clone, PartialEq)]
pub struct ProducerRoleBuilder {
    pub kind: ProducerKind,
    pub organization: OrganizationBuilder,
    pub person: PersonBuilder,
    pub poc_types: Vec<String>,
    pub security: SecurityAttributes,
}

impl Default for ProducerRoleBuilder {
    fn default() -> Self {
        Self::new(ProducerKind::Creator)
    }
}

impl ProducerRoleBuilder {
    pub fn new(kind: ProducerKind) -> Self {
        Self {
            kind,
            organization: OrganizationBuilder::default(),
            person: PersonBuilder::default(),
            poc_types: Vec::new(),
            security: SecurityAttributes::default(),
        }
    }
}

impl From<&ProducerRole> for ProducerRoleBuilder {
    fn from(role: &ProducerRole) -> Self {
        let mut builder = Self::new(role.kind);
        match &role.producer {
            Producer::Organization(o) => builder.organization = OrganizationBuilder::from(o),
            Producer::Person(p) => builder.person = PersonBuilder::from(p),
        }
        builder.poc_types = role.poc_types.clone();
        builder.security = role.security.clone();
        builder
    }
}

impl Builder for ProducerRoleBuilder {
    type Target = ProducerRole;

    /// The role kind alone is not content.
    fn is_empty(&self) -> bool {
        self.organization.is_empty()
            && self.person.is_empty()
            && self.poc_types.is_empty()
            && self.security.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<ProducerRole>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        let mut producers = Vec::new();
        if let Some(organization) = self.organization.commit(version)? {
            producers.push(Producer::Organization(organization));
        }
        if let Some(person) = self.person.commit(version)? {
            producers.push(Producer::Person(person));
        }
        ProducerRole::validated(
            version,
            self.kind,
            producers,
            self.poc_types.clone(),
            self.security.clone(),
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(version: DdmsVersion) -> Person {
        Person::new(version, &["Brian"], "Uri", None, &[], &[], &[]).unwrap()
    }

    #[test]
    fn test_poc_type_rules() {
        let creator = ProducerRole::new(
            DdmsVersion::V4_1,
            ProducerKind::Creator,
            person(DdmsVersion::V4_1),
            &["DoD-Dist-B"],
            SecurityAttributes::default(),
        );
        assert_eq!(
            creator.unwrap_err().message(),
            "This producer type cannot have a POCType attribute."
        );

        let poc = |version| {
            ProducerRole::new(
                version,
                ProducerKind::PointOfContact,
                person(version),
                &["DoD-Dist-B"],
                SecurityAttributes::default(),
            )
        };
        assert!(poc(DdmsVersion::V4_0_1).is_err());
        assert!(poc(DdmsVersion::V4_1).is_ok());
    }

    #[test]
    fn test_child_version_must_match() {
        let err = ProducerRole::new(
            DdmsVersion::V4_1,
            ProducerKind::Publisher,
            person(DdmsVersion::V3_1),
            &[],
            SecurityAttributes::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.message(),
            "A child component, ddms:Person, is using a different version of DDMS."
        );
    }

    #[test]
    fn test_parse_and_labels() {
        let xml = r#"<ddms:pointOfContact xmlns:ddms="urn:us:mil:ces:metadata:ddms:4"
            xmlns:ISM="urn:us:gov:ic:ism" ddms:POCType="DoD-Dist-B" ISM:classification="U" ISM:ownerProducer="USA">
            <ddms:organization ddms:acronym="DISA"><ddms:name>DISA</ddms:name></ddms:organization>
        </ddms:pointOfContact>"#;
        let role = ProducerRole::from_xml(DdmsVersion::V4_1, xml).unwrap();
        assert_eq!(role.kind(), ProducerKind::PointOfContact);
        assert!(matches!(role.producer(), Producer::Organization(_)));
        assert_eq!(
            role.to_text(),
            "pointOfContact.POCType: DoD-Dist-B\n\
             pointOfContact.classification: U\n\
             pointOfContact.ownerProducer: USA\n\
             pointOfContact.organization.acronym: DISA\n\
             pointOfContact.organization.name: DISA\n"
        );
        assert_eq!(ProducerRoleBuilder::from(&role).commit(DdmsVersion::V4_1), Ok(Some(role)));
    }

    #[test]
    fn test_parse_failure_is_located() {
        let xml = r#"<ddms:creator xmlns:ddms="urn:us:mil:ces:metadata:ddms:4">
            <ddms:person><ddms:name>Brian</ddms:name></ddms:person>
        </ddms:creator>"#;
        let err = ProducerRole::from_xml(DdmsVersion::V4_1, xml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ddms:creator/ddms:person: surname is required."
        );
    }

    #[test]
    fn test_builder_with_both_entities_fails() {
        let mut builder = ProducerRoleBuilder::new(ProducerKind::Contributor);
        assert!(builder.is_empty());
        builder.person = PersonBuilder::from(&person(DdmsVersion::V4_1));
        builder.organization.names.push("DISA".to_string());
        let err = builder.commit(DdmsVersion::V4_1).unwrap_err();
        assert_eq!(err.message(), "Exactly 1 organization or person must exist.");
    }
}

// crates/ddms-rs/src/producer/person.rs

use super::organization::owned;
use crate::engine::{Builder, Component, Source, Template, ValidationWarning, Validator, Warnings};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Feature, Namespace};
use crate::xml::Element;

pub(crate) fn element_name(version: DdmsVersion) -> &'static str {
    if version.has(Feature::CapitalizedEntityNames) {
        "Person"
    } else {
        "person"
    }
}

/// A person acting as a producer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Person {
    version: DdmsVersion,
    names: Vec<String>,
    surname: String,
    user_id: Option<String>,
    affiliations: Vec<String>,
    phones: Vec<String>,
    emails: Vec<String>,
    warnings: Warnings,
}

impl Person {
    /// More than one affiliation needs DDMS 4.0.1.
    pub fn new(
        version: DdmsVersion,
        names: &[&str],
        surname: &str,
        user_id: Option<&str>,
        affiliations: &[&str],
        phones: &[&str],
        emails: &[&str],
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            Fields {
                names: owned(names),
                surname: surname.to_string(),
                user_id: user_id.map(str::to_string),
                affiliations: owned(affiliations),
                phones: owned(phones),
                emails: owned(emails),
            },
        )
    }

    fn validated(version: DdmsVersion, fields: Fields) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, element_name(version));
        v.require_at_least(fields.names.len(), 1, "name")?;
        for name in &fields.names {
            v.require_text(name, "name")?;
        }
        v.require_text(&fields.surname, "surname")?;
        if !version.is_at_least(DdmsVersion::V4_0_1) {
            v.require_at_most(fields.affiliations.len(), 1, "affiliation")?;
        }
        if fields.user_id.as_deref().is_some_and(|u| u.trim().is_empty()) {
            v.warn("A ddms:userID element was found with no value.");
        }
        Ok(Self {
            version,
            names: fields.names,
            surname: fields.surname,
            user_id: fields.user_id,
            affiliations: fields.affiliations,
            phones: fields.phones,
            emails: fields.emails,
            warnings: v.finish(),
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn surname(&self) -> &str {
        &self.surname
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn affiliations(&self) -> &[String] {
        &self.affiliations
    }

    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    pub fn emails(&self) -> &[String] {
        &self.emails
    }
}

struct Fields {
    names: Vec<String>,
    surname: String,
    user_id: Option<String>,
    affiliations: Vec<String>,
    phones: Vec<String>,
    emails: Vec<String>,
}

impl Component for Person {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, element_name(version))?;
        Self::validated(
            version,
            Fields {
                names: source.child_texts(Namespace::Ddms, "name"),
                surname: source.child_text(Namespace::Ddms, "surname").unwrap_or_default(),
                user_id: source.child_text(Namespace::Ddms, "userID"),
                affiliations: source.child_texts(Namespace::Ddms, "affiliation"),
                phones: source.child_texts(Namespace::Ddms, "phone"),
                emails: source.child_texts(Namespace::Ddms, "email"),
            },
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
            .elements(Namespace::Ddms, "name", &self.names)
            .element(Namespace::Ddms, "surname", &self.surname)
            .optional_element(Namespace::Ddms, "userID", self.user_id.as_ref())
            .elements(Namespace::Ddms, "affiliation", &self.affiliations)
            .elements(Namespace::Ddms, "phone", &self.phones)
            .elements(Namespace::Ddms, "email", &self.emails)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonBuilder {
    pub names: Vec<String>,
    pub surname: Option<String>,
    pub user_id: Option<String>,
    pub affiliations: Vec<String>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

impl From<&Person> for PersonBuilder {
    fn from(person: &Person) -> Self {
        Self {
            names: person.names.clone(),
            surname: Some(person.surname.clone()),
            user_id: person.user_id.clone(),
            affiliations: person.affiliations.clone(),
            phones: person.phones.clone(),
            emails: person.emails.clone(),
        }
    }
}

impl Builder for PersonBuilder {
    type Target = Person;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<Person>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        Person::validated(
            version,
            Fields {
                names: self.names.clone(),
                surname: self.surname.clone().unwrap_or_default(),
                user_id: self.user_id.clone(),
                affiliations: self.affiliations.clone(),
                phones: self.phones.clone(),
                emails: self.emails.clone(),
            },
        )
        .map(Some)
    }
}

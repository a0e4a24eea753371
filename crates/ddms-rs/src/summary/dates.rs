// crates/ddms-rs/src/summary/dates.rs

use crate::engine::{
    Builder, Component, DateValue, Source, Template, ValidationWarning, Validator, Warnings,
};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use crate::xml::Element;

const NAME: &str = "dates";

/// Dates associated with the lifecycle of the resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dates {
    version: DdmsVersion,
    created: Option<DateValue>,
    posted: Option<DateValue>,
    valid_til: Option<DateValue>,
    info_cut_off: Option<DateValue>,
    approved_on: Option<DateValue>,
    received_on: Option<DateValue>,
    warnings: Warnings,
}

/// Raw attribute values in output order.
#[derive(Debug, Clone, Default, PartialEq)]
struct Raw {
    created: Option<String>,
    posted: Option<String>,
    valid_til: Option<String>,
    info_cut_off: Option<String>,
    approved_on: Option<String>,
    received_on: Option<String>,
}

impl Dates {
    /// All dates are optional. `approved_on` needs DDMS 3.1 and `received_on`
    /// DDMS 4.0.1.
    pub fn new(
        version: DdmsVersion,
        created: Option<&str>,
        posted: Option<&str>,
        valid_til: Option<&str>,
        info_cut_off: Option<&str>,
        approved_on: Option<&str>,
        received_on: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let owned = |value: Option<&str>| value.map(str::to_string);
        Self::validated(
            version,
            Raw {
                created: owned(created),
                posted: owned(posted),
                valid_til: owned(valid_til),
                info_cut_off: owned(info_cut_off),
                approved_on: owned(approved_on),
                received_on: owned(received_on),
            },
        )
    }

    fn validated(version: DdmsVersion, raw: Raw) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, NAME);
        let date = |value: &Option<String>, field: &str| {
            value.as_deref().map(|d| v.require_date(d, field)).transpose()
        };
        let created = date(&raw.created, "created")?;
        let posted = date(&raw.posted, "posted")?;
        let valid_til = date(&raw.valid_til, "validTil")?;
        let info_cut_off = date(&raw.info_cut_off, "infoCutOff")?;
        let approved_on = date(&raw.approved_on, "approvedOn")?;
        let received_on = date(&raw.received_on, "receivedOn")?;

        if approved_on.is_some() {
            v.require_since(DdmsVersion::V3_1, "approvedOn attribute")?;
        }
        if received_on.is_some() {
            v.require_since(DdmsVersion::V4_0_1, "receivedOn attribute")?;
        }
        if raw == Raw::default() {
            v.warn("A completely empty ddms:dates element was found.");
        }

        Ok(Self {
            version,
            created,
            posted,
            valid_til,
            info_cut_off,
            approved_on,
            received_on,
            warnings: v.finish(),
        })
    }

    pub fn created(&self) -> Option<&DateValue> {
        self.created.as_ref()
    }

    pub fn posted(&self) -> Option<&DateValue> {
        self.posted.as_ref()
    }

    pub fn valid_til(&self) -> Option<&DateValue> {
        self.valid_til.as_ref()
    }

    pub fn info_cut_off(&self) -> Option<&DateValue> {
        self.info_cut_off.as_ref()
    }

    pub fn approved_on(&self) -> Option<&DateValue> {
        self.approved_on.as_ref()
    }

    pub fn received_on(&self) -> Option<&DateValue> {
        self.received_on.as_ref()
    }
}

impl Component for Dates {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, NAME)?;
        let attr = |name: &str| source.attr(Namespace::Ddms, name);
        Self::validated(
            version,
            Raw {
                created: attr("created"),
                posted: attr("posted"),
                valid_til: attr("validTil"),
                info_cut_off: attr("infoCutOff"),
                approved_on: attr("approvedOn"),
                received_on: attr("receivedOn"),
            },
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
            .optional_attribute(Namespace::Ddms, "created", self.created.as_ref())
            .optional_attribute(Namespace::Ddms, "posted", self.posted.as_ref())
            .optional_attribute(Namespace::Ddms, "validTil", self.valid_til.as_ref())
            .optional_attribute(Namespace::Ddms, "infoCutOff", self.info_cut_off.as_ref())
            .optional_attribute(Namespace::Ddms, "approvedOn", self.approved_on.as_ref())
            .optional_attribute(Namespace::Ddms, "receivedOn", self.received_on.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatesBuilder {
    pub created: Option<String>,
    pub posted: Option<String>,
    pub valid_til: Option<String>,
    pub info_cut_off: Option<String>,
    pub approved_on: Option<String>,
    pub received_on: Option<String>,
}

impl From<&Dates> for DatesBuilder {
    fn from(dates: &Dates) -> Self {
        let lexical = |value: &Option<DateValue>| value.as_ref().map(|d| d.as_str().to_string());
        Self {
            created: lexical(&dates.created),
            posted: lexical(&dates.posted),
            valid_til: lexical(&dates.valid_til),
            info_cut_off: lexical(&dates.info_cut_off),
            approved_on: lexical(&dates.approved_on),
            received_on: lexical(&dates.received_on),
        }
    }
}

impl Builder for DatesBuilder {
    type Target = Dates;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<Dates>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        Dates::validated(
            version,
            Raw {
                created: self.created.clone(),
                posted: self.posted.clone(),
                valid_til: self.valid_til.clone(),
                info_cut_off: self.info_cut_off.clone(),
                approved_on: self.approved_on.clone(),
                received_on: self.received_on.clone(),
            },
        )
        .map(Some)
    }
}

// crates/ddms-rs/src/engine/validation.rs

//! Rule helpers shared by every component's `validated` routine.
//!
//! A [`Validator`] is opened for one component under one version. Its
//! `require_*` helpers return the first fatal [`ValidationError`], located at
//! the component's qualified name; non-fatal findings are collected as
//! [`ValidationWarning`]s and handed back by [`Validator::finish`].

use super::component::Component;
use super::values::DateValue;
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Namespace};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

/// A non-fatal finding attached to a successfully constructed component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidationWarning {
    severity: Severity,
    message: String,
    locator: String,
}

impl ValidationWarning {
    pub fn new(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            locator: locator.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    fn within(&self, parent: &str) -> Self {
        Self {
            severity: self.severity,
            message: self.message.clone(),
            locator: format!("{}/{}", parent, self.locator),
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.locator, self.message)
    }
}

/// The warning list carried by a component.
///
/// Warnings are derived from the fields, so two components with equal fields
/// always have equal warnings. Equality and hashing ignore the list to keep
/// the derived impls on components purely structural.
#[derive(Debug, Clone, Default)]
pub struct Warnings(Vec<ValidationWarning>);

impl PartialEq for Warnings {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for Warnings {}

impl Hash for Warnings {
    fn hash<H: Hasher>(&self, _state: &mut H) {}
}

impl Deref for Warnings {
    type Target = [ValidationWarning];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Collects the rule outcomes for one component.
pub(crate) struct Validator {
    version: DdmsVersion,
    locator: String,
    warnings: Vec<ValidationWarning>,
}

impl Validator {
    pub(crate) fn new(version: DdmsVersion, namespace: Namespace, name: &str) -> Self {
        Self {
            version,
            locator: version.qualified(namespace, name),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn version(&self) -> DdmsVersion {
        self.version
    }

    pub(crate) fn fail(&self, message: impl Into<String>) -> ValidationError {
        ValidationError::new(self.locator.clone(), message)
    }

    // --- Presence ---

    /// Fails when `value` is missing or blank.
    pub(crate) fn require_text(&self, value: &str, field: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(self.fail(format!("{} is required.", field)));
        }
        Ok(())
    }

    pub(crate) fn require_some<T>(&self, value: Option<T>, field: &str) -> Result<T, ValidationError> {
        value.ok_or_else(|| self.fail(format!("{} is required.", field)))
    }

    // --- Format and range ---

    /// Fails when `value` lies outside the closed interval `[min, max]`.
    pub(crate) fn require_range(
        &self,
        value: f64,
        min: f64,
        max: f64,
        field: &str,
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(self.fail(format!("{} must be a finite number.", field)));
        }
        if value < min {
            return Err(self.fail(format!(
                "{} must be greater than or equal to {}.",
                field, min
            )));
        }
        if value > max {
            return Err(self.fail(format!("{} must be less than or equal to {}.", field, max)));
        }
        Ok(())
    }

    pub(crate) fn require_one_of(
        &self,
        value: &str,
        allowed: &[&str],
        field: &str,
    ) -> Result<(), ValidationError> {
        if !allowed.contains(&value) {
            return Err(self.fail(format!(
                "The {} must be one of {}.",
                field,
                allowed.join(", ")
            )));
        }
        Ok(())
    }

    /// Parses a date in any accepted precision.
    pub(crate) fn require_date(&self, value: &str, field: &str) -> Result<DateValue, ValidationError> {
        DateValue::parse(value)
            .ok_or_else(|| self.fail(format!("The {} date is not in a valid date format.", field)))
    }

    // --- Cross-version ---

    /// Fails when the component is validated under a revision older than `since`.
    pub(crate) fn require_since(&self, since: DdmsVersion, what: &str) -> Result<(), ValidationError> {
        if !self.version.is_at_least(since) {
            return Err(self.fail(format!(
                "The {} cannot be used until DDMS {} or later.",
                what, since
            )));
        }
        Ok(())
    }

    /// Fails when the component is validated under a revision newer than `until`.
    pub(crate) fn require_until(&self, until: DdmsVersion, what: &str) -> Result<(), ValidationError> {
        if self.version > until {
            return Err(self.fail(format!(
                "The {} can only be used in DDMS {} or earlier.",
                what, until
            )));
        }
        Ok(())
    }

    /// Fails when any child was validated under a different revision.
    pub(crate) fn require_compatible<'a, C, I>(&self, children: I) -> Result<(), ValidationError>
    where
        C: Component + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        for child in children {
            if child.version() != self.version {
                return Err(self.fail(format!(
                    "A child component, {}, is using a different version of DDMS.",
                    child.qualified_name()
                )));
            }
        }
        Ok(())
    }

    // --- Cardinality ---

    pub(crate) fn require_at_least(
        &self,
        count: usize,
        min: usize,
        field: &str,
    ) -> Result<(), ValidationError> {
        if count < min {
            return Err(self.fail(format!("At least {} {} must exist.", min, field)));
        }
        Ok(())
    }

    pub(crate) fn require_at_most(
        &self,
        count: usize,
        max: usize,
        field: &str,
    ) -> Result<(), ValidationError> {
        if count > max {
            return Err(self.fail(format!("No more than {} {} can exist.", max, field)));
        }
        Ok(())
    }

    // --- Warnings ---

    pub(crate) fn warn(&mut self, message: impl Into<String>) {
        self.warnings
            .push(ValidationWarning::new(self.locator.clone(), message));
    }

    /// Takes over a child's warnings, re-rooted under this component and an
    /// optional wrapper element.
    pub(crate) fn absorb<C: Component>(&mut self, wrapper: Option<&str>, child: &C) {
        let parent = match wrapper {
            Some(wrapper) => format!("{}/{}", self.locator, wrapper),
            None => self.locator.clone(),
        };
        self.warnings
            .extend(child.warnings().iter().map(|w| w.within(&parent)));
    }

    pub(crate) fn absorb_all<'a, C, I>(&mut self, wrapper: Option<&str>, children: I)
    where
        C: Component + 'a,
        I: IntoIterator<Item = &'a C>,
    {
        for child in children {
            self.absorb(wrapper, child);
        }
    }

    pub(crate) fn finish(self) -> Warnings {
        Warnings(self.warnings)
    }
}

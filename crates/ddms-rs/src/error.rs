// crates/ddms-rs/src/error.rs

use thiserror::Error;

/// A fatal rule violation. Construction of the component is aborted.
///
/// The `locator` is a structural path of qualified element names, such as
/// `ddms:geospatialCoverage/ddms:boundingBox`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{locator}: {message}")]
pub struct ValidationError {
    message: String,
    locator: String,
}

impl ValidationError {
    pub fn new(locator: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            locator: locator.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Re-roots the locator under an enclosing element.
    pub(crate) fn within(mut self, parent: &str) -> Self {
        self.locator = format!("{}/{}", parent, self.locator);
        self
    }
}

/// Errors raised by the schema version registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    /// The identifier does not name a supported DDMS revision.
    #[error("Unsupported DDMS version: {0}")]
    Unknown(String),

    /// A `VersionContext` was queried before a version was selected.
    #[error("No DDMS version has been selected")]
    NoneSelected,
}

/// Errors from reading or writing the XML element tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XmlError {
    /// The input is not well-formed XML.
    #[error("XML parsing error: {0}")]
    Malformed(String),

    /// The input contained no root element.
    #[error("XML document has no root element")]
    MissingRoot,

    /// The writer failed to emit an event.
    #[error("XML writing error: {0}")]
    Writing(String),
}

/// Umbrella error for the entry points that cross layers (text in, component out).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DdmsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Xml(#[from] XmlError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("ddms:boundingBox", "westBL is required.");
        assert_eq!(err.to_string(), "ddms:boundingBox: westBL is required.");
        assert_eq!(err.message(), "westBL is required.");
    }

    #[test]
    fn test_within_prefixes_locator() {
        let err = ValidationError::new("ddms:nonStateActor", "bad")
            .within("ddms:subjectCoverage")
            .within("ddms:resource");
        assert_eq!(
            err.locator(),
            "ddms:resource/ddms:subjectCoverage/ddms:nonStateActor"
        );
    }

    #[test]
    fn test_from_conversions() {
        let err: DdmsError = VersionError::Unknown("1.0".to_string()).into();
        assert!(matches!(err, DdmsError::Version(VersionError::Unknown(_))));
        assert_eq!(err.to_string(), "Unsupported DDMS version: 1.0");

        let err: DdmsError = XmlError::MissingRoot.into();
        assert!(matches!(err, DdmsError::Xml(XmlError::MissingRoot)));

        let err: DdmsError = ValidationError::new("ddms:title", "x").into();
        assert!(matches!(err, DdmsError::Validation(_)));
    }
}

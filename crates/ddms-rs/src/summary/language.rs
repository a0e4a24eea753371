// crates/ddms-rs/src/summary/language.rs

use crate::engine::{attribute_component, Validator};
use crate::error::ValidationError;

attribute_component!(
    /// The language of the intellectual content of the resource.
    Language, LanguageBuilder, "language" {
        qualifier: optional "qualifier",
        value: optional "value",
    }
    check: qualified_value,
);

/// A value needs a qualifier; a missing value only warns.
fn qualified_value(
    v: &mut Validator,
    (qualifier, value): (&Option<String>, &Option<String>),
) -> Result<(), ValidationError> {
    let has_qualifier = qualifier.as_deref().is_some_and(|q| !q.is_empty());
    let has_value = value.as_deref().is_some_and(|q| !q.is_empty());
    if has_value && !has_qualifier {
        return Err(v.fail("A qualifier attribute must be set if a value attribute is set."));
    }
    if !has_qualifier && !has_value {
        v.warn("A qualifier and value attribute were not set.");
    } else if !has_value {
        v.warn("A qualifier attribute was set without a value attribute.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Builder, Component};
    use crate::version::DdmsVersion;

    #[test]
    fn test_value_requires_qualifier() {
        let err = Language::new(DdmsVersion::V4_1, None, Some("en")).unwrap_err();
        assert_eq!(
            err.message(),
            "A qualifier attribute must be set if a value attribute is set."
        );
    }

    #[test]
    fn test_warnings() {
        let empty = Language::new(DdmsVersion::V4_1, None, None).unwrap();
        assert_eq!(empty.warnings()[0].message(), "A qualifier and value attribute were not set.");

        let partial = Language::new(DdmsVersion::V4_1, Some("ISO-639-1"), None).unwrap();
        assert_eq!(partial.warnings().len(), 1);

        let full = Language::new(DdmsVersion::V4_1, Some("ISO-639-1"), Some("en")).unwrap();
        assert!(full.warnings().is_empty());
        assert_eq!(full.to_text(), "language.qualifier: ISO-639-1\nlanguage.value: en\n");
    }

    #[test]
    fn test_parse() {
        let xml = r#"<ddms:language xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.0/"
            ddms:qualifier="ISO-639-1" ddms:value="en"/>"#;
        let language = Language::from_xml(DdmsVersion::V3_0, xml).unwrap();
        assert_eq!(language.value(), Some("en"));
        assert_eq!(
            LanguageBuilder::from(&language).commit(DdmsVersion::V3_0),
            Ok(Some(language))
        );
    }
}

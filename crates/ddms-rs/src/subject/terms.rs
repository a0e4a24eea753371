// crates/ddms-rs/src/subject/terms.rs

//! Keywords and categories.

use crate::engine::attribute_component;

attribute_component!(
    /// A single keyword describing the subject.
    Keyword, KeywordBuilder, "keyword" {
        value: required "value",
    }
);

attribute_component!(
    /// A category from a controlled vocabulary. Only the label is required.
    Category, CategoryBuilder, "category" {
        qualifier: optional "qualifier",
        code: optional "code",
        label: required "label",
    }
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Builder, Component};
    use crate::version::DdmsVersion;

    #[test]
    fn test_keyword() {
        let xml = r#"<ddms:keyword xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/2.0/" ddms:value="Tornado"/>"#;
        let keyword = Keyword::from_xml(DdmsVersion::V2_0, xml).unwrap();
        assert_eq!(keyword, Keyword::new(DdmsVersion::V2_0, "Tornado").unwrap());
        assert_eq!(keyword.to_text(), "keyword.value: Tornado\n");
        assert_eq!(
            Keyword::new(DdmsVersion::V2_0, "").unwrap_err().message(),
            "value attribute is required."
        );
    }

    #[test]
    fn test_category() {
        let category = Category::new(DdmsVersion::V4_1, Some("urn:vocab"), None, "Weather").unwrap();
        assert_eq!(
            category.to_text(),
            "category.qualifier: urn:vocab\ncategory.label: Weather\n"
        );
        assert!(Category::new(DdmsVersion::V4_1, Some("urn:vocab"), Some("W"), "").is_err());
        assert_eq!(
            CategoryBuilder::from(&category).commit(DdmsVersion::V4_1),
            Ok(Some(category))
        );
    }

    #[test]
    fn test_versions_are_not_equal() {
        let old = Keyword::new(DdmsVersion::V3_0, "Tornado").unwrap();
        let new = Keyword::new(DdmsVersion::V3_1, "Tornado").unwrap();
        assert_ne!(old, new);
    }
}

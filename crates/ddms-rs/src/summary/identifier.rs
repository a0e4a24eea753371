// crates/ddms-rs/src/summary/identifier.rs

use crate::engine::attribute_component;

attribute_component!(
    /// A unique identifier of the resource, such as a URI or a record number.
    ///
    /// ```xml
    /// <ddms:identifier ddms:qualifier="URI" ddms:value="urn:buri:ddmsence:testIdentifier" />
    /// ```
    Identifier, IdentifierBuilder, "identifier" {
        qualifier: required "qualifier",
        value: required "value",
    }
);

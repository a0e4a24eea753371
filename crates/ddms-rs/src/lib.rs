// crates/ddms-rs/src/lib.rs

#![doc = "Parses, validates and renders DDMS (DoD Discovery Metadata Specification) records."]
#![doc = ""]
#![doc = "Every component is an immutable, validated value tied to one schema revision"]
#![doc = "(2.0, 3.0, 3.1, 4.0.1 or 4.1). Components are built either from an XML element"]
#![doc = "(`Component::from_element`, `Component::from_xml`) or from plain values (each"]
#![doc = "type's `new`), and render to XML, HTML `<meta>` tags or `label: value` text."]
#![doc = ""]
#![doc = "It supports:"]
#![doc = "- `Resource::load`: Parsing a complete metacard under a chosen revision."]
#![doc = "- `Resource::load_detected`: Parsing a metacard, taking the revision from its namespace."]
#![doc = "- `Resource::to_xml_document`: Serializing a metacard back into a standalone document."]
#![doc = "- Mutable builders (`ResourceBuilder` and one per component) for editing records."]

// --- Crate Modules ---

pub mod attributes;
mod config;
pub mod engine;
mod error;
pub mod geospatial;
pub mod producer;
pub mod related;
mod resource;
mod security;
pub mod subject;
pub mod summary;
pub mod temporal;
mod version;
pub mod xml;

// --- Public API Re-exports ---

pub use config::RenderOptions;
pub use engine::{Builder, BuilderList, Component, Severity, ValidationWarning};
pub use error::{DdmsError, ValidationError, VersionError, XmlError};
pub use resource::{Resource, ResourceAttributes, ResourceBuilder, ResourceContent};
pub use security::{Security, SecurityBuilder};
pub use version::{DdmsVersion, Feature, Namespace, SchemaVersion, VersionContext};

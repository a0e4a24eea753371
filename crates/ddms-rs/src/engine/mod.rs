// crates/ddms-rs/src/engine/mod.rs

//! The shared component engine: the [`Component`] contract, the output
//! [`Template`], rule helpers, builders, field tables and value types.

mod builder;
mod component;
mod declare;
pub(crate) mod source;
mod template;
pub(crate) mod validation;
mod values;

pub use builder::{Builder, BuilderList, DoubleBuilder};
pub use component::Component;
pub(crate) use declare::{attribute_component, attribute_field};
pub(crate) use source::Source;
pub use template::Template;
pub(crate) use validation::Validator;
pub use validation::{Severity, ValidationWarning, Warnings};
pub use values::{DatePrecision, DateValue, Double};

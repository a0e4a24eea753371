// crates/ddms-rs/src/attributes/mod.rs

//! Attribute groups shared across components.

mod security;
mod srs;

pub use security::{CLASSIFICATIONS, SecurityAttributes};
pub use srs::SrsAttributes;

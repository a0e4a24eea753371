// crates/ddms-rs/src/producer/mod.rs

//! Producers of the resource and the roles they play.

mod organization;
mod person;
mod role;

pub use organization::{Organization, OrganizationBuilder};
pub use person::{Person, PersonBuilder};
pub use role::{Producer, ProducerKind, ProducerRole, ProducerRoleBuilder};

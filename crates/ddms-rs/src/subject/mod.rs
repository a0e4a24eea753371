// crates/ddms-rs/src/subject/mod.rs

//! Subject coverage: what the resource is about.

mod actors;
mod coverage;
mod terms;

pub use actors::{NonStateActor, NonStateActorBuilder, ProductionMetric, ProductionMetricBuilder};
pub use coverage::{SubjectCoverage, SubjectCoverageBuilder};
pub use terms::{Category, CategoryBuilder, Keyword, KeywordBuilder};

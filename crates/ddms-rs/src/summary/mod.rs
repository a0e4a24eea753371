// crates/ddms-rs/src/summary/mod.rs

//! Components describing the resource itself: how it is identified and named,
//! its language, lifecycle dates, rights and type.

mod dates;
mod identifier;
mod language;
mod resource_type;
mod rights;
mod text;

pub use dates::{Dates, DatesBuilder};
pub use identifier::{Identifier, IdentifierBuilder};
pub use language::{Language, LanguageBuilder};
pub use resource_type::{ResourceType, ResourceTypeBuilder};
pub use rights::{Rights, RightsBuilder};
pub use text::{
    Description, DescriptionBuilder, Subtitle, SubtitleBuilder, Title, TitleBuilder,
};

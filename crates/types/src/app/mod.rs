// Path: crates/types/src/app/mod.rs

mod certificate;
mod course;
mod enrollment;
mod organization;
mod quiz;
mod search;
mod user;

pub use certificate::*;
pub use course::*;
pub use enrollment::*;
pub use organization::*;
pub use quiz::*;
pub use search::*;
pub use user::*;

/// Backend documents are keyed by Mongo object ids rendered as strings.
pub type EntityId = String;

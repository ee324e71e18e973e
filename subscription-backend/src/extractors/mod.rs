// src/extractors/mod.rs
pub mod request;
pub mod uuid;

pub use request::{ValidatedJson, ValidatedQuery};
pub use self::uuid::ValidatedUuid;

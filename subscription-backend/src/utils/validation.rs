// src/utils/validation.rs

pub mod common;

pub use common::{validate_not_empty_or_whitespace, validate_service_name};

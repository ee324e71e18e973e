// src/types/mod.rs
pub mod month;
pub mod query;
pub mod response;

pub use month::{end_of_range_month, MonthDate, MonthParseError};
pub use query::{Page, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
pub use response::ApiResponse;

// src/repository/mod.rs
pub mod subscription_query;
pub mod subscription_repository;

pub use subscription_query::SubscriptionQuery;
pub use subscription_repository::{SubscriptionRepository, SubscriptionStore, UpdateOutcome};

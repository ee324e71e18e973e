// src/api/dto/mod.rs
pub mod subscription_dto;

pub use subscription_dto::{
    CreateSubscriptionDto, CreateSubscriptionResponse, DeleteSubscriptionResponse,
    SubscriptionDto, SubscriptionListQuery, TotalPriceQuery, TotalPriceResponse,
    UpdateSubscriptionDto, UpdateSubscriptionResponse,
};

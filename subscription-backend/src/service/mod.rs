// src/service/mod.rs
pub mod subscription_service;
pub mod validation;

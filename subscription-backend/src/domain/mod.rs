// src/domain/mod.rs
pub mod subscription_model;

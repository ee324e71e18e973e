// src/config.rs
mod app;

pub use app::{AppConfig, DatabaseConfig, ServerConfig};

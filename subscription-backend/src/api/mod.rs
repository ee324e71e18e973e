// src/api/mod.rs
use crate::config::ServerConfig;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::subscription_service::SubscriptionService;
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

pub mod dto;
pub mod handlers;

use handlers::{subscription_handler::subscription_router, system_handler::system_router};

/// 統一されたアプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub subscription_service: Arc<SubscriptionService>,
}

impl AppState {
    pub fn new(subscription_service: Arc<SubscriptionService>) -> Self {
        Self {
            subscription_service,
        }
    }
}

/// 全ルートとミドルウェアを組み立てる
///
/// レイヤーは下に書いたものほど外側で実行される。
pub fn build_app(app_state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(subscription_router(app_state.clone()))
        .merge(system_router(app_state))
        .layer(RequestBodyLimitLayer::new(server.body_limit))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
}

// src/main.rs
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use subscription_backend::api::{build_app, AppState};
use subscription_backend::config::AppConfig;
use subscription_backend::db::{create_db_pool, run_migrations};
use subscription_backend::service::subscription_service::SubscriptionService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // トレーシングの設定
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "subscription_backend=info,tower_http=info".into()),
        )
        .with(fmt::layer())
        .init();

    tracing::info!("Starting Subscription Backend server...");

    // 設定を読み込む
    let app_config = AppConfig::from_env().expect("Failed to load configuration");
    tracing::info!(
        environment = %app_config.environment,
        max_connections = app_config.database.max_connections,
        "Configuration loaded"
    );

    // データベース接続を作成
    let db_pool = Arc::new(
        create_db_pool(&app_config.database)
            .await
            .expect("Failed to create database pool"),
    );
    tracing::info!("Database pool created successfully.");

    if app_config.run_migrations {
        run_migrations(&db_pool)
            .await
            .expect("Failed to run database migrations");
        tracing::info!("Database migrations applied.");
    }

    let subscription_service = Arc::new(SubscriptionService::from_db(db_pool.clone()));
    let app_router = build_app(AppState::new(subscription_service), &app_config.server);

    // サーバーの起動
    let server_addr = app_config.server_addr();
    tracing::info!("Router configured. Server listening on {}", server_addr);

    let listener = TcpListener::bind(&server_addr).await?;
    axum::serve(listener, app_router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 処理中のリクエストが終わってから接続プールを閉じる
    match Arc::try_unwrap(db_pool) {
        Ok(db_pool) => db_pool.close().await?,
        Err(_) => tracing::warn!("Database pool is still shared, dropping without explicit close"),
    }
    tracing::info!("Server stopped.");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}

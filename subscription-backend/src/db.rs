// src/db.rs
use crate::config::DatabaseConfig;
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DbErr};

pub type DbPool = DatabaseConnection;

/// 設定に従って接続プールを作成する
pub async fn create_db_pool(config: &DatabaseConfig) -> Result<DbPool, DbErr> {
    Database::connect(config.connect_options()).await
}

/// 未適用のマイグレーションを実行する
pub async fn run_migrations(db: &DbPool) -> Result<(), DbErr> {
    Migrator::up(db, None).await
}

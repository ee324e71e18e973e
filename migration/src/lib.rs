// migration/src/lib.rs
pub use sea_orm_migration::prelude::*;

// サブスクリプション関連マイグレーション
mod m20250901_000001_create_subscriptions_table;
mod m20250901_000002_add_subscription_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            // 1. 基本テーブル作成
            Box::new(m20250901_000001_create_subscriptions_table::Migration),
            // 2. 一覧・集計クエリ用のインデックス
            Box::new(m20250901_000002_add_subscription_indexes::Migration),
        ]
    }
}

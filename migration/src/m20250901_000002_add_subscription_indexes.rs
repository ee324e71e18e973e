use sea_orm_migration::prelude::*;

use crate::m20250901_000001_create_subscriptions_table::Subscriptions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // user_id カラムにインデックスを追加（ユーザー単位の一覧・集計用）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_user_id")
                    .col(Subscriptions::UserId)
                    .to_owned(),
            )
            .await?;

        // start_date カラムにインデックスを追加（期間フィルタと並び順用）
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_start_date")
                    .col(Subscriptions::StartDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name("idx_subscriptions_start_date")
                    .table(Subscriptions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .name("idx_subscriptions_user_id")
                    .table(Subscriptions::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

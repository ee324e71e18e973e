use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists() // テーブルが存在しない場合のみ作成
                    .col(
                        ColumnDef::new(Subscriptions::Id)
                            .uuid()
                            .not_null()
                            .primary_key()
                            .default(Expr::cust("gen_random_uuid()")),
                    )
                    .col(ColumnDef::new(Subscriptions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Subscriptions::ServiceName).text().not_null())
                    .col(
                        ColumnDef::new(Subscriptions::Price)
                            .integer()
                            .not_null()
                            .check(Expr::col(Subscriptions::Price).gt(0)),
                    )
                    // 月単位の日付は常にその月の1日として保存する
                    .col(ColumnDef::new(Subscriptions::StartDate).date().not_null())
                    .col(ColumnDef::new(Subscriptions::EndDate).date())
                    .check(
                        Expr::col(Subscriptions::EndDate)
                            .is_null()
                            .or(Expr::col(Subscriptions::EndDate)
                                .gte(Expr::col(Subscriptions::StartDate))),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await
    }
}

/// Iden Enum for the 'subscriptions' table and its columns
#[derive(DeriveIden)]
pub(crate) enum Subscriptions {
    Table,
    Id,
    UserId,
    ServiceName,
    Price,
    StartDate,
    EndDate,
}

// src/repository/subscription_repository.rs
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    entity::*, query::*, DbConn, DbErr, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::subscription_model::{
    self, Column as SubscriptionColumn, Entity as SubscriptionEntity, NewSubscription,
    SubscriptionChanges,
};
use crate::repository::subscription_query::SubscriptionQuery;
use crate::types::Page;

/// 部分更新の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NotFound,
    /// 行は存在するが、変更後に `end_date < start_date` になる
    EndBeforeStart,
}

/// 永続化層の境界
///
/// 各メソッドはプールから接続を取得し、原則1文だけ実行して返す。
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn insert(&self, subscription: NewSubscription) -> Result<subscription_model::Model, DbErr>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<subscription_model::Model>, DbErr>;

    /// `start_date` 昇順（同値は id 順）
    async fn find_with_query(
        &self,
        query: &SubscriptionQuery,
        page: Page,
    ) -> Result<Vec<subscription_model::Model>, DbErr>;

    /// 片方の日付だけの変更は保存済みの値と突き合わせ、前後関係が崩れるなら書き込まない
    async fn update_fields(
        &self,
        id: Uuid,
        changes: SubscriptionChanges,
    ) -> Result<UpdateOutcome, DbErr>;

    /// 削除された行数を返す
    async fn delete_by_id(&self, id: Uuid) -> Result<u64, DbErr>;

    /// 該当行がなければ 0
    async fn sum_price(&self, query: &SubscriptionQuery) -> Result<i64, DbErr>;

    async fn ping(&self) -> Result<(), DbErr>;
}

pub struct SubscriptionRepository {
    db: Arc<DbConn>,
}

impl SubscriptionRepository {
    pub fn new(db: Arc<DbConn>) -> Self {
        Self { db }
    }

    pub fn into_inner(self) -> Arc<DbConn> {
        self.db
    }

    fn conn(&self) -> &DbConn {
        self.db.as_ref()
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DbErr> {
        Ok(SubscriptionEntity::find_by_id(id).count(self.conn()).await? > 0)
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    async fn insert(&self, subscription: NewSubscription) -> Result<subscription_model::Model, DbErr> {
        subscription.into_active_model().insert(self.conn()).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<subscription_model::Model>, DbErr> {
        SubscriptionEntity::find_by_id(id).one(self.conn()).await
    }

    async fn find_with_query(
        &self,
        query: &SubscriptionQuery,
        page: Page,
    ) -> Result<Vec<subscription_model::Model>, DbErr> {
        SubscriptionEntity::find()
            .filter(query.to_condition())
            .order_by_asc(SubscriptionColumn::StartDate)
            .order_by_asc(SubscriptionColumn::Id)
            .limit(page.limit)
            .offset(page.offset)
            .all(self.conn())
            .await
    }

    async fn update_fields(
        &self,
        id: Uuid,
        changes: SubscriptionChanges,
    ) -> Result<UpdateOutcome, DbErr> {
        // 更新対象のフィールドがなければ存在確認だけ行う
        if changes.is_empty() {
            return Ok(if self.exists(id).await? {
                UpdateOutcome::Updated
            } else {
                UpdateOutcome::NotFound
            });
        }

        let guard = changes.date_order_guard();
        let guarded = guard.is_some();

        let mut update = SubscriptionEntity::update_many()
            .set(changes.into_active_model())
            .filter(SubscriptionColumn::Id.eq(id));
        if let Some(guard) = guard {
            update = update.filter(guard);
        }

        let result = update.exec(self.conn()).await?;
        if result.rows_affected > 0 {
            return Ok(UpdateOutcome::Updated);
        }

        // 0件のとき、条件で弾かれたのか行がないのかを区別する
        if guarded && self.exists(id).await? {
            Ok(UpdateOutcome::EndBeforeStart)
        } else {
            Ok(UpdateOutcome::NotFound)
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = SubscriptionEntity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected)
    }

    async fn sum_price(&self, query: &SubscriptionQuery) -> Result<i64, DbErr> {
        let total = SubscriptionEntity::find()
            .select_only()
            .column_as(Expr::col(SubscriptionColumn::Price).sum(), "total")
            .filter(query.to_condition())
            .into_tuple::<Option<i64>>()
            .one(self.conn())
            .await?;

        // SUM は該当行がないと NULL を返す
        Ok(total.flatten().unwrap_or(0))
    }

    async fn ping(&self) -> Result<(), DbErr> {
        self.conn().ping().await
    }
}

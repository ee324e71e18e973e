// src/service/subscription_service.rs

use crate::api::dto::subscription_dto::{
    CreateSubscriptionDto, CreateSubscriptionResponse, DeleteSubscriptionResponse,
    SubscriptionDto, SubscriptionListQuery, TotalPriceQuery, TotalPriceResponse,
    UpdateSubscriptionDto, UpdateSubscriptionResponse,
};
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::log_with_context;
use crate::repository::{SubscriptionRepository, SubscriptionStore, UpdateOutcome};
use crate::service::validation::{self, DateRangeError, SUBSCRIPTION_PERIOD};
use sea_orm::DbErr;
use std::sync::Arc;
use uuid::Uuid;

/// サブスクリプションの作成・参照・更新・削除・集計
///
/// どの操作もバリデーションを通過した後にストアを1回だけ呼ぶ。
pub struct SubscriptionService {
    store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionService {
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    pub fn from_db(db_pool: Arc<DbPool>) -> Self {
        Self::new(Arc::new(SubscriptionRepository::new(db_pool)))
    }

    pub async fn create_subscription(
        &self,
        payload: CreateSubscriptionDto,
    ) -> AppResult<CreateSubscriptionResponse> {
        let new_subscription = validation::validate_create(&payload)?;
        let user_id = new_subscription.user_id;

        let created = self
            .store
            .insert(new_subscription)
            .await
            .map_err(|e| store_failure("create", None, e))?;

        log_with_context!(
            tracing::Level::INFO,
            "Subscription created",
            "subscription_id" => created.id,
            "user_id" => user_id,
        );

        Ok(CreateSubscriptionResponse { id: created.id })
    }

    /// 該当なしは `None`（エラーではない）
    pub async fn get_subscription(&self, id: Uuid) -> AppResult<Option<SubscriptionDto>> {
        let id = validation::validate_id(id)?;

        let subscription = self
            .store
            .find_by_id(id)
            .await
            .map_err(|e| store_failure("get", Some(id), e))?;

        Ok(subscription.map(Into::into))
    }

    pub async fn list_subscriptions(
        &self,
        query: SubscriptionListQuery,
    ) -> AppResult<Vec<SubscriptionDto>> {
        let (filter, page) = validation::validate_list(&query)?;

        let subscriptions = self
            .store
            .find_with_query(&filter, page)
            .await
            .map_err(|e| store_failure("list", None, e))?;

        log_with_context!(
            tracing::Level::DEBUG,
            "Subscriptions listed",
            "count" => subscriptions.len(),
            "limit" => page.limit,
            "offset" => page.offset,
        );

        Ok(subscriptions.into_iter().map(Into::into).collect())
    }

    /// 該当行がなければ `updated: false`。保存済みの日付と前後関係が崩れる変更はバリデーションエラー
    pub async fn update_subscription(
        &self,
        id: Uuid,
        payload: UpdateSubscriptionDto,
    ) -> AppResult<UpdateSubscriptionResponse> {
        let id = validation::validate_id(id)?;
        let changes = validation::validate_update(&payload)?;

        let outcome = self
            .store
            .update_fields(id, changes)
            .await
            .map_err(|e| store_failure("update", Some(id), e))?;

        match outcome {
            UpdateOutcome::Updated => {
                log_with_context!(
                    tracing::Level::INFO,
                    "Subscription updated",
                    "subscription_id" => id,
                    "has_changes" => payload.has_changes(),
                );
                Ok(UpdateSubscriptionResponse { updated: true })
            }
            UpdateOutcome::NotFound => Ok(UpdateSubscriptionResponse { updated: false }),
            UpdateOutcome::EndBeforeStart => Err(DateRangeError::EndBeforeStart {
                start: SUBSCRIPTION_PERIOD.start,
                end: SUBSCRIPTION_PERIOD.end,
            }
            .into()),
        }
    }

    /// 該当行がなければ `NotFound`
    pub async fn delete_subscription(&self, id: Uuid) -> AppResult<DeleteSubscriptionResponse> {
        let id = validation::validate_id(id)?;

        let rows = self
            .store
            .delete_by_id(id)
            .await
            .map_err(|e| store_failure("delete", Some(id), e))?;

        if rows == 0 {
            return Err(AppError::NotFound("subscription not found".to_string()));
        }

        log_with_context!(
            tracing::Level::INFO,
            "Subscription deleted",
            "subscription_id" => id,
        );

        Ok(DeleteSubscriptionResponse { deleted: true })
    }

    pub async fn total_price(&self, query: TotalPriceQuery) -> AppResult<TotalPriceResponse> {
        let filter = validation::validate_total(&query)?;

        let total = self
            .store
            .sum_price(&filter)
            .await
            .map_err(|e| store_failure("total", None, e))?;

        Ok(TotalPriceResponse { total })
    }

    /// ヘルスチェック用の疎通確認
    pub async fn check_store(&self) -> AppResult<()> {
        self.store
            .ping()
            .await
            .map_err(|e| store_failure("ping", None, e))
    }
}

/// ストア呼び出しの失敗を操作名付きで記録し、そのまま返す
fn store_failure(operation: &'static str, id: Option<Uuid>, err: DbErr) -> AppError {
    log_with_context!(
        tracing::Level::ERROR,
        "Subscription store failure",
        "operation" => operation,
        "subscription_id" => id,
        "error" => err.to_string(),
    );
    AppError::DbErr(err)
}

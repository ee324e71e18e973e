// src/api/dto/subscription_dto.rs
use crate::domain::subscription_model;
use crate::types::query::empty_string_as_none;
use crate::types::MonthDate;
use crate::utils::validation::common;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- Request DTOs ---

/// 作成リクエスト
///
/// 欠けたフィールドはゼロ値として受け取り、必須チェックはバリデーション層で行う。
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
#[serde(default)]
pub struct CreateSubscriptionDto {
    pub user_id: Uuid,

    #[validate(
        length(
            max = common::subscription::SERVICE_NAME_MAX_LENGTH,
            message = "Service name must not exceed 255 characters"
        ),
        custom(function = common::validate_service_name)
    )]
    pub service_name: String,

    pub price: i32,
    pub start_date: String, // MM-YYYY
    pub end_date: Option<String>,
}

/// 部分更新リクエスト。省略したフィールドは変更しない
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
#[serde(default)]
pub struct UpdateSubscriptionDto {
    #[validate(
        length(
            max = common::subscription::SERVICE_NAME_MAX_LENGTH,
            message = "Service name must not exceed 255 characters"
        ),
        custom(function = common::validate_service_name)
    )]
    pub service_name: Option<String>,

    pub price: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl UpdateSubscriptionDto {
    pub fn has_changes(&self) -> bool {
        self.service_name.is_some()
            || self.price.is_some()
            || self.start_date.is_some()
            || self.end_date.is_some()
    }
}

/// 一覧取得のクエリパラメータ（空値は未指定扱い）
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
pub struct SubscriptionListQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub user_id: Option<Uuid>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub service_name: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub from: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub to: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub limit: Option<i64>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = 0, message = "offset must not be negative"))]
    pub offset: Option<i64>,
}

/// 合計金額のクエリパラメータ。`from` / `to` は必須
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct TotalPriceQuery {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub user_id: Option<Uuid>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub service_name: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub from: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub to: Option<String>,
}

// --- Response DTOs ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionDto {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub start_date: MonthDate,
    pub end_date: Option<MonthDate>,
}

impl From<subscription_model::Model> for SubscriptionDto {
    fn from(model: subscription_model::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            service_name: model.service_name,
            price: model.price,
            start_date: MonthDate::from_date(model.start_date),
            end_date: model.end_date.map(MonthDate::from_date),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateSubscriptionResponse {
    pub id: Uuid,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdateSubscriptionResponse {
    pub updated: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DeleteSubscriptionResponse {
    pub deleted: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TotalPriceResponse {
    pub total: i64,
}

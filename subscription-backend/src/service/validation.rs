// src/service/validation.rs

//! リクエストのバリデーション
//!
//! ストアを呼ぶ前に実行する純粋関数群。最初に失敗したチェックで
//! `AppError::ValidationError` を返し、以降のチェックは行わない。

use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::subscription_dto::{
    CreateSubscriptionDto, SubscriptionListQuery, TotalPriceQuery, UpdateSubscriptionDto,
};
use crate::domain::subscription_model::{NewSubscription, SubscriptionChanges};
use crate::error::{AppError, AppResult};
use crate::repository::SubscriptionQuery;
use crate::types::{MonthDate, Page};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateRangeError {
    #[error("invalid {field} format, expected MM-YYYY")]
    InvalidFormat { field: &'static str },

    #[error("{end} cannot be before {start}")]
    EndBeforeStart {
        start: &'static str,
        end: &'static str,
    },
}

/// 期間の両端のフィールド名（エラーメッセージ用）
#[derive(Debug, Clone, Copy)]
pub struct RangeFields {
    pub start: &'static str,
    pub end: &'static str,
}

/// サブスクリプションの契約期間
pub const SUBSCRIPTION_PERIOD: RangeFields = RangeFields {
    start: "start_date",
    end: "end_date",
};

/// 一覧・集計の絞り込み期間
pub const FILTER_PERIOD: RangeFields = RangeFields {
    start: "from",
    end: "to",
};

/// 検証済みの期間。どちらの端も省略可能
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<MonthDate>,
    pub end: Option<MonthDate>,
}

/// 指定された端をそれぞれパースし、両方あれば `end >= start` を確認する（同月は可）
pub fn validate_date_range(
    start: Option<&str>,
    end: Option<&str>,
    fields: RangeFields,
) -> Result<DateRange, DateRangeError> {
    let start = start.map(|s| parse_month(s, fields.start)).transpose()?;
    let end = end.map(|s| parse_month(s, fields.end)).transpose()?;

    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(DateRangeError::EndBeforeStart {
                start: fields.start,
                end: fields.end,
            });
        }
    }

    Ok(DateRange { start, end })
}

fn parse_month(value: &str, field: &'static str) -> Result<MonthDate, DateRangeError> {
    MonthDate::parse(value).map_err(|_| DateRangeError::InvalidFormat { field })
}

/// 空文字列は未指定として扱う
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn invalid(message: &str) -> AppError {
    AppError::ValidationError(message.to_string())
}

pub fn validate_id(id: Uuid) -> AppResult<Uuid> {
    if id.is_nil() {
        return Err(invalid("id is required"));
    }
    Ok(id)
}

pub fn validate_create(dto: &CreateSubscriptionDto) -> AppResult<NewSubscription> {
    if dto.user_id.is_nil() {
        return Err(invalid("user_id is required"));
    }
    if dto.service_name.trim().is_empty() {
        return Err(invalid("service_name is required"));
    }
    if dto.price <= 0 {
        return Err(invalid("price must be greater than 0"));
    }
    let start_date =
        non_empty(Some(dto.start_date.as_str())).ok_or_else(|| invalid("start_date is required"))?;

    let range = validate_date_range(
        Some(start_date),
        non_empty(dto.end_date.as_deref()),
        SUBSCRIPTION_PERIOD,
    )?;
    let start = range
        .start
        .ok_or_else(|| invalid("start_date is required"))?;

    dto.validate()?;

    Ok(NewSubscription {
        user_id: dto.user_id,
        service_name: dto.service_name.trim().to_string(),
        price: dto.price,
        start_date: start.first_day(),
        end_date: range.end.map(|m| m.first_day()),
    })
}

/// 省略されたフィールドは `None` のまま残し、現在値を保持させる
pub fn validate_update(dto: &UpdateSubscriptionDto) -> AppResult<SubscriptionChanges> {
    if let Some(price) = dto.price {
        if price <= 0 {
            return Err(invalid("price must be greater than 0"));
        }
    }
    if let Some(service_name) = &dto.service_name {
        if service_name.trim().is_empty() {
            return Err(invalid("service_name must not be empty"));
        }
    }

    // 片方だけ指定された場合、保存済みの値との前後関係は更新文の条件で確認する
    let range = validate_date_range(
        non_empty(dto.start_date.as_deref()),
        non_empty(dto.end_date.as_deref()),
        SUBSCRIPTION_PERIOD,
    )?;

    dto.validate()?;

    Ok(SubscriptionChanges {
        service_name: dto.service_name.as_ref().map(|s| s.trim().to_string()),
        price: dto.price,
        start_date: range.start.map(|m| m.first_day()),
        end_date: range.end.map(|m| m.first_day()),
    })
}

pub fn validate_list(query: &SubscriptionListQuery) -> AppResult<(SubscriptionQuery, Page)> {
    query.validate()?;

    let range = validate_date_range(
        non_empty(query.from.as_deref()),
        non_empty(query.to.as_deref()),
        FILTER_PERIOD,
    )?;

    let filter = build_filter(query.user_id, query.service_name.as_deref(), range);
    Ok((filter, Page::resolve(query.limit, query.offset)))
}

pub fn validate_total(query: &TotalPriceQuery) -> AppResult<SubscriptionQuery> {
    let from = non_empty(query.from.as_deref()).ok_or_else(|| invalid("from is required"))?;
    let to = non_empty(query.to.as_deref()).ok_or_else(|| invalid("to is required"))?;

    let range = validate_date_range(Some(from), Some(to), FILTER_PERIOD)?;
    Ok(build_filter(
        query.user_id,
        query.service_name.as_deref(),
        range,
    ))
}

/// `from` は月初以降、`to` はその月の末日以前として絞り込む
fn build_filter(
    user_id: Option<Uuid>,
    service_name: Option<&str>,
    range: DateRange,
) -> SubscriptionQuery {
    let mut filter = SubscriptionQuery::new();

    if let Some(user_id) = user_id {
        filter = filter.for_user(user_id);
    }
    if let Some(name) = service_name.map(str::trim).filter(|n| !n.is_empty()) {
        filter = filter.service_name_contains(name);
    }
    if let Some(from) = range.start {
        filter = filter.starting_from(from.first_day());
    }
    if let Some(to) = range.end {
        filter = filter.starting_until(to.last_day());
    }

    filter
}

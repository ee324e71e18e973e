// src/repository/subscription_query.rs

//! 一覧取得・集計で共有するフィルタ条件
//!
//! 指定された条件だけを `Condition::all()` に積み上げる。値は常にバインド
//! パラメータとして渡し、SQL文字列へ直接埋め込まない。

use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{ColumnTrait, Condition};
use uuid::Uuid;

use crate::domain::subscription_model::{self, Column as SubscriptionColumn};

const LIKE_ESCAPE: char = '\\';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionQuery {
    user_id: Option<Uuid>,
    service_name_contains: Option<String>,
    start_from: Option<NaiveDate>,
    start_until: Option<NaiveDate>,
}

impl SubscriptionQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// サービス名の部分一致（大文字小文字を区別しない）
    pub fn service_name_contains(mut self, service_name: impl Into<String>) -> Self {
        self.service_name_contains = Some(service_name.into());
        self
    }

    /// `start_date >= date`
    pub fn starting_from(mut self, date: NaiveDate) -> Self {
        self.start_from = Some(date);
        self
    }

    /// `start_date <= date`
    pub fn starting_until(mut self, date: NaiveDate) -> Self {
        self.start_until = Some(date);
        self
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    pub fn service_name(&self) -> Option<&str> {
        self.service_name_contains.as_deref()
    }

    pub fn start_from(&self) -> Option<NaiveDate> {
        self.start_from
    }

    pub fn start_until(&self) -> Option<NaiveDate> {
        self.start_until
    }

    pub fn to_condition(&self) -> Condition {
        let mut conditions = Condition::all();

        // ユーザーフィルタ
        if let Some(user_id) = self.user_id {
            conditions = conditions.add(SubscriptionColumn::UserId.eq(user_id));
        }

        // サービス名検索
        if let Some(service_name) = &self.service_name_contains {
            let pattern = format!("%{}%", escape_like(&service_name.to_lowercase()));
            conditions = conditions.add(
                Expr::expr(Func::lower(Expr::col((
                    subscription_model::Entity,
                    SubscriptionColumn::ServiceName,
                ))))
                .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE)),
            );
        }

        // 開始月フィルタ
        if let Some(from) = self.start_from {
            conditions = conditions.add(SubscriptionColumn::StartDate.gte(from));
        }

        if let Some(until) = self.start_until {
            conditions = conditions.add(SubscriptionColumn::StartDate.lte(until));
        }

        conditions
    }
}

/// LIKE のワイルドカードをリテラルとして扱う
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

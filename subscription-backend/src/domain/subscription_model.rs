// src/domain/subscription_model.rs
use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, Condition, NotSet, Set};
use serde::{Deserialize, Serialize};

/// サブスクリプションエンティティ
///
/// `start_date` / `end_date` は常にその月の1日として保存される。
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub service_name: String,
    pub price: i32,
    pub start_date: NaiveDate,
    #[sea_orm(nullable)]
    pub end_date: Option<NaiveDate>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// 作成時の入力（検証済み・保存形式）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub user_id: Uuid,
    pub service_name: String,
    pub price: i32,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

impl NewSubscription {
    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(self.user_id),
            service_name: Set(self.service_name),
            price: Set(self.price),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
        }
    }
}

/// 部分更新の入力。`None` のフィールドは現在の値を保持する
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionChanges {
    pub service_name: Option<String>,
    pub price: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SubscriptionChanges {
    pub fn is_empty(&self) -> bool {
        self.service_name.is_none()
            && self.price.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
    }

    /// 指定されたフィールドだけを Set にした ActiveModel（id は NotSet のまま）
    pub fn into_active_model(self) -> ActiveModel {
        fn set_if<T: Into<sea_orm::Value>>(value: Option<T>) -> ActiveValue<T> {
            value.map_or(NotSet, Set)
        }

        ActiveModel {
            id: NotSet,
            user_id: NotSet,
            service_name: set_if(self.service_name),
            price: set_if(self.price),
            start_date: set_if(self.start_date),
            end_date: set_if(self.end_date.map(Some)),
        }
    }

    /// 片方の日付だけを変更するとき、保存済みのもう片方との前後関係を保つ条件
    ///
    /// 両方指定された場合は検証済みなので条件は不要。
    pub fn date_order_guard(&self) -> Option<Condition> {
        match (self.start_date, self.end_date) {
            (None, Some(end)) => Some(Condition::all().add(Column::StartDate.lte(end))),
            (Some(start), None) => Some(
                Condition::any()
                    .add(Column::EndDate.is_null())
                    .add(Column::EndDate.gte(start)),
            ),
            _ => None,
        }
    }

    /// 読み出し済みの行に同じ変更を適用する
    pub fn apply_to(&self, model: &mut Model) {
        if let Some(service_name) = &self.service_name {
            model.service_name = service_name.clone();
        }
        if let Some(price) = self.price {
            model.price = price;
        }
        if let Some(start_date) = self.start_date {
            model.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            model.end_date = Some(end_date);
        }
    }
}

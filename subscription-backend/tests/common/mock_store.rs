// tests/common/mock_store.rs

use async_trait::async_trait;
use sea_orm::DbErr;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use subscription_backend::domain::subscription_model::{Model, NewSubscription, SubscriptionChanges};
use subscription_backend::repository::{SubscriptionQuery, SubscriptionStore, UpdateOutcome};
use subscription_backend::types::Page;
use uuid::Uuid;

/// テスト用のインメモリストア
///
/// 呼び出し回数を数え、`fail_with` で以降の呼び出しをすべて失敗させられる。
#[derive(Clone, Default)]
pub struct MockSubscriptionStore {
    rows: Arc<Mutex<HashMap<Uuid, Model>>>,
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MockSubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_with_db_error(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn get(&self, id: Uuid) -> Option<Model> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    /// ストアを経由せずに行を直接入れる
    pub fn seed(&self, model: Model) {
        self.rows.lock().unwrap().insert(model.id, model);
    }

    fn enter(&self) -> Result<(), DbErr> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DbErr::Custom("mock store failure".to_string()));
        }
        Ok(())
    }

    fn matching(&self, query: &SubscriptionQuery) -> Vec<Model> {
        let rows = self.rows.lock().unwrap();
        let mut matched: Vec<Model> = rows
            .values()
            .filter(|m| query.user_id().map_or(true, |u| m.user_id == u))
            .filter(|m| {
                query.service_name().map_or(true, |name| {
                    m.service_name
                        .to_lowercase()
                        .contains(&name.to_lowercase())
                })
            })
            .filter(|m| query.start_from().map_or(true, |from| m.start_date >= from))
            .filter(|m| query.start_until().map_or(true, |until| m.start_date <= until))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
        matched
    }
}

#[async_trait]
impl SubscriptionStore for MockSubscriptionStore {
    async fn insert(&self, subscription: NewSubscription) -> Result<Model, DbErr> {
        self.enter()?;
        let model = Model {
            id: Uuid::new_v4(),
            user_id: subscription.user_id,
            service_name: subscription.service_name,
            price: subscription.price,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
        };
        self.rows.lock().unwrap().insert(model.id, model.clone());
        Ok(model)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Model>, DbErr> {
        self.enter()?;
        Ok(self.get(id))
    }

    async fn find_with_query(
        &self,
        query: &SubscriptionQuery,
        page: Page,
    ) -> Result<Vec<Model>, DbErr> {
        self.enter()?;
        Ok(self
            .matching(query)
            .into_iter()
            .skip(page.offset as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn update_fields(
        &self,
        id: Uuid,
        changes: SubscriptionChanges,
    ) -> Result<UpdateOutcome, DbErr> {
        self.enter()?;
        let mut rows = self.rows.lock().unwrap();
        match rows.get_mut(&id) {
            Some(model) if !keeps_date_order(&changes, model) => Ok(UpdateOutcome::EndBeforeStart),
            Some(model) => {
                changes.apply_to(model);
                Ok(UpdateOutcome::Updated)
            }
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<u64, DbErr> {
        self.enter()?;
        Ok(u64::from(self.rows.lock().unwrap().remove(&id).is_some()))
    }

    async fn sum_price(&self, query: &SubscriptionQuery) -> Result<i64, DbErr> {
        self.enter()?;
        Ok(self.matching(query).iter().map(|m| i64::from(m.price)).sum())
    }

    async fn ping(&self) -> Result<(), DbErr> {
        self.enter()
    }
}

/// 変更を適用した後も `end_date >= start_date` が成り立つか
fn keeps_date_order(changes: &SubscriptionChanges, model: &Model) -> bool {
    let start = changes.start_date.unwrap_or(model.start_date);
    changes
        .end_date
        .or(model.end_date)
        .map_or(true, |end| end >= start)
}

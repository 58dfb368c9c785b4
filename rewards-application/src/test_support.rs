use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use rewards_domain::ports::{Clock, RecordStore};
use rewards_domain::{DateWindow, NewTransaction, PointEvent, RuntimeConfig, Transaction};

use crate::{AppState, Metrics};

#[derive(Default)]
pub(crate) struct FakeStore {
    pub points: Mutex<Vec<PointEvent>>,
    pub transactions: Mutex<Vec<Transaction>>,
    pub fail_inserts: bool,
    pub fail_point_queries: bool,
    pub fail_transaction_queries: bool,
}

impl FakeStore {
    pub fn point_count(&self) -> usize {
        self.points.lock().map(|rows| rows.len()).unwrap_or_default()
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.lock().map(|rows| rows.len()).unwrap_or_default()
    }

    pub fn seed_point(&self, id: &str, user_id: &str, points: i64, occurred_at: NaiveDateTime) {
        self.points.lock().expect("points lock").push(PointEvent {
            id: id.to_string(),
            user_id: user_id.to_string(),
            points,
            occurred_at,
        });
    }

    pub fn seed_transaction(&self, id: &str, user_id: &str, occurred_at: NaiveDateTime) {
        self.transactions
            .lock()
            .expect("transactions lock")
            .push(Transaction {
                id: id.to_string(),
                user_id: user_id.to_string(),
                description: "benefit".to_string(),
                points: 25,
                occurred_at,
            });
    }
}

fn matches(user_id: Option<&str>, window: &DateWindow, owner: &str, at: &NaiveDateTime) -> bool {
    user_id.map_or(true, |wanted| wanted == owner) && window.contains(at)
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn insert_point_event(&self, event: &PointEvent) -> anyhow::Result<()> {
        if self.fail_inserts {
            return Err(anyhow!("connection refused"));
        }
        self.points.lock().expect("points lock").push(event.clone());
        Ok(())
    }

    async fn insert_transaction(&self, transaction: &NewTransaction) -> anyhow::Result<String> {
        if self.fail_inserts {
            return Err(anyhow!("connection refused"));
        }
        let mut rows = self.transactions.lock().expect("transactions lock");
        let id = format!("tx-{}", rows.len() + 1);
        rows.push(transaction.clone().with_id(id.clone()));
        Ok(id)
    }

    async fn query_point_events(
        &self,
        user_id: Option<&str>,
        window: &DateWindow,
    ) -> anyhow::Result<Vec<PointEvent>> {
        if self.fail_point_queries {
            return Err(anyhow!("points table unavailable"));
        }
        let rows = self.points.lock().expect("points lock");
        Ok(rows
            .iter()
            .filter(|row| matches(user_id, window, &row.user_id, &row.occurred_at))
            .cloned()
            .collect())
    }

    async fn query_transactions(
        &self,
        user_id: Option<&str>,
        window: &DateWindow,
    ) -> anyhow::Result<Vec<Transaction>> {
        if self.fail_transaction_queries {
            return Err(anyhow!("transactions table unavailable"));
        }
        let rows = self.transactions.lock().expect("transactions lock");
        Ok(rows
            .iter()
            .filter(|row| matches(user_id, window, &row.user_id, &row.occurred_at))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

pub(crate) struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub(crate) fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, s))
        .expect("valid datetime")
}

pub(crate) fn state_with(store: Arc<FakeStore>, now: NaiveDateTime) -> AppState {
    AppState {
        config: RuntimeConfig::default(),
        store,
        clock: Arc::new(FixedClock(now)),
        metrics: Arc::new(Metrics::default()),
    }
}

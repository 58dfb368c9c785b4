use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use rewards_domain::{DateWindow, NewTransaction, PointEvent, RecordStore, Transaction};

/// Process-local record store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryRecordStore {
    points: RwLock<Vec<PointEvent>>,
    transactions: RwLock<Vec<Transaction>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn in_scope(user_id: Option<&str>, window: &DateWindow, owner: &str, at: &chrono::NaiveDateTime) -> bool {
    user_id.map_or(true, |wanted| wanted == owner) && window.contains(at)
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_point_event(&self, event: &PointEvent) -> Result<()> {
        self.points.write().await.push(event.clone());
        Ok(())
    }

    async fn insert_transaction(&self, transaction: &NewTransaction) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.transactions
            .write()
            .await
            .push(transaction.clone().with_id(id.clone()));
        Ok(id)
    }

    async fn query_point_events(
        &self,
        user_id: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<PointEvent>> {
        let rows = self.points.read().await;
        Ok(rows
            .iter()
            .filter(|row| in_scope(user_id, window, &row.user_id, &row.occurred_at))
            .cloned()
            .collect())
    }

    async fn query_transactions(
        &self,
        user_id: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<Transaction>> {
        let rows = self.transactions.read().await;
        Ok(rows
            .iter()
            .filter(|row| in_scope(user_id, window, &row.user_id, &row.occurred_at))
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 8, d)
            .and_then(|date| date.and_hms_opt(10, 0, 0))
            .expect("valid datetime")
    }

    fn window(from: u32, to: u32) -> DateWindow {
        DateWindow::resolve(
            NaiveDate::from_ymd_opt(2024, 8, from),
            NaiveDate::from_ymd_opt(2024, 8, to),
        )
    }

    #[tokio::test]
    async fn point_queries_filter_by_user_and_window() {
        let store = MemoryRecordStore::new();
        for (id, user, day) in [("p1", "u1", 1), ("p2", "u2", 5), ("p3", "u1", 9)] {
            store
                .insert_point_event(&PointEvent {
                    id: id.to_string(),
                    user_id: user.to_string(),
                    points: 5,
                    occurred_at: at(day),
                })
                .await
                .expect("insert point");
        }

        let scoped = store
            .query_point_events(Some("u1"), &window(1, 5))
            .await
            .expect("query points");
        assert_eq!(scoped.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(), vec!["p1"]);

        let all = store
            .query_point_events(None, &DateWindow::default())
            .await
            .expect("query points");
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn transactions_receive_unique_generated_ids() {
        let store = MemoryRecordStore::new();
        let pending = NewTransaction {
            user_id: "u1".to_string(),
            description: "parking".to_string(),
            points: 40,
            occurred_at: at(3),
        };
        let first = store.insert_transaction(&pending).await.expect("insert");
        let second = store.insert_transaction(&pending).await.expect("insert");
        assert_ne!(first, second);

        let rows = store
            .query_transactions(Some("u1"), &window(3, 3))
            .await
            .expect("query transactions");
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().any(|row| row.id == first));
        assert!(store
            .query_transactions(Some("u2"), &window(3, 3))
            .await
            .expect("query transactions")
            .is_empty());
    }
}

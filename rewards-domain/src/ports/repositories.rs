use async_trait::async_trait;

use crate::entities::{NewTransaction, PointEvent, Transaction};
use crate::value_objects::DateWindow;

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn ensure_schema(&self) -> anyhow::Result<()>;
    async fn insert_point_event(&self, event: &PointEvent) -> anyhow::Result<()>;
    /// Returns the id the store generated for the transaction.
    async fn insert_transaction(&self, transaction: &NewTransaction) -> anyhow::Result<String>;
    async fn query_point_events(
        &self,
        user_id: Option<&str>,
        window: &DateWindow,
    ) -> anyhow::Result<Vec<PointEvent>>;
    async fn query_transactions(
        &self,
        user_id: Option<&str>,
        window: &DateWindow,
    ) -> anyhow::Result<Vec<Transaction>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

use anyhow::Result;
use async_trait::async_trait;
use clickhouse::{Client, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::info;
use uuid::Uuid;

use rewards_domain::{DateWindow, DbConfig, NewTransaction, PointEvent, RecordStore, Transaction};

use crate::config::validate_database_name;
use crate::utils::{clamp_to_column_range, column_to_naive, format_column_time, naive_to_column};

#[derive(Debug, Clone, Serialize, Deserialize, Row)]
struct PointRow {
    id: String,
    user_id: String,
    points: i64,
    #[serde(with = "clickhouse::serde::time::datetime64::secs")]
    occurred_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Row)]
struct TransactionRow {
    id: String,
    user_id: String,
    description: String,
    points: i64,
    #[serde(with = "clickhouse::serde::time::datetime64::secs")]
    occurred_at: OffsetDateTime,
}

impl From<PointRow> for PointEvent {
    fn from(row: PointRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            points: row.points,
            occurred_at: column_to_naive(row.occurred_at),
        }
    }
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            description: row.description,
            points: row.points,
            occurred_at: column_to_naive(row.occurred_at),
        }
    }
}

const BOOTSTRAP_DATABASE: &str = "default";

#[derive(Clone)]
pub struct ClickhouseRecordStore {
    client: Client,
    database: String,
}

impl ClickhouseRecordStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn from_config(config: &DbConfig) -> Self {
        let mut client = Client::default()
            .with_url(&config.clickhouse_url)
            .with_database(&config.clickhouse_database);
        if let Some(user) = &config.clickhouse_user {
            client = client.with_user(user);
        }
        if let Some(password) = &config.clickhouse_password {
            client = client.with_password(password);
        }
        Self::new(client, config.clickhouse_database.clone())
    }

    fn create_database_sql(database: &str) -> Result<String> {
        validate_database_name(database)?;
        Ok(format!("CREATE DATABASE IF NOT EXISTS `{}`", database))
    }

    fn window_bounds(window: &DateWindow) -> (String, String) {
        (
            format_column_time(&clamp_to_column_range(window.start)),
            format_column_time(&clamp_to_column_range(window.end)),
        )
    }

    fn window_sql(table: &str, user_id: Option<&str>) -> String {
        let mut query = format!(
            "SELECT ?fields FROM {} \
             WHERE occurred_at >= toDateTime64(?, 0, 'UTC') AND occurred_at <= toDateTime64(?, 0, 'UTC')",
            table
        );
        if user_id.is_some() {
            query.push_str(" AND user_id = ?");
        }
        query.push_str(" ORDER BY occurred_at DESC");
        query
    }
}

#[async_trait]
impl RecordStore for ClickhouseRecordStore {
    async fn ensure_schema(&self) -> Result<()> {
        // The session database may not exist yet, so create it from `default`.
        let create_db = Self::create_database_sql(&self.database)?;
        self.client
            .clone()
            .with_database(BOOTSTRAP_DATABASE)
            .query(&create_db)
            .execute()
            .await?;

        let create_points = r#"
CREATE TABLE IF NOT EXISTS points (
    id String,
    user_id String,
    points Int64,
    occurred_at DateTime64(0, 'UTC')
) ENGINE = MergeTree
PARTITION BY toYYYYMM(occurred_at)
ORDER BY (user_id, occurred_at)
"#;
        self.client.query(create_points).execute().await?;

        let create_transactions = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id String,
    user_id String,
    description String,
    points Int64,
    occurred_at DateTime64(0, 'UTC')
) ENGINE = MergeTree
PARTITION BY toYYYYMM(occurred_at)
ORDER BY (user_id, occurred_at)
"#;
        self.client.query(create_transactions).execute().await?;
        info!(database = %self.database, "clickhouse schema ready");
        Ok(())
    }

    async fn insert_point_event(&self, event: &PointEvent) -> Result<()> {
        let mut insert = self.client.insert("points")?;
        insert
            .write(&PointRow {
                id: event.id.clone(),
                user_id: event.user_id.clone(),
                points: event.points,
                occurred_at: naive_to_column(&event.occurred_at),
            })
            .await?;
        insert.end().await?;
        Ok(())
    }

    async fn insert_transaction(&self, transaction: &NewTransaction) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        let mut insert = self.client.insert("transactions")?;
        insert
            .write(&TransactionRow {
                id: id.clone(),
                user_id: transaction.user_id.clone(),
                description: transaction.description.clone(),
                points: transaction.points,
                occurred_at: naive_to_column(&transaction.occurred_at),
            })
            .await?;
        insert.end().await?;
        Ok(id)
    }

    async fn query_point_events(
        &self,
        user_id: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<PointEvent>> {
        if window.is_empty() {
            return Ok(Vec::new());
        }
        let (start, end) = Self::window_bounds(window);
        let sql = Self::window_sql("points", user_id);
        let mut query = self.client.query(&sql).bind(start).bind(end);
        if let Some(user_id) = user_id {
            query = query.bind(user_id);
        }
        let rows = query.fetch_all::<PointRow>().await?;
        Ok(rows.into_iter().map(PointEvent::from).collect())
    }

    async fn query_transactions(
        &self,
        user_id: Option<&str>,
        window: &DateWindow,
    ) -> Result<Vec<Transaction>> {
        if window.is_empty() {
            return Ok(Vec::new());
        }
        let (start, end) = Self::window_bounds(window);
        let sql = Self::window_sql("transactions", user_id);
        let mut query = self.client.query(&sql).bind(start).bind(end);
        if let Some(user_id) = user_id {
            query = query.bind(user_id);
        }
        let rows = query.fetch_all::<TransactionRow>().await?;
        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn ping(&self) -> Result<()> {
        let _: u8 = self.client.query("SELECT toUInt8(1)").fetch_one().await?;
        Ok(())
    }
}

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use rewards_application::{AppState, Metrics};
use rewards_domain::RecordStore;
use rewards_infrastructure::{
    AppConfig, ClickhouseRecordStore, MemoryRecordStore, StoreBackend, SystemClock,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config()?;

        let store: Arc<dyn RecordStore> = match config.store_backend {
            StoreBackend::Clickhouse => {
                let db_config = config.to_db_config();
                info!(
                    clickhouse_url = %db_config.clickhouse_url,
                    clickhouse_database = %db_config.clickhouse_database,
                    clickhouse_user = %db_config.clickhouse_user.as_deref().unwrap_or("<none>"),
                    clickhouse_password_set = db_config.clickhouse_password.is_some(),
                    "using clickhouse record store"
                );
                Arc::new(ClickhouseRecordStore::from_config(&db_config))
            }
            StoreBackend::Memory => {
                info!("using in-memory record store");
                Arc::new(MemoryRecordStore::new())
            }
        };
        store.ensure_schema().await?;

        let state = AppState {
            clock: Arc::new(SystemClock::new(runtime_config.timezone)),
            config: runtime_config,
            store,
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}

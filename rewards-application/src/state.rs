use std::sync::Arc;

use rewards_domain::ports::{Clock, RecordStore};
use rewards_domain::RuntimeConfig;

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub store: Arc<dyn RecordStore>,
    pub clock: Arc<dyn Clock>,
    pub metrics: Arc<Metrics>,
}

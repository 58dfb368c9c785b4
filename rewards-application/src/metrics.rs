use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    points_recorded: AtomicU64,
    transactions_recorded: AtomicU64,
    history_queries: AtomicU64,
    history_entries: AtomicU64,
    validation_errors: AtomicU64,
    store_errors: AtomicU64,
}

impl Metrics {
    pub fn record_point(&self) {
        self.points_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transaction(&self) {
        self.transactions_recorded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_history_query(&self, entry_count: usize) {
        self.history_queries.fetch_add(1, Ordering::Relaxed);
        self.history_entries
            .fetch_add(entry_count as u64, Ordering::Relaxed);
    }

    pub fn record_validation_error(&self) {
        self.validation_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let points = self.points_recorded.load(Ordering::Relaxed);
        let transactions = self.transactions_recorded.load(Ordering::Relaxed);
        let queries = self.history_queries.load(Ordering::Relaxed);
        let entries = self.history_entries.load(Ordering::Relaxed);
        let validation = self.validation_errors.load(Ordering::Relaxed);
        let store = self.store_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE rewards_points_recorded_total counter\n\
rewards_points_recorded_total {}\n\
# TYPE rewards_transactions_recorded_total counter\n\
rewards_transactions_recorded_total {}\n\
# TYPE rewards_history_queries_total counter\n\
rewards_history_queries_total {}\n\
# TYPE rewards_history_entries_total counter\n\
rewards_history_entries_total {}\n\
# TYPE rewards_validation_errors_total counter\n\
rewards_validation_errors_total {}\n\
# TYPE rewards_store_errors_total counter\n\
rewards_store_errors_total {}\n",
            points, transactions, queries, entries, validation, store
        )
    }
}

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::{AppError, AppState};
use rewards_domain::{
    build_history_view, format_stored, parse_date, DateWindow, HistoryQuery, HistoryView,
};

const OPERATION: &str = "fetch_history";

/// Merged point and transaction history for one user, or for every user
/// grouped by id when `user_id` is `None`.
pub async fn fetch_history(
    state: &AppState,
    user_id: Option<&str>,
    query: HistoryQuery,
) -> Result<HistoryView, AppError> {
    let scope = user_id.unwrap_or("*");
    let bounds = parse_bound(query.start, "start").and_then(|start| {
        parse_bound(query.end, "end").map(|end| (start, end))
    });
    let (start, end) = match bounds {
        Ok(bounds) => bounds,
        Err(err) => {
            state.metrics.record_validation_error();
            warn!(operation = OPERATION, scope = %scope, error = %err, "history query rejected");
            return Err(err);
        }
    };
    let window = DateWindow::resolve(start, end);

    let (points, transactions) = tokio::try_join!(
        state.store.query_point_events(user_id, &window),
        state.store.query_transactions(user_id, &window),
    )
    .map_err(|err| {
        state.metrics.record_store_error();
        error!(
            operation = OPERATION,
            scope = %scope,
            window_start = %format_stored(&window.start),
            window_end = %format_stored(&window.end),
            error = %err,
            "failed to fetch history"
        );
        AppError::StoreAccess(err)
    })?;

    let view = build_history_view(user_id, points, transactions);
    let count = view.entry_count();
    state.metrics.record_history_query(count);
    info!(
        operation = OPERATION,
        scope = %scope,
        window_start = %format_stored(&window.start),
        window_end = %format_stored(&window.end),
        count,
        "history fetched"
    );
    Ok(view)
}

fn parse_bound(value: Option<String>, field: &str) -> Result<Option<NaiveDate>, AppError> {
    let Some(raw) = value.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };
    parse_date(raw).map(Some).map_err(|err| {
        AppError::Validation(format!("invalid {} date '{}': {}", field, raw, err))
    })
}

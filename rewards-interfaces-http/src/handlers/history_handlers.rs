use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use tracing::warn;

use rewards_application::queries::history_queries;
use rewards_application::AppState;
use rewards_domain::{HistoryQuery, HistoryView};

use crate::error::HttpError;

pub async fn user_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryView>, HttpError> {
    let Query(query) = query.map_err(|rejection| {
        warn!(route = "GET /hist/:id_user", user_id = %user_id, error = %rejection.body_text(), "invalid history query");
        HttpError::from(rejection)
    })?;
    let view = history_queries::fetch_history(&state, Some(&user_id), query).await?;
    Ok(Json(view))
}

pub async fn all_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryView>, HttpError> {
    let Query(query) = query.map_err(|rejection| {
        warn!(route = "GET /hist", error = %rejection.body_text(), "invalid history query");
        HttpError::from(rejection)
    })?;
    let view = history_queries::fetch_history(&state, None, query).await?;
    Ok(Json(view))
}

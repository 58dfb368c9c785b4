use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::warn;

use rewards_application::commands::{point_commands, transaction_commands};
use rewards_application::AppState;
use rewards_domain::{RecordAck, RecordPointRequest, RecordTransactionRequest};

use crate::error::HttpError;

pub async fn record_point(
    State(state): State<AppState>,
    payload: Result<Json<RecordPointRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordAck>), HttpError> {
    let Json(payload) = payload.map_err(|rejection| {
        state.metrics.record_validation_error();
        warn!(route = "POST /pontos", error = %rejection.body_text(), "invalid point payload");
        HttpError::from(rejection)
    })?;
    let ack = point_commands::record_point_event(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

pub async fn record_transaction(
    State(state): State<AppState>,
    payload: Result<Json<RecordTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordAck>), HttpError> {
    let Json(payload) = payload.map_err(|rejection| {
        state.metrics.record_validation_error();
        warn!(route = "POST /transacoes", error = %rejection.body_text(), "invalid transaction payload");
        HttpError::from(rejection)
    })?;
    let ack = transaction_commands::record_transaction(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(ack)))
}

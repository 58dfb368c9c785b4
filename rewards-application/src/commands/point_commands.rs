use tracing::{error, info, warn};

use crate::commands::required_fields::RequiredFields;
use crate::{AppError, AppState};
use rewards_domain::{format_stored, PointEvent, RecordAck, RecordPointRequest};

const OPERATION: &str = "record_point_event";

pub async fn record_point_event(
    state: &AppState,
    payload: RecordPointRequest,
) -> Result<RecordAck, AppError> {
    let mut fields = RequiredFields::default();
    let id = fields.text(payload.id, "id");
    let user_id = fields.text(payload.user_id, "idUser");
    let points = fields.points(payload.points, "points");
    if let Err(err) = fields.finish() {
        state.metrics.record_validation_error();
        warn!(operation = OPERATION, id = %id, user_id = %user_id, error = %err, "point event rejected");
        return Err(err);
    }

    let event = PointEvent {
        id,
        user_id,
        points,
        occurred_at: state.clock.now(),
    };
    if let Err(err) = state.store.insert_point_event(&event).await {
        state.metrics.record_store_error();
        error!(
            operation = OPERATION,
            id = %event.id,
            user_id = %event.user_id,
            error = %err,
            "failed to insert point event"
        );
        return Err(AppError::StoreAccess(err));
    }

    state.metrics.record_point();
    info!(
        operation = OPERATION,
        id = %event.id,
        user_id = %event.user_id,
        points = event.points,
        occurred_at = %format_stored(&event.occurred_at),
        "point event recorded"
    );
    Ok(RecordAck::new("point recorded"))
}

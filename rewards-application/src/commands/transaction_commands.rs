use tracing::{error, info, warn};

use crate::commands::required_fields::RequiredFields;
use crate::{AppError, AppState};
use rewards_domain::{format_stored, NewTransaction, RecordAck, RecordTransactionRequest};

const OPERATION: &str = "record_transaction";

pub async fn record_transaction(
    state: &AppState,
    payload: RecordTransactionRequest,
) -> Result<RecordAck, AppError> {
    let mut fields = RequiredFields::default();
    let user_id = fields.text(payload.user_id, "idUser");
    let description = fields.text(payload.description, "description");
    let points = fields.points(payload.points, "points");
    if let Err(err) = fields.finish() {
        state.metrics.record_validation_error();
        warn!(operation = OPERATION, user_id = %user_id, error = %err, "transaction rejected");
        return Err(err);
    }

    let transaction = NewTransaction {
        user_id,
        description,
        points,
        occurred_at: state.clock.now(),
    };
    let id = match state.store.insert_transaction(&transaction).await {
        Ok(id) => id,
        Err(err) => {
            state.metrics.record_store_error();
            error!(
                operation = OPERATION,
                user_id = %transaction.user_id,
                error = %err,
                "failed to insert transaction"
            );
            return Err(AppError::StoreAccess(err));
        }
    };

    state.metrics.record_transaction();
    info!(
        operation = OPERATION,
        id = %id,
        user_id = %transaction.user_id,
        points = transaction.points,
        occurred_at = %format_stored(&transaction.occurred_at),
        "transaction recorded"
    );
    Ok(RecordAck::new("transaction recorded"))
}

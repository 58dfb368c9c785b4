// Point event entity
// Points awarded to a user, recorded on a QR-code scan

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointEvent {
    pub id: String,
    pub user_id: String,
    pub points: i64,
    pub occurred_at: NaiveDateTime,
}

// Transaction entity
// Points redeemed against a described benefit

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub description: String,
    pub points: i64,
    pub occurred_at: NaiveDateTime,
}

// Not yet stored; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub user_id: String,
    pub description: String,
    pub points: i64,
    pub occurred_at: NaiveDateTime,
}

impl NewTransaction {
    pub fn with_id(self, id: String) -> Transaction {
        Transaction {
            id,
            user_id: self.user_id,
            description: self.description,
            points: self.points,
            occurred_at: self.occurred_at,
        }
    }
}

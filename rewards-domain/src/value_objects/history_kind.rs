// History kind value object
// Discriminates the two record streams merged into a history

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistoryKind {
    #[serde(rename = "ponto")]
    Point,
    #[serde(rename = "transacao")]
    Transaction,
}

// History entities
// Display-layer union of point events and transactions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{PointEvent, Transaction};
use crate::utils::format_display;
use crate::value_objects::HistoryKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryRecord {
    Point(PointEvent),
    Transaction(Transaction),
}

impl HistoryRecord {
    pub fn kind(&self) -> HistoryKind {
        match self {
            HistoryRecord::Point(_) => HistoryKind::Point,
            HistoryRecord::Transaction(_) => HistoryKind::Transaction,
        }
    }

    pub fn render(self) -> HistoryEntry {
        let kind = self.kind();
        match self {
            HistoryRecord::Point(point) => HistoryEntry {
                id: point.id,
                user_id: point.user_id,
                points: point.points,
                description: None,
                date: format_display(&point.occurred_at),
                kind,
            },
            HistoryRecord::Transaction(tx) => HistoryEntry {
                id: tx.id,
                user_id: tx.user_id,
                points: tx.points,
                description: Some(tx.description),
                date: format_display(&tx.occurred_at),
                kind,
            },
        }
    }
}

impl From<PointEvent> for HistoryRecord {
    fn from(value: PointEvent) -> Self {
        HistoryRecord::Point(value)
    }
}

impl From<Transaction> for HistoryRecord {
    fn from(value: Transaction) -> Self {
        HistoryRecord::Transaction(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(rename = "idUser")]
    pub user_id: String,
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: String,
    #[serde(rename = "tipo")]
    pub kind: HistoryKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HistoryView {
    Flat(Vec<HistoryEntry>),
    ByUser(BTreeMap<String, Vec<HistoryEntry>>),
}

impl HistoryView {
    pub fn entry_count(&self) -> usize {
        match self {
            HistoryView::Flat(entries) => entries.len(),
            HistoryView::ByUser(groups) => groups.values().map(Vec::len).sum(),
        }
    }
}

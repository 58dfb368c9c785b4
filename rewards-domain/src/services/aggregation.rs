// History aggregation
// Merges point events and transactions into one display-ready history

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::entities::{HistoryEntry, HistoryRecord, HistoryView, PointEvent, Transaction};
use crate::utils::parse_display;

pub fn merge_history(points: Vec<PointEvent>, transactions: Vec<Transaction>) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = points
        .into_iter()
        .map(HistoryRecord::from)
        .chain(transactions.into_iter().map(HistoryRecord::from))
        .map(HistoryRecord::render)
        .collect();
    sort_newest_first(&mut entries);
    entries
}

// Stable sort on the parsed display string; unparseable dates go last
pub fn sort_newest_first(entries: &mut [HistoryEntry]) {
    entries.sort_by_cached_key(|entry| Reverse(parse_display(&entry.date)));
}

pub fn group_by_user(entries: Vec<HistoryEntry>) -> BTreeMap<String, Vec<HistoryEntry>> {
    let mut groups: BTreeMap<String, Vec<HistoryEntry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(entry.user_id.clone()).or_default().push(entry);
    }
    groups
}

pub fn build_history_view(
    user_id: Option<&str>,
    points: Vec<PointEvent>,
    transactions: Vec<Transaction>,
) -> HistoryView {
    let entries = merge_history(points, transactions);
    match user_id {
        Some(_) => HistoryView::Flat(entries),
        None => HistoryView::ByUser(group_by_user(entries)),
    }
}

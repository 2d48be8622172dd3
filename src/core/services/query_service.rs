use std::{fmt, str::FromStr};

use crate::{
    core::view_state::ViewState,
    ledger::{Document, LedgerEntry},
};

use super::aggregation_service::AggregationService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DateAsc,
    DateDesc,
    AmountAsc,
    AmountDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DateAsc,
        SortKey::DateDesc,
        SortKey::AmountAsc,
        SortKey::AmountDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateAsc => "date-asc",
            SortKey::DateDesc => "date-desc",
            SortKey::AmountAsc => "amount-asc",
            SortKey::AmountDesc => "amount-desc",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown sort `{}` (expected date-asc, date-desc, amount-asc or amount-desc)",
                    value
                )
            })
    }
}

pub struct QueryService;

impl QueryService {
    /// Entries of the view's month after the day filter, search and sort are applied.
    ///
    /// Monthly documents have no individual entries and always yield an empty list.
    pub fn visible_entries<'a>(
        document: &'a Document,
        view: &ViewState,
    ) -> Vec<&'a dyn LedgerEntry> {
        let slice = AggregationService::entries_for_month(document, view.month());
        let filtered = Self::filter(slice.entries(), view.day_filter(), view.search());
        match view.sort() {
            Some(key) => Self::sort(filtered, key),
            None => filtered,
        }
    }

    /// Exact day match, then case-insensitive substring search over label or note.
    pub fn filter<'a>(
        entries: &[&'a dyn LedgerEntry],
        day: Option<&str>,
        search: &str,
    ) -> Vec<&'a dyn LedgerEntry> {
        let needle = search.trim().to_lowercase();
        entries
            .iter()
            .copied()
            .filter(|entry| day.map_or(true, |day| entry.date() == day))
            .filter(|entry| {
                needle.is_empty()
                    || entry.label().to_lowercase().contains(&needle)
                    || entry.note().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Stable sort; dates compare as strings, amounts numerically.
    pub fn sort(mut entries: Vec<&dyn LedgerEntry>, key: SortKey) -> Vec<&dyn LedgerEntry> {
        match key {
            SortKey::DateAsc => entries.sort_by(|a, b| a.date().cmp(b.date())),
            SortKey::DateDesc => entries.sort_by(|a, b| b.date().cmp(a.date())),
            SortKey::AmountAsc => entries.sort_by(|a, b| a.amount().total_cmp(&b.amount())),
            SortKey::AmountDesc => entries.sort_by(|a, b| b.amount().total_cmp(&a.amount())),
        }
        entries
    }
}

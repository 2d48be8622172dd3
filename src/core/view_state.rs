use chrono::NaiveDate;

use crate::ledger::MonthKey;

use super::services::query_service::SortKey;

/// Immutable selection driving the month views. Every transition returns a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    month: MonthKey,
    day_filter: Option<String>,
    search: String,
    sort: Option<SortKey>,
    compare_month: u32,
}

impl ViewState {
    /// A view of `month` with no filters, comparing against the previous month.
    pub fn new(month: MonthKey) -> Self {
        Self {
            month,
            day_filter: None,
            search: String::new(),
            sort: None,
            compare_month: previous_month_index(month.month_index()),
        }
    }

    pub fn for_today(today: NaiveDate) -> Self {
        Self::new(MonthKey::from_date(today))
    }

    pub fn month(&self) -> MonthKey {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.month.year()
    }

    pub fn month_index(&self) -> u32 {
        self.month.month_index()
    }

    pub fn day_filter(&self) -> Option<&str> {
        self.day_filter.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn compare_month(&self) -> u32 {
        self.compare_month
    }

    /// The comparison month, in the same year as the active month.
    pub fn compare_key(&self) -> MonthKey {
        MonthKey::new(self.year(), self.compare_month).unwrap_or(self.month)
    }

    /// Switches month; clears the day filter and resets the comparison month.
    pub fn with_month(&self, month: MonthKey) -> Self {
        Self {
            search: self.search.clone(),
            sort: self.sort,
            ..Self::new(month)
        }
    }

    /// Selecting the filtered day again clears the filter.
    pub fn toggle_day(&self, day: impl Into<String>) -> Self {
        let day = day.into();
        let day_filter = if self.day_filter.as_deref() == Some(day.as_str()) {
            None
        } else {
            Some(day)
        };
        Self {
            day_filter,
            ..self.clone()
        }
    }

    pub fn clear_day(&self) -> Self {
        Self {
            day_filter: None,
            ..self.clone()
        }
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            ..self.clone()
        }
    }

    pub fn with_sort(&self, sort: Option<SortKey>) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    /// Out-of-range month indices are ignored.
    pub fn with_compare_month(&self, month_index: u32) -> Self {
        if month_index > 11 {
            return self.clone();
        }
        Self {
            compare_month: month_index,
            ..self.clone()
        }
    }

    /// Jumps to the month containing `today`.
    pub fn today(&self, today: NaiveDate) -> Self {
        self.with_month(MonthKey::from_date(today))
    }

    /// Follows a newly added entry to its month when it lies elsewhere.
    pub fn after_entry(&self, date: &str) -> Self {
        match MonthKey::from_date_str(date) {
            Some(month) if month != self.month => self.with_month(month),
            _ => self.clone(),
        }
    }
}

fn previous_month_index(month_index: u32) -> u32 {
    (month_index + 11) % 12
}

use std::collections::BTreeMap;

use crate::ledger::{days_in_month, Bucket, Document, LedgerEntry, MonthKey, MonthlyRecord};

/// The records of one month, in whichever form the document keeps them.
pub enum MonthSlice<'a> {
    /// Transaction-style entries in store order.
    Entries(Vec<&'a dyn LedgerEntry>),
    /// Monthly totals; `record` is `None` when the month has no data yet.
    Monthly {
        key: MonthKey,
        record: Option<&'a MonthlyRecord>,
    },
}

impl<'a> MonthSlice<'a> {
    /// Number of entries, or 1/0 for a monthly record that exists or not.
    pub fn len(&self) -> usize {
        match self {
            MonthSlice::Entries(entries) => entries.len(),
            MonthSlice::Monthly { record, .. } => usize::from(record.is_some()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> &[&'a dyn LedgerEntry] {
        match self {
            MonthSlice::Entries(entries) => entries,
            MonthSlice::Monthly { .. } => &[],
        }
    }
}

/// Summed amount of one bucket or category label.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketTotal {
    pub label: String,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    More,
    Less,
    Same,
}

/// Month-over-month comparison of totals; `delta = total_a - total_b`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub month_a: MonthKey,
    pub month_b: MonthKey,
    pub total_a: f64,
    pub total_b: f64,
    pub delta: f64,
}

impl Comparison {
    pub fn direction(&self) -> Direction {
        if self.delta > 0.0 {
            Direction::More
        } else if self.delta < 0.0 {
            Direction::Less
        } else {
            Direction::Same
        }
    }

    /// Unsigned difference shown next to the direction.
    pub fn magnitude(&self) -> f64 {
        self.delta.abs()
    }
}

/// Totals backing the summary view for one month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub total: f64,
    pub count: usize,
    pub average_per_day: f64,
    pub groups: Vec<BucketTotal>,
    /// Monthly documents only: bucket spending without income.
    pub spent: Option<f64>,
    /// Monthly documents only: salary plus other income.
    pub income: Option<f64>,
}

pub struct AggregationService;

impl AggregationService {
    /// Entries whose date falls in `month`, or the monthly record for that key.
    pub fn entries_for_month<'a>(document: &'a Document, month: MonthKey) -> MonthSlice<'a> {
        match document {
            Document::V4(doc) => MonthSlice::Monthly {
                key: month,
                record: doc.month(month),
            },
            _ => MonthSlice::Entries(
                document
                    .entries()
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|entry| month.contains(entry.date()))
                    .collect(),
            ),
        }
    }

    /// Sum of amounts; for monthly records, bucket values plus both incomes.
    pub fn sum(slice: &MonthSlice<'_>) -> f64 {
        match slice {
            MonthSlice::Entries(entries) => Self::sum_entries(entries),
            MonthSlice::Monthly { record, .. } => record.map_or(0.0, MonthlyRecord::total),
        }
    }

    pub fn sum_entries(entries: &[&dyn LedgerEntry]) -> f64 {
        entries.iter().map(|entry| entry.amount()).sum()
    }

    /// Per-label totals, largest first. Ties keep the order labels were first seen;
    /// monthly records list buckets in declaration order.
    pub fn group_by_bucket(slice: &MonthSlice<'_>) -> Vec<BucketTotal> {
        let mut groups = match slice {
            MonthSlice::Entries(entries) => Self::group_entries(entries),
            MonthSlice::Monthly { record, .. } => Bucket::ALL
                .iter()
                .map(|bucket| BucketTotal {
                    label: bucket.as_str().to_string(),
                    total: record.map_or(0.0, |record| record.bucket_total(*bucket)),
                })
                .collect(),
        };
        groups.sort_by(|a, b| b.total.total_cmp(&a.total));
        groups
    }

    fn group_entries(entries: &[&dyn LedgerEntry]) -> Vec<BucketTotal> {
        let mut groups: Vec<BucketTotal> = Vec::new();
        for entry in entries {
            match groups.iter_mut().find(|group| group.label == entry.label()) {
                Some(group) => group.total += entry.amount(),
                None => groups.push(BucketTotal {
                    label: entry.label().to_string(),
                    total: entry.amount(),
                }),
            }
        }
        groups
    }

    /// Date string to summed amount, for the calendar view.
    pub fn per_day_totals(entries: &[&dyn LedgerEntry]) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for entry in entries {
            *totals.entry(entry.date().to_string()).or_insert(0.0) += entry.amount();
        }
        totals
    }

    /// `total` spread over every calendar day of the month.
    pub fn average_per_day(total: f64, month: MonthKey) -> f64 {
        let days = days_in_month(month.year(), month.month_index());
        if days == 0 {
            0.0
        } else {
            total / f64::from(days)
        }
    }

    pub fn compare(document: &Document, month_a: MonthKey, month_b: MonthKey) -> Comparison {
        let total_a = Self::sum(&Self::entries_for_month(document, month_a));
        let total_b = Self::sum(&Self::entries_for_month(document, month_b));
        Comparison {
            month_a,
            month_b,
            total_a,
            total_b,
            delta: total_a - total_b,
        }
    }

    pub fn month_summary(document: &Document, month: MonthKey) -> MonthSummary {
        let slice = Self::entries_for_month(document, month);
        let total = Self::sum(&slice);
        let (spent, income) = match &slice {
            MonthSlice::Monthly { record, .. } => (
                Some(record.map_or(0.0, MonthlyRecord::spent)),
                Some(record.map_or(0.0, MonthlyRecord::income)),
            ),
            MonthSlice::Entries(_) => (None, None),
        };
        MonthSummary {
            month,
            total,
            count: slice.len(),
            average_per_day: Self::average_per_day(total, month),
            groups: Self::group_by_bucket(&slice),
            spent,
            income,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{
        BucketDocument, BucketEntry, Entry, EntryDocument, IncomeKind, LegacyDocument,
        LegacyTransaction, MonthlyDocument,
    };

    fn march() -> MonthKey {
        MonthKey::new(2024, 2).unwrap()
    }

    fn legacy(date: &str, category: &str, amount: f64) -> LegacyTransaction {
        LegacyTransaction {
            id: format!("{}-{}", date, category),
            date: date.into(),
            category: category.into(),
            amount,
            note: String::new(),
        }
    }

    #[test]
    fn march_food_example() {
        let doc = Document::V1(LegacyDocument {
            transactions: vec![
                legacy("2024-03-01", "Food", 12.5),
                legacy("2024-03-15", "Food", 7.5),
                legacy("2024-04-01", "Food", 99.0),
            ],
        });
        let slice = AggregationService::entries_for_month(&doc, march());
        assert_eq!(slice.len(), 2);
        assert_eq!(AggregationService::sum(&slice), 20.0);
        assert_eq!(
            AggregationService::group_by_bucket(&slice),
            vec![BucketTotal {
                label: "Food".into(),
                total: 20.0
            }]
        );
    }

    #[test]
    fn grouping_sorts_descending_and_keeps_first_seen_ties() {
        let doc = Document::V2(BucketDocument {
            entries: ["Bills", "Food", "Housing", "Food"]
                .iter()
                .zip([5.0, 2.5, 5.0, 2.5])
                .map(|(bucket, amount)| BucketEntry {
                    id: bucket.to_string(),
                    date: "2024-03-03".into(),
                    bucket: bucket.to_string(),
                    amount,
                    note: String::new(),
                })
                .collect(),
        });
        let slice = AggregationService::entries_for_month(&doc, march());
        let labels: Vec<String> = AggregationService::group_by_bucket(&slice)
            .into_iter()
            .map(|group| group.label)
            .collect();
        assert_eq!(labels, vec!["Bills", "Food", "Housing"]);
    }

    #[test]
    fn per_day_totals_merge_same_dates() {
        let doc = Document::V3(EntryDocument::new(vec![
            Entry::new("2024-03-01", Bucket::Food, 3.0, ""),
            Entry::new("2024-03-01", Bucket::Bills, 4.0, ""),
            Entry::new("2024-03-09", Bucket::Food, 1.0, ""),
        ]));
        let slice = AggregationService::entries_for_month(&doc, march());
        let totals = AggregationService::per_day_totals(slice.entries());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["2024-03-01"], 7.0);
    }

    #[test]
    fn average_uses_calendar_days() {
        let april = MonthKey::new(2024, 3).unwrap();
        assert_eq!(AggregationService::average_per_day(300.0, april), 10.0);
        let leap_february = MonthKey::new(2024, 1).unwrap();
        assert_eq!(AggregationService::average_per_day(29.0, leap_february), 1.0);
    }

    #[test]
    fn compare_reports_direction_and_magnitude() {
        let doc = Document::V3(EntryDocument::new(vec![
            Entry::new("2024-03-01", Bucket::Food, 30.0, ""),
            Entry::new("2024-02-10", Bucket::Food, 50.0, ""),
        ]));
        let february = MonthKey::new(2024, 1).unwrap();
        let comparison = AggregationService::compare(&doc, march(), february);
        assert_eq!(comparison.delta, -20.0);
        assert_eq!(comparison.direction(), Direction::Less);
        assert_eq!(comparison.magnitude(), 20.0);

        let same = AggregationService::compare(&doc, march(), march());
        assert_eq!(same.direction(), Direction::Same);
    }

    #[test]
    fn monthly_summary_splits_spending_and_income() {
        let mut monthly = MonthlyDocument::default();
        let record = monthly.month_mut(march());
        record.add(Bucket::Food, 40.0);
        record.add(Bucket::Housing, 900.0);
        record.set_income(IncomeKind::Salary, 2000.0);
        let doc = Document::V4(monthly);

        let summary = AggregationService::month_summary(&doc, march());
        assert_eq!(summary.total, 2940.0);
        assert_eq!(summary.spent, Some(940.0));
        assert_eq!(summary.income, Some(2000.0));
        assert_eq!(summary.groups.len(), Bucket::ALL.len());
        assert_eq!(summary.groups[0].label, "Housing");
        assert_eq!(summary.groups[1].label, "Food");
        assert_eq!(summary.groups[2].label, "Transportation");

        let empty = AggregationService::month_summary(&doc, MonthKey::new(2024, 5).unwrap());
        assert_eq!(empty.total, 0.0);
        assert_eq!(empty.count, 0);
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::bucket::Bucket;

/// Which income field of a monthly record is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncomeKind {
    Salary,
    Other,
}

impl IncomeKind {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "salary" => Some(IncomeKind::Salary),
            "other" => Some(IncomeKind::Other),
            _ => None,
        }
    }
}

/// v4 record: one per month, bucket running totals plus income.
///
/// Bucket additions only increment the running total; no per-expense history is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    pub income_salary: f64,
    pub income_other: f64,
    pub buckets: BTreeMap<Bucket, f64>,
}

impl Default for MonthlyRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl MonthlyRecord {
    pub fn new() -> Self {
        Self {
            income_salary: 0.0,
            income_other: 0.0,
            buckets: Bucket::ALL.iter().map(|bucket| (*bucket, 0.0)).collect(),
        }
    }

    /// Adds to a bucket's running total and returns the new total.
    pub fn add(&mut self, bucket: Bucket, amount: f64) -> f64 {
        let total = self.buckets.entry(bucket).or_insert(0.0);
        *total += amount;
        *total
    }

    pub fn bucket_total(&self, bucket: Bucket) -> f64 {
        self.buckets.get(&bucket).copied().unwrap_or(0.0)
    }

    pub fn set_income(&mut self, kind: IncomeKind, amount: f64) {
        match kind {
            IncomeKind::Salary => self.income_salary = amount,
            IncomeKind::Other => self.income_other = amount,
        }
    }

    pub fn spent(&self) -> f64 {
        self.buckets.values().sum()
    }

    pub fn income(&self) -> f64 {
        self.income_salary + self.income_other
    }

    /// Bucket values plus both income fields.
    pub fn total(&self) -> f64 {
        self.spent() + self.income()
    }
}

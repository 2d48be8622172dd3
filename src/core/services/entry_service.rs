use tracing::debug;

use crate::{
    errors::LedgerError,
    ledger::{
        format_date, new_entry_id, parse_entry_date, round_cents, Bucket, BucketEntry, Document,
        Entry, IncomeKind, LegacyTransaction, MonthKey,
    },
};

use super::{ServiceError, ServiceResult};

pub const INVALID_ENTRY_MESSAGE: &str = "Please enter a valid date, bucket, and amount.";

/// Raw values from the entry form, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub date: String,
    /// Category (v1) or bucket (v2, v3) label.
    pub label: String,
    pub amount: f64,
    pub note: String,
}

impl EntryDraft {
    pub fn new(
        date: impl Into<String>,
        label: impl Into<String>,
        amount: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            label: label.into(),
            amount,
            note: note.into(),
        }
    }
}

pub struct EntryService;

impl EntryService {
    /// Validates the draft and appends it, returning the new entry id.
    pub fn add_entry(document: &mut Document, draft: EntryDraft) -> ServiceResult<String> {
        let date = parse_entry_date(&draft.date).ok_or_else(invalid_entry)?;
        let label = draft.label.trim();
        if label.is_empty() || !draft.amount.is_finite() || draft.amount <= 0.0 {
            return Err(invalid_entry());
        }
        let date = format_date(date);
        let amount = round_cents(draft.amount);
        let note = draft.note.trim().to_string();
        let id = new_entry_id();

        match document {
            Document::V1(doc) => doc.transactions.push(LegacyTransaction {
                id: id.clone(),
                date,
                category: label.to_string(),
                amount,
                note,
            }),
            Document::V2(doc) => doc.entries.push(BucketEntry {
                id: id.clone(),
                date,
                bucket: label.to_string(),
                amount,
                note,
            }),
            Document::V3(doc) => {
                let bucket = Bucket::from_label(label).ok_or_else(invalid_entry)?;
                doc.entries.push(Entry {
                    id: id.clone(),
                    date,
                    bucket,
                    amount,
                    note,
                });
            }
            Document::V4(_) => {
                return Err(LedgerError::UnsupportedOperation(
                    "monthly ledgers track bucket totals; add to a bucket instead".into(),
                )
                .into())
            }
        }
        debug!(id = %id, amount, "added entry");
        Ok(id)
    }

    pub fn remove_entry(document: &mut Document, id: &str) -> ServiceResult<()> {
        let removed = match document {
            Document::V1(doc) => remove_by_id(&mut doc.transactions, id, |tx| &tx.id),
            Document::V2(doc) => remove_by_id(&mut doc.entries, id, |entry| &entry.id),
            Document::V3(doc) => remove_by_id(&mut doc.entries, id, |entry| &entry.id),
            Document::V4(_) => {
                return Err(LedgerError::UnsupportedOperation(
                    "monthly ledgers have no individual entries".into(),
                )
                .into())
            }
        };
        if removed {
            debug!(id, "removed entry");
            Ok(())
        } else {
            Err(LedgerError::NotFound(format!("entry `{}`", id)).into())
        }
    }

    /// Adds to a bucket's running total for `month`, returning the new total.
    pub fn add_to_bucket(
        document: &mut Document,
        month: MonthKey,
        bucket: Bucket,
        amount: f64,
    ) -> ServiceResult<f64> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Please enter a positive amount.".into(),
            ));
        }
        let Document::V4(doc) = document else {
            return Err(monthly_only());
        };
        let total = doc.month_mut(month).add(bucket, round_cents(amount));
        debug!(month = %month, bucket = %bucket, total, "added to bucket");
        Ok(total)
    }

    /// Overwrites one income field for `month`.
    pub fn set_income(
        document: &mut Document,
        month: MonthKey,
        kind: IncomeKind,
        amount: f64,
    ) -> ServiceResult<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(ServiceError::Invalid(
                "Income must be zero or a positive amount.".into(),
            ));
        }
        let Document::V4(doc) = document else {
            return Err(monthly_only());
        };
        doc.month_mut(month).set_income(kind, round_cents(amount));
        Ok(())
    }

    /// Resets to an empty document of the same version.
    pub fn wipe(document: &mut Document) {
        *document = Document::empty(document.version());
    }

    /// Drops everything recorded for `month`; returns how many records went away.
    pub fn clear_month(document: &mut Document, month: MonthKey) -> usize {
        let removed = match document {
            Document::V1(doc) => retain_outside(&mut doc.transactions, month, |tx| &tx.date),
            Document::V2(doc) => retain_outside(&mut doc.entries, month, |entry| &entry.date),
            Document::V3(doc) => retain_outside(&mut doc.entries, month, |entry| &entry.date),
            Document::V4(doc) => usize::from(doc.months.remove(&month).is_some()),
        };
        debug!(month = %month, removed, "cleared month");
        removed
    }
}

fn invalid_entry() -> ServiceError {
    ServiceError::Invalid(INVALID_ENTRY_MESSAGE.into())
}

fn monthly_only() -> ServiceError {
    LedgerError::UnsupportedOperation(
        "bucket totals and income exist only in monthly ledgers".into(),
    )
    .into()
}

fn remove_by_id<T>(records: &mut Vec<T>, id: &str, id_of: fn(&T) -> &String) -> bool {
    match records.iter().position(|record| id_of(record) == id) {
        Some(index) => {
            records.remove(index);
            true
        }
        None => false,
    }
}

fn retain_outside<T>(records: &mut Vec<T>, month: MonthKey, date_of: fn(&T) -> &String) -> usize {
    let before = records.len();
    records.retain(|record| !month.contains(date_of(record)));
    before - records.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SchemaVersion;

    fn march() -> MonthKey {
        MonthKey::new(2024, 2).unwrap()
    }

    #[test]
    fn add_entry_rounds_and_appears_once_in_its_month() {
        let mut doc = Document::empty(SchemaVersion::V3);
        let id = EntryService::add_entry(
            &mut doc,
            EntryDraft::new("2024-03-05", "food", 12.345_6, " beans "),
        )
        .unwrap();
        let entries = doc.entries().unwrap();
        let matching: Vec<_> = entries.iter().filter(|entry| entry.id() == id).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].amount(), 12.35);
        assert_eq!(matching[0].label(), "Food");
        assert_eq!(matching[0].note(), "beans");
    }

    #[test]
    fn add_entry_rejects_invalid_drafts() {
        let mut doc = Document::empty(SchemaVersion::V3);
        for draft in [
            EntryDraft::new("2024-02-31", "Food", 5.0, ""),
            EntryDraft::new("2024-03-01", "", 5.0, ""),
            EntryDraft::new("2024-03-01", "Food", 0.0, ""),
            EntryDraft::new("2024-03-01", "Food", f64::NAN, ""),
            EntryDraft::new("2024-03-01", "Snacks", 5.0, ""),
        ] {
            let err = EntryService::add_entry(&mut doc, draft).unwrap_err();
            assert_eq!(err.to_string(), INVALID_ENTRY_MESSAGE);
        }
        assert!(doc.is_empty());
    }

    #[test]
    fn v2_keeps_free_text_buckets() {
        let mut doc = Document::empty(SchemaVersion::V2);
        EntryService::add_entry(&mut doc, EntryDraft::new("2024-03-01", "Snacks", 5.0, ""))
            .unwrap();
        assert_eq!(doc.entries().unwrap()[0].label(), "Snacks");
    }

    #[test]
    fn remove_entry_deletes_exactly_one_record() {
        let mut doc = Document::empty(SchemaVersion::V1);
        let first =
            EntryService::add_entry(&mut doc, EntryDraft::new("2024-03-01", "Gym", 40.0, ""))
                .unwrap();
        EntryService::add_entry(&mut doc, EntryDraft::new("2024-03-02", "Gym", 40.0, ""))
            .unwrap();
        EntryService::remove_entry(&mut doc, &first).unwrap();
        assert_eq!(doc.record_count(), 1);
        let err = EntryService::remove_entry(&mut doc, &first).unwrap_err();
        assert!(matches!(err, ServiceError::Ledger(LedgerError::NotFound(_))));
    }

    #[test]
    fn bucket_and_income_edits_need_a_monthly_ledger() {
        let mut doc = Document::empty(SchemaVersion::V4);
        EntryService::add_to_bucket(&mut doc, march(), Bucket::Food, 10.0).unwrap();
        let total = EntryService::add_to_bucket(&mut doc, march(), Bucket::Food, 2.5).unwrap();
        assert_eq!(total, 12.5);
        EntryService::set_income(&mut doc, march(), IncomeKind::Salary, 3000.0).unwrap();
        EntryService::set_income(&mut doc, march(), IncomeKind::Salary, 3100.0).unwrap();
        let record = doc.monthly().unwrap().month(march()).unwrap();
        assert_eq!(record.income_salary, 3100.0);

        assert!(EntryService::add_to_bucket(&mut doc, march(), Bucket::Food, -1.0).is_err());
        let mut v3 = Document::empty(SchemaVersion::V3);
        assert!(EntryService::add_to_bucket(&mut v3, march(), Bucket::Food, 1.0).is_err());
        assert!(
            EntryService::add_entry(&mut doc, EntryDraft::new("2024-03-01", "Food", 1.0, ""))
                .is_err()
        );
    }

    #[test]
    fn clear_month_and_wipe() {
        let mut doc = Document::empty(SchemaVersion::V3);
        for date in ["2024-03-01", "2024-03-31", "2024-04-01"] {
            EntryService::add_entry(&mut doc, EntryDraft::new(date, "Bills", 1.0, "")).unwrap();
        }
        assert_eq!(EntryService::clear_month(&mut doc, march()), 2);
        assert_eq!(doc.record_count(), 1);
        EntryService::wipe(&mut doc);
        assert!(doc.is_empty());
        assert_eq!(doc.version(), SchemaVersion::V3);
    }
}

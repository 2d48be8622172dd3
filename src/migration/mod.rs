//! Schema migration: decoding persisted shapes and upgrading them step by step.

pub mod decode;
pub mod keywords;

use std::collections::BTreeMap;

use tracing::info;

pub use decode::{decode_as, decode_document, detect_version, Decoded};
pub use keywords::{guess_bucket, CATEGORY_KEYWORDS};

use crate::{
    errors::LedgerError,
    ledger::{
        Bucket, BucketDocument, BucketEntry, Document, Entry, EntryDocument, LegacyDocument,
        MonthKey, MonthlyDocument, MonthlyRecord, SchemaVersion,
    },
};

/// Result of [`migrate`]: the upgraded document and the steps that ran, e.g. `["v1->v2"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Migrated {
    pub document: Document,
    pub steps: Vec<String>,
}

/// Upgrades `document` one version at a time until it reaches `target`.
///
/// Migrating to the same version is a no-op; downgrades are rejected.
pub fn migrate(document: Document, target: SchemaVersion) -> Result<Migrated, LedgerError> {
    let found = document.version();
    if found > target {
        return Err(LedgerError::SchemaMismatch {
            found,
            expected: target,
        });
    }

    let mut current = document;
    let mut steps = Vec::new();
    while current.version() < target {
        let from = current.version();
        current = step(current);
        let step_name = format!("{}->{}", from, current.version());
        info!(step = %step_name, records = current.record_count(), "migrated ledger document");
        steps.push(step_name);
    }

    Ok(Migrated {
        document: current,
        steps,
    })
}

fn step(document: Document) -> Document {
    match document {
        Document::V1(doc) => Document::V2(v1_to_v2(doc)),
        Document::V2(doc) => Document::V3(v2_to_v3(doc)),
        Document::V3(doc) => Document::V4(v3_to_v4(doc)),
        latest @ Document::V4(_) => latest,
    }
}

/// Categories become bucket names via keyword matching; an empty note keeps
/// the old category text. A missing category yields `Other` and no note.
pub fn v1_to_v2(doc: LegacyDocument) -> BucketDocument {
    let entries = doc
        .transactions
        .into_iter()
        .map(|tx| {
            let bucket = if tx.category.is_empty() {
                Bucket::Other
            } else {
                guess_bucket(&tx.category)
            };
            let note = if tx.note.is_empty() {
                tx.category
            } else {
                tx.note
            };
            BucketEntry {
                id: tx.id,
                date: tx.date,
                bucket: bucket.as_str().to_string(),
                amount: tx.amount,
                note,
            }
        })
        .collect();
    BucketDocument { entries }
}

/// Free-text bucket labels are matched against the fixed set; unknown labels become `Other`.
pub fn v2_to_v3(doc: BucketDocument) -> EntryDocument {
    let entries = doc
        .entries
        .into_iter()
        .map(|entry| Entry {
            id: entry.id,
            bucket: Bucket::from_label_or_other(&entry.bucket),
            date: entry.date,
            amount: entry.amount,
            note: entry.note,
        })
        .collect();
    EntryDocument::new(entries)
}

/// Folds individual entries into per-month bucket totals. Ids, dates within
/// the month and notes are discarded; incomes start at zero.
pub fn v3_to_v4(doc: EntryDocument) -> MonthlyDocument {
    let mut months: BTreeMap<MonthKey, MonthlyRecord> = BTreeMap::new();
    for entry in doc.entries {
        let Some(key) = MonthKey::from_date_str(&entry.date) else {
            continue;
        };
        months.entry(key).or_default().add(entry.bucket, entry.amount);
    }
    MonthlyDocument::new(months)
}

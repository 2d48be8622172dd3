use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::bucket::Bucket;

/// Read access shared by every transaction-style record, whatever its schema version.
pub trait LedgerEntry {
    fn id(&self) -> &str;
    fn date(&self) -> &str;
    /// Category (v1) or bucket (v2, v3) label.
    fn label(&self) -> &str;
    fn amount(&self) -> f64;
    fn note(&self) -> &str;
}

/// Generates a fresh opaque entry identifier.
pub fn new_entry_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// v1 record: free-text category, empty when the record had none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyTransaction {
    pub id: String,
    pub date: String,
    pub category: String,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

/// v2 record: bucket label kept as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketEntry {
    pub id: String,
    pub date: String,
    pub bucket: String,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

/// v3 record: bucket restricted to the fixed [`Bucket`] set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub date: String,
    pub bucket: Bucket,
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

impl Entry {
    pub fn new(
        date: impl Into<String>,
        bucket: Bucket,
        amount: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            id: new_entry_id(),
            date: date.into(),
            bucket,
            amount,
            note: note.into(),
        }
    }
}

impl LedgerEntry for LegacyTransaction {
    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn label(&self) -> &str {
        if self.category.is_empty() {
            Bucket::Other.as_str()
        } else {
            &self.category
        }
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn note(&self) -> &str {
        &self.note
    }
}

impl LedgerEntry for BucketEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn label(&self) -> &str {
        &self.bucket
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn note(&self) -> &str {
        &self.note
    }
}

impl LedgerEntry for Entry {
    fn id(&self) -> &str {
        &self.id
    }

    fn date(&self) -> &str {
        &self.date
    }

    fn label(&self) -> &str {
        self.bucket.as_str()
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn note(&self) -> &str {
        &self.note
    }
}

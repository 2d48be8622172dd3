use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    calendar::MonthKey,
    entry::{BucketEntry, Entry, LedgerEntry, LegacyTransaction},
    monthly::MonthlyRecord,
};
use crate::errors::LedgerError;

/// Historic document shapes, oldest first. Each version lives under its own storage key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    V1,
    V2,
    #[default]
    V3,
    V4,
}

impl SchemaVersion {
    pub const ALL: [SchemaVersion; 4] = [
        SchemaVersion::V1,
        SchemaVersion::V2,
        SchemaVersion::V3,
        SchemaVersion::V4,
    ];

    pub const LATEST: SchemaVersion = SchemaVersion::V4;

    pub fn number(&self) -> u8 {
        match self {
            SchemaVersion::V1 => 1,
            SchemaVersion::V2 => 2,
            SchemaVersion::V3 => 3,
            SchemaVersion::V4 => 4,
        }
    }

    pub fn storage_key(&self) -> &'static str {
        match self {
            SchemaVersion::V1 => "bp_v1_data",
            SchemaVersion::V2 => "bp_v2_data_buckets",
            SchemaVersion::V3 => "bp_v3_data",
            SchemaVersion::V4 => "bp_v4_monthly",
        }
    }

    pub fn next(&self) -> Option<SchemaVersion> {
        match self {
            SchemaVersion::V1 => Some(SchemaVersion::V2),
            SchemaVersion::V2 => Some(SchemaVersion::V3),
            SchemaVersion::V3 => Some(SchemaVersion::V4),
            SchemaVersion::V4 => None,
        }
    }

    /// Versions older than `self`, newest first.
    pub fn older(&self) -> Vec<SchemaVersion> {
        SchemaVersion::ALL
            .into_iter()
            .filter(|version| version < self)
            .rev()
            .collect()
    }

    /// v1 to v3 keep individual transactions; v4 keeps monthly totals.
    pub fn is_transactional(&self) -> bool {
        !matches!(self, SchemaVersion::V4)
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim().to_ascii_lowercase();
        let digits = trimmed.strip_prefix('v').unwrap_or(&trimmed);
        match digits {
            "1" => Ok(SchemaVersion::V1),
            "2" => Ok(SchemaVersion::V2),
            "3" => Ok(SchemaVersion::V3),
            "4" => Ok(SchemaVersion::V4),
            _ => Err(format!("unknown schema version `{}` (expected v1-v4)", value)),
        }
    }
}

/// v1 document: `{ "transactions": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LegacyDocument {
    pub transactions: Vec<LegacyTransaction>,
}

/// v2 document: `{ "entries": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BucketDocument {
    pub entries: Vec<BucketEntry>,
}

/// v3 document: `{ "schemaVersion": 3, "entries": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDocument {
    schema_version: u8,
    pub entries: Vec<Entry>,
}

impl EntryDocument {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            schema_version: SchemaVersion::V3.number(),
            entries,
        }
    }
}

impl Default for EntryDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// v4 document: `{ "schemaVersion": 4, "months": { "YYYY-MM": {...} } }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDocument {
    schema_version: u8,
    pub months: BTreeMap<MonthKey, MonthlyRecord>,
}

impl MonthlyDocument {
    pub fn new(months: BTreeMap<MonthKey, MonthlyRecord>) -> Self {
        Self {
            schema_version: SchemaVersion::V4.number(),
            months,
        }
    }

    pub fn month(&self, key: MonthKey) -> Option<&MonthlyRecord> {
        self.months.get(&key)
    }

    pub fn month_mut(&mut self, key: MonthKey) -> &mut MonthlyRecord {
        self.months.entry(key).or_default()
    }
}

impl Default for MonthlyDocument {
    fn default() -> Self {
        Self::new(BTreeMap::new())
    }
}

/// The whole persisted ledger for one storage key.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    V1(LegacyDocument),
    V2(BucketDocument),
    V3(EntryDocument),
    V4(MonthlyDocument),
}

impl Document {
    pub fn empty(version: SchemaVersion) -> Self {
        match version {
            SchemaVersion::V1 => Document::V1(LegacyDocument::default()),
            SchemaVersion::V2 => Document::V2(BucketDocument::default()),
            SchemaVersion::V3 => Document::V3(EntryDocument::default()),
            SchemaVersion::V4 => Document::V4(MonthlyDocument::default()),
        }
    }

    pub fn version(&self) -> SchemaVersion {
        match self {
            Document::V1(_) => SchemaVersion::V1,
            Document::V2(_) => SchemaVersion::V2,
            Document::V3(_) => SchemaVersion::V3,
            Document::V4(_) => SchemaVersion::V4,
        }
    }

    /// Transaction-style records in store order; `None` for monthly documents.
    pub fn entries(&self) -> Option<Vec<&dyn LedgerEntry>> {
        match self {
            Document::V1(doc) => Some(as_dyn(&doc.transactions)),
            Document::V2(doc) => Some(as_dyn(&doc.entries)),
            Document::V3(doc) => Some(as_dyn(&doc.entries)),
            Document::V4(_) => None,
        }
    }

    pub fn monthly(&self) -> Option<&MonthlyDocument> {
        match self {
            Document::V4(doc) => Some(doc),
            _ => None,
        }
    }

    /// Entry count for transactional documents, month count for monthly ones.
    pub fn record_count(&self) -> usize {
        match self {
            Document::V1(doc) => doc.transactions.len(),
            Document::V2(doc) => doc.entries.len(),
            Document::V3(doc) => doc.entries.len(),
            Document::V4(doc) => doc.months.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    pub fn to_value(&self) -> Result<serde_json::Value, LedgerError> {
        let value = match self {
            Document::V1(doc) => serde_json::to_value(doc)?,
            Document::V2(doc) => serde_json::to_value(doc)?,
            Document::V3(doc) => serde_json::to_value(doc)?,
            Document::V4(doc) => serde_json::to_value(doc)?,
        };
        Ok(value)
    }

    pub fn to_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string(&self.to_value()?)?)
    }

    pub fn to_pretty_json(&self) -> Result<String, LedgerError> {
        Ok(serde_json::to_string_pretty(&self.to_value()?)?)
    }
}

fn as_dyn<E: LedgerEntry>(records: &[E]) -> Vec<&dyn LedgerEntry> {
    records.iter().map(|record| record as &dyn LedgerEntry).collect()
}

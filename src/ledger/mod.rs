//! Ledger data model: entry shapes for every schema version, buckets, and month keys.

pub mod amount;
pub mod bucket;
pub mod calendar;
pub mod document;
pub mod entry;
pub mod monthly;

pub use amount::{is_valid_amount, round_cents};
pub use bucket::Bucket;
pub use calendar::{
    days_in_month, format_date, is_date_string, parse_entry_date, MonthKey, MONTH_NAMES,
};
pub use document::{
    BucketDocument, Document, EntryDocument, LegacyDocument, MonthlyDocument, SchemaVersion,
};
pub use entry::{new_entry_id, BucketEntry, Entry, LedgerEntry, LegacyTransaction};
pub use monthly::{IncomeKind, MonthlyRecord};

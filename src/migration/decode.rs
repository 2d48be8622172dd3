//! Lenient decoding of persisted or imported JSON into typed documents.
//!
//! Field coercion follows the browser app that produced these files: missing
//! ids are regenerated, dates are cut to ten characters and shape-checked,
//! labels default to `Other`, amounts are coerced like `Number(x || 0)`.
//! Records that still fail validation are dropped and counted, never rejected
//! wholesale.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::debug;

use crate::ledger::{
    is_date_string, is_valid_amount, new_entry_id, Bucket, BucketDocument, BucketEntry, Document,
    Entry, EntryDocument, LegacyDocument, LegacyTransaction, MonthKey, MonthlyDocument,
    MonthlyRecord, SchemaVersion,
};

const DEFAULT_LABEL: &str = "Other";

/// A decoded document plus the number of records that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub document: Document,
    pub dropped: usize,
}

/// Identifies the schema version from the top-level shape, if any.
pub fn detect_version(value: &Value) -> Option<SchemaVersion> {
    let object = value.as_object()?;
    if object.get("months").map_or(false, Value::is_object) {
        return Some(SchemaVersion::V4);
    }
    if object.get("entries").map_or(false, Value::is_array) {
        let tagged_v3 = object.get("schemaVersion").and_then(Value::as_u64) == Some(3);
        return Some(if tagged_v3 {
            SchemaVersion::V3
        } else {
            SchemaVersion::V2
        });
    }
    if object.get("transactions").map_or(false, Value::is_array) {
        return Some(SchemaVersion::V1);
    }
    None
}

/// Decodes whatever shape `value` has.
pub fn decode_document(value: &Value) -> Option<Decoded> {
    decode_as(value, detect_version(value)?)
}

/// Decodes `value` as `version`, or `None` when the top-level shape does not fit.
pub fn decode_as(value: &Value, version: SchemaVersion) -> Option<Decoded> {
    let object = value.as_object()?;
    let decoded = match version {
        SchemaVersion::V1 => {
            let (transactions, dropped) =
                decode_records(object.get("transactions")?.as_array()?, legacy_transaction);
            Decoded {
                document: Document::V1(LegacyDocument { transactions }),
                dropped,
            }
        }
        SchemaVersion::V2 => {
            let (entries, dropped) =
                decode_records(object.get("entries")?.as_array()?, bucket_entry);
            Decoded {
                document: Document::V2(BucketDocument { entries }),
                dropped,
            }
        }
        SchemaVersion::V3 => {
            let (entries, dropped) = decode_records(object.get("entries")?.as_array()?, entry);
            Decoded {
                document: Document::V3(EntryDocument::new(entries)),
                dropped,
            }
        }
        SchemaVersion::V4 => {
            let (months, dropped) = decode_months(object.get("months")?.as_object()?);
            Decoded {
                document: Document::V4(MonthlyDocument::new(months)),
                dropped,
            }
        }
    };
    if decoded.dropped > 0 {
        debug!(
            version = %version,
            dropped = decoded.dropped,
            "dropped invalid records while decoding"
        );
    }
    Some(decoded)
}

fn decode_records<T>(
    raw: &[Value],
    decode: fn(&Map<String, Value>) -> Option<T>,
) -> (Vec<T>, usize) {
    let mut records = Vec::with_capacity(raw.len());
    let mut dropped = 0;
    for item in raw {
        match item.as_object().and_then(decode) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }
    (records, dropped)
}

struct CommonFields {
    id: String,
    date: String,
    amount: f64,
    note: String,
}

fn common_fields(record: &Map<String, Value>) -> Option<CommonFields> {
    let date = coerce_date(record.get("date"));
    let amount = coerce_number(record.get("amount"));
    if !is_date_string(&date) || !is_valid_amount(amount) {
        return None;
    }
    Some(CommonFields {
        id: coerce_id(record.get("id")),
        date,
        amount,
        note: coerce_text(record.get("note")).unwrap_or_default(),
    })
}

fn legacy_transaction(record: &Map<String, Value>) -> Option<LegacyTransaction> {
    let fields = common_fields(record)?;
    Some(LegacyTransaction {
        id: fields.id,
        date: fields.date,
        category: coerce_text(record.get("category")).unwrap_or_default(),
        amount: fields.amount,
        note: fields.note,
    })
}

fn bucket_entry(record: &Map<String, Value>) -> Option<BucketEntry> {
    let fields = common_fields(record)?;
    Some(BucketEntry {
        id: fields.id,
        date: fields.date,
        bucket: coerce_text(record.get("bucket")).unwrap_or_else(|| DEFAULT_LABEL.into()),
        amount: fields.amount,
        note: fields.note,
    })
}

fn entry(record: &Map<String, Value>) -> Option<Entry> {
    let fields = common_fields(record)?;
    let bucket = coerce_text(record.get("bucket"))
        .map(|label| Bucket::from_label_or_other(&label))
        .unwrap_or_default();
    Some(Entry {
        id: fields.id,
        date: fields.date,
        bucket,
        amount: fields.amount,
        note: fields.note,
    })
}

fn decode_months(raw: &Map<String, Value>) -> (BTreeMap<MonthKey, MonthlyRecord>, usize) {
    let mut months = BTreeMap::new();
    let mut dropped = 0;
    for (key, value) in raw {
        let parsed = key.parse::<MonthKey>().ok();
        match (parsed, value.as_object()) {
            (Some(month), Some(record)) => {
                months.insert(month, monthly_record(record));
            }
            _ => dropped += 1,
        }
    }
    (months, dropped)
}

fn monthly_record(record: &Map<String, Value>) -> MonthlyRecord {
    let mut month = MonthlyRecord::new();
    month.income_salary = non_negative(coerce_number(record.get("incomeSalary")));
    month.income_other = non_negative(coerce_number(record.get("incomeOther")));
    if let Some(buckets) = record.get("buckets").and_then(Value::as_object) {
        for (label, value) in buckets {
            let amount = coerce_number(Some(value));
            if is_valid_amount(amount) {
                month.add(Bucket::from_label_or_other(label), amount);
            }
        }
    }
    month
}

fn non_negative(amount: f64) -> f64 {
    if is_valid_amount(amount) {
        amount
    } else {
        0.0
    }
}

/// JavaScript truthiness of a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(false, |n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `String(x || "")` for scalars; `None` when the value is falsy or not a scalar.
fn coerce_text(value: Option<&Value>) -> Option<String> {
    let value = value.filter(|value| is_truthy(value))?;
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn coerce_id(value: Option<&Value>) -> String {
    coerce_text(value).unwrap_or_else(new_entry_id)
}

fn coerce_date(value: Option<&Value>) -> String {
    coerce_text(value)
        .map(|text| text.chars().take(10).collect())
        .unwrap_or_default()
}

/// `Number(x || 0)`: falsy values become 0, numeric strings are parsed after
/// trimming, anything else is NaN.
pub(crate) fn coerce_number(value: Option<&Value>) -> f64 {
    let Some(value) = value.filter(|value| is_truthy(value)) else {
        return 0.0;
    };
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::Bool(_) => 1.0,
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_each_top_level_shape() {
        assert_eq!(
            detect_version(&json!({ "transactions": [] })),
            Some(SchemaVersion::V1)
        );
        assert_eq!(
            detect_version(&json!({ "entries": [] })),
            Some(SchemaVersion::V2)
        );
        assert_eq!(
            detect_version(&json!({ "schemaVersion": 3, "entries": [] })),
            Some(SchemaVersion::V3)
        );
        assert_eq!(
            detect_version(&json!({ "months": {} })),
            Some(SchemaVersion::V4)
        );
        assert_eq!(detect_version(&json!({ "foo": 1 })), None);
        assert_eq!(detect_version(&json!({ "entries": {} })), None);
        assert_eq!(detect_version(&json!([1, 2])), None);
    }

    #[test]
    fn coerces_fields_like_the_browser_app() {
        let value = json!({
            "entries": [
                { "date": "2024-03-01T09:30:00Z", "bucket": "", "amount": "12.50" },
                { "id": 42, "date": "2024-03-02", "bucket": "Food", "amount": null, "note": "free" }
            ]
        });
        let decoded = decode_as(&value, SchemaVersion::V2).unwrap();
        assert_eq!(decoded.dropped, 0);
        let Document::V2(doc) = decoded.document else {
            panic!("expected v2 document");
        };
        assert_eq!(doc.entries[0].date, "2024-03-01");
        assert_eq!(doc.entries[0].bucket, "Other");
        assert_eq!(doc.entries[0].amount, 12.5);
        assert!(!doc.entries[0].id.is_empty());
        assert_eq!(doc.entries[1].id, "42");
        assert_eq!(doc.entries[1].amount, 0.0);
        assert_eq!(doc.entries[1].note, "free");
    }

    #[test]
    fn drops_records_with_bad_dates_or_amounts() {
        let value = json!({
            "entries": [
                { "date": "03/01/2024", "bucket": "Food", "amount": 5 },
                { "date": "2024-03-01", "bucket": "Food", "amount": -5 },
                { "date": "2024-03-01", "bucket": "Food", "amount": "abc" },
                "not an object",
                null,
                { "date": "2024-03-01", "bucket": "Food", "amount": 5 }
            ]
        });
        let decoded = decode_as(&value, SchemaVersion::V2).unwrap();
        assert_eq!(decoded.dropped, 5);
        assert_eq!(decoded.document.record_count(), 1);
    }

    #[test]
    fn v3_buckets_outside_the_fixed_set_become_other() {
        let value = json!({
            "schemaVersion": 3,
            "entries": [{ "id": "a", "date": "2024-03-01", "bucket": "Snacks", "amount": 1 }]
        });
        let Document::V3(doc) = decode_document(&value).unwrap().document else {
            panic!("expected v3 document");
        };
        assert_eq!(doc.entries[0].bucket, Bucket::Other);
    }

    #[test]
    fn monthly_records_fold_unknown_buckets_into_other() {
        let value = json!({
            "months": {
                "2024-03": {
                    "incomeSalary": "1500",
                    "incomeOther": -3,
                    "buckets": { "Food": 20, "Pets": 5, "Other": 1, "Bills": -4 }
                },
                "March": {},
                "2024-04": 7
            }
        });
        let decoded = decode_as(&value, SchemaVersion::V4).unwrap();
        assert_eq!(decoded.dropped, 2);
        let doc = decoded.document.monthly().unwrap().clone();
        let march = doc.month("2024-03".parse().unwrap()).unwrap();
        assert_eq!(march.income_salary, 1500.0);
        assert_eq!(march.income_other, 0.0);
        assert_eq!(march.bucket_total(Bucket::Food), 20.0);
        assert_eq!(march.bucket_total(Bucket::Other), 6.0);
        assert_eq!(march.bucket_total(Bucket::Bills), 0.0);
    }

    #[test]
    fn wrong_shape_for_requested_version_is_rejected() {
        assert!(decode_as(&json!({ "entries": [] }), SchemaVersion::V1).is_none());
        assert!(decode_as(&json!({ "months": [] }), SchemaVersion::V4).is_none());
    }

    #[test]
    fn number_coercion_matches_number_or_zero() {
        assert_eq!(coerce_number(None), 0.0);
        assert_eq!(coerce_number(Some(&json!(false))), 0.0);
        assert_eq!(coerce_number(Some(&json!(" 7.25 "))), 7.25);
        assert!(coerce_number(Some(&json!({}))).is_nan());
        assert!(coerce_number(Some(&json!("12abc"))).is_nan());
    }
}

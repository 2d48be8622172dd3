mod common;

use std::fs;

use budget_planner::{
    core::services::{EntryDraft, TransferService},
    errors::LedgerError,
    ledger::{Bucket, Document, Entry, EntryDocument, IncomeKind, MonthKey, SchemaVersion},
};
use chrono::NaiveDate;
use common::{setup_manager, temp_home};

#[test]
fn export_then_import_restores_the_ledger() {
    let (mut source, _home) = setup_manager(SchemaVersion::V3);
    source
        .add_entry(EntryDraft::new("2024-03-01", "Food", 12.5, "lunch"))
        .unwrap();
    source
        .add_entry(EntryDraft::new("2024-03-02", "health & finance", 80.0, "dentist"))
        .unwrap();

    let backup = temp_home().join("exports").join("backup.json");
    source.export_to_path(&backup).unwrap();

    let (mut target, _home) = setup_manager(SchemaVersion::V3);
    let summary = target.import_path(&backup).unwrap();
    assert_eq!(summary.source_version, SchemaVersion::V3);
    assert_eq!(summary.records, 2);
    assert!(summary.migrations.is_empty());
    assert_eq!(target.document(), source.document());
}

#[test]
fn every_schema_version_survives_export_and_import() {
    let march: MonthKey = "2024-03".parse().unwrap();
    for version in SchemaVersion::ALL {
        let (mut source, _home) = setup_manager(version);
        if version.is_transactional() {
            source
                .add_entry(EntryDraft::new("2024-03-01", "Food", 12.5, "lunch"))
                .unwrap();
            source
                .add_entry(EntryDraft::new("2024-03-09", "Bills", 60.0, ""))
                .unwrap();
        } else {
            source.add_to_bucket(march, Bucket::Food, 12.5).unwrap();
            source.add_to_bucket(march, Bucket::Bills, 60.0).unwrap();
            source.set_income(march, IncomeKind::Other, 250.0).unwrap();
        }
        let exported = source.export_json().unwrap();

        let (mut target, _home) = setup_manager(version);
        let summary = target.import_str(&exported).unwrap();
        assert_eq!(summary.source_version, version);
        assert_eq!(summary.dropped, 0);
        assert!(summary.migrations.is_empty());
        assert_eq!(target.document(), source.document(), "{} round trip", version);
    }
}

#[test]
fn unrecognized_backup_is_rejected_without_changes() {
    let (mut manager, _home) = setup_manager(SchemaVersion::V3);
    manager
        .add_entry(EntryDraft::new("2024-03-01", "Food", 12.5, "lunch"))
        .unwrap();
    let before = manager.document().clone();

    for text in [r#"{"foo":1}"#, "not json", "[]"] {
        let err = manager.import_str(text).unwrap_err();
        assert_eq!(err.to_string(), "That file doesn't look like a valid backup.");
    }
    assert_eq!(manager.document(), &before);
}

#[test]
fn older_backups_are_upgraded_on_import() {
    let (mut manager, _home) = setup_manager(SchemaVersion::V3);
    let legacy = r#"{"transactions":[
        {"id":"x","date":"2024-03-09T10:00:00Z","category":"Coffee shop","amount":4.25},
        {"id":"y","date":"2024-03-10","category":"Rent","amount":-5}
    ]}"#;
    let summary = manager.import_str(legacy).unwrap();
    assert_eq!(summary.source_version, SchemaVersion::V1);
    assert_eq!(summary.migrations, vec!["v1->v2", "v2->v3"]);
    assert_eq!(summary.dropped, 1);

    let Document::V3(doc) = manager.document() else {
        panic!("expected v3 document");
    };
    assert_eq!(doc.entries.len(), 1);
    assert_eq!(doc.entries[0].date, "2024-03-09");
    assert_eq!(doc.entries[0].bucket, Bucket::Food);
    assert_eq!(doc.entries[0].note, "Coffee shop");
}

#[test]
fn newer_backup_is_a_schema_mismatch() {
    let (mut manager, _home) = setup_manager(SchemaVersion::V2);
    let monthly = r#"{"schemaVersion":4,"months":{"2024-03":{"incomeSalary":10,"incomeOther":0,"buckets":{"Food":5}}}}"#;
    let err = TransferService::parse_import(monthly, SchemaVersion::V2).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::SchemaMismatch {
            found: SchemaVersion::V4,
            expected: SchemaVersion::V2
        }
    ));
    assert!(manager.import_str(monthly).is_err());
    assert!(manager.document().is_empty());
}

#[test]
fn export_file_is_named_after_the_day() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    assert_eq!(
        TransferService::export_file_name(day),
        "budget-planner-buckets-2024-03-09.json"
    );
}

#[test]
fn export_format_snapshot() {
    let document = Document::V3(EntryDocument::new(vec![Entry {
        id: "a1".into(),
        date: "2024-03-01".into(),
        bucket: Bucket::Food,
        amount: 12.5,
        note: "lunch".into(),
    }]));
    let json = TransferService::export_json(&document).unwrap();
    insta::assert_snapshot!(json, @r###"
    {
      "entries": [
        {
          "amount": 12.5,
          "bucket": "Food",
          "date": "2024-03-01",
          "id": "a1",
          "note": "lunch"
        }
      ],
      "schemaVersion": 3
    }
    "###);

    let path = temp_home().join("snapshot.json");
    TransferService::export_to_path(&document, &path).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), json);
}

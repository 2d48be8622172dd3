mod common;

use std::fs;

use budget_planner::{
    core::{services::EntryDraft, LedgerManager},
    ledger::{Bucket, Document, SchemaVersion},
    migration::migrate,
    storage::{JsonStorage, LoadSource, RecordStore, StorageBackend},
};
use common::{json_storage, setup_manager, temp_home};

const LEGACY_V1: &str = r#"{
  "transactions": [
    { "id": "t1", "date": "2024-03-01", "category": "Gym", "amount": 40, "note": "" },
    { "id": "t2", "date": "2024-03-02", "category": "Car Payment", "amount": "310.5" },
    { "id": "t3", "date": "2024-03-03", "category": "Pet supplies", "amount": 12, "note": "kibble" },
    { "id": "bad", "date": "yesterday", "category": "Food", "amount": 3 }
  ]
}"#;

#[test]
fn legacy_data_is_upgraded_once_and_left_in_place() {
    let home = temp_home();
    let backend = json_storage(&home);
    backend.write("bp_v1_data", LEGACY_V1).unwrap();

    let store = RecordStore::new(backend.clone(), SchemaVersion::V3);
    let report = store.load();
    assert_eq!(
        report.source,
        LoadSource::Migrated {
            from: SchemaVersion::V1
        }
    );
    assert_eq!(report.dropped, 1);

    let Document::V3(doc) = &report.document else {
        panic!("expected v3 document");
    };
    let buckets: Vec<Bucket> = doc.entries.iter().map(|entry| entry.bucket).collect();
    assert_eq!(
        buckets,
        vec![Bucket::Lifestyle, Bucket::Transportation, Bucket::Other]
    );
    assert_eq!(doc.entries[0].note, "Gym");
    assert_eq!(doc.entries[2].note, "kibble");
    assert_eq!(doc.entries[1].amount, 310.5);

    assert_eq!(backend.read("bp_v1_data").unwrap().as_deref(), Some(LEGACY_V1));
    let second = store.load();
    assert_eq!(second.source, LoadSource::Stored);
    assert_eq!(second.document, report.document);
}

#[test]
fn monthly_store_folds_legacy_entries() {
    let home = temp_home();
    let backend = json_storage(&home);
    backend.write("bp_v1_data", LEGACY_V1).unwrap();

    let report = RecordStore::new(backend, SchemaVersion::V4).load();
    assert_eq!(report.migrations, vec!["v1->v2", "v2->v3", "v3->v4"]);
    let monthly = report.document.monthly().expect("monthly document");
    let march = monthly.month("2024-03".parse().unwrap()).unwrap();
    assert_eq!(march.bucket_total(Bucket::Transportation), 310.5);
    assert_eq!(march.spent(), 362.5);
}

#[test]
fn corrupted_current_key_falls_back_to_older_data() {
    let home = temp_home();
    let backend = json_storage(&home);
    backend.write("bp_v3_data", "{ truncated").unwrap();
    backend
        .write(
            "bp_v2_data_buckets",
            r#"{"entries":[{"id":"e","date":"2024-05-01","bucket":"bills","amount":80}]}"#,
        )
        .unwrap();

    let report = RecordStore::new(backend, SchemaVersion::V3).load();
    assert_eq!(
        report.source,
        LoadSource::Migrated {
            from: SchemaVersion::V2
        }
    );
    assert_eq!(report.document.entries().unwrap()[0].label(), "Bills");
}

#[test]
fn nothing_stored_starts_empty() {
    let (manager, home) = setup_manager(SchemaVersion::V2);
    assert!(manager.document().is_empty());
    assert_eq!(manager.document().version(), SchemaVersion::V2);
    let storage = JsonStorage::new(Some(home)).unwrap();
    assert!(storage.keys().unwrap().is_empty());
}

#[test]
fn every_mutation_rewrites_the_whole_document() {
    let (mut manager, home) = setup_manager(SchemaVersion::V3);
    manager
        .add_entry(EntryDraft::new("2024-03-01", "Food", 12.5, "lunch"))
        .unwrap();
    let id = manager
        .add_entry(EntryDraft::new("2024-03-15", "Food", 7.5, ""))
        .unwrap();
    manager.remove_entry(&id).unwrap();

    let path = JsonStorage::new(Some(home.clone())).unwrap().key_path("bp_v3_data");
    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(raw["schemaVersion"], 3);
    assert_eq!(raw["entries"].as_array().unwrap().len(), 1);

    let mut reopened = LedgerManager::new(RecordStore::new(json_storage(&home), SchemaVersion::V3));
    reopened.load();
    assert_eq!(reopened.document(), manager.document());
}

#[test]
fn migrating_a_current_document_changes_nothing() {
    let (mut manager, _home) = setup_manager(SchemaVersion::V3);
    manager
        .add_entry(EntryDraft::new("2024-03-01", "Housing", 1500.0, "rent"))
        .unwrap();
    let doc = manager.document().clone();
    let migrated = migrate(doc.clone(), SchemaVersion::V3).unwrap();
    assert_eq!(migrated.document, doc);
    assert!(migrated.steps.is_empty());
}

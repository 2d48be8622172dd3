#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use budget_planner::{
    core::LedgerManager,
    ledger::SchemaVersion,
    storage::{JsonStorage, RecordStore},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh application home directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

pub fn json_storage(home: &Path) -> Arc<JsonStorage> {
    Arc::new(JsonStorage::new(Some(home.to_path_buf())).expect("create json storage backend"))
}

/// A loaded manager for `version` backed by file storage in its own directory.
pub fn setup_manager(version: SchemaVersion) -> (LedgerManager, PathBuf) {
    let home = temp_home();
    let store = RecordStore::new(json_storage(&home), version);
    let mut manager = LedgerManager::new(store);
    manager.load();
    (manager, home)
}

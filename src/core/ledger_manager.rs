use std::path::Path;

use tracing::info;

use crate::{
    errors::LedgerError,
    ledger::{Bucket, Document, IncomeKind, MonthKey, SchemaVersion},
    storage::{LoadReport, LoadSource, RecordStore},
};

use super::services::{
    EntryDraft, EntryService, ImportOutcome, ServiceResult, TransferService,
};

/// Metadata describing the outcome of a load operation.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadMetadata {
    pub source: LoadSource,
    pub migrations: Vec<String>,
    pub dropped: usize,
    pub records: usize,
}

/// Summary of an applied import.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub source_version: SchemaVersion,
    pub records: usize,
    pub dropped: usize,
    pub migrations: Vec<String>,
}

/// Facade that owns the active document and persists every change through the record store.
///
/// Mutations run on a copy; the copy replaces the active document only after it was saved.
pub struct LedgerManager {
    store: RecordStore,
    document: Document,
}

impl LedgerManager {
    pub fn new(store: RecordStore) -> Self {
        let document = Document::empty(store.version());
        Self { store, document }
    }

    pub fn load(&mut self) -> LoadMetadata {
        let LoadReport {
            document,
            source,
            migrations,
            dropped,
        } = self.store.load();
        let records = document.record_count();
        self.document = document;
        LoadMetadata {
            source,
            migrations,
            dropped,
            records,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn version(&self) -> SchemaVersion {
        self.store.version()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn add_entry(&mut self, draft: EntryDraft) -> ServiceResult<String> {
        self.commit(|doc| EntryService::add_entry(doc, draft))
    }

    pub fn remove_entry(&mut self, id: &str) -> ServiceResult<()> {
        self.commit(|doc| EntryService::remove_entry(doc, id))
    }

    pub fn add_to_bucket(
        &mut self,
        month: MonthKey,
        bucket: Bucket,
        amount: f64,
    ) -> ServiceResult<f64> {
        self.commit(|doc| EntryService::add_to_bucket(doc, month, bucket, amount))
    }

    pub fn set_income(
        &mut self,
        month: MonthKey,
        kind: IncomeKind,
        amount: f64,
    ) -> ServiceResult<()> {
        self.commit(|doc| EntryService::set_income(doc, month, kind, amount))
    }

    pub fn wipe(&mut self) -> ServiceResult<()> {
        self.commit(|doc| {
            EntryService::wipe(doc);
            Ok(())
        })?;
        info!(version = %self.version(), "wiped ledger");
        Ok(())
    }

    pub fn clear_month(&mut self, month: MonthKey) -> ServiceResult<usize> {
        self.commit(|doc| Ok(EntryService::clear_month(doc, month)))
    }

    /// Replaces the active document with an imported one. Nothing changes on failure.
    pub fn import_str(&mut self, text: &str) -> ServiceResult<ImportSummary> {
        let outcome = TransferService::parse_import(text, self.version())?;
        self.apply_import(outcome)
    }

    pub fn import_path(&mut self, path: &Path) -> ServiceResult<ImportSummary> {
        let outcome = TransferService::import_from_path(path, self.version())?;
        self.apply_import(outcome)
    }

    pub fn export_json(&self) -> Result<String, LedgerError> {
        TransferService::export_json(&self.document)
    }

    pub fn export_to_path(&self, path: &Path) -> Result<(), LedgerError> {
        TransferService::export_to_path(&self.document, path)
    }

    fn apply_import(&mut self, outcome: ImportOutcome) -> ServiceResult<ImportSummary> {
        let ImportOutcome {
            document,
            source_version,
            dropped,
            migrations,
        } = outcome;
        let records = document.record_count();
        self.commit(move |doc| {
            *doc = document;
            Ok(())
        })?;
        info!(from = %source_version, records, dropped, "imported ledger");
        Ok(ImportSummary {
            source_version,
            records,
            dropped,
            migrations,
        })
    }

    fn commit<T>(
        &mut self,
        apply: impl FnOnce(&mut Document) -> ServiceResult<T>,
    ) -> ServiceResult<T> {
        let mut draft = self.document.clone();
        let value = apply(&mut draft)?;
        self.store.save(&draft)?;
        self.document = draft;
        Ok(value)
    }
}

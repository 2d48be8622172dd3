use std::{fs, path::Path};

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

use crate::{
    errors::LedgerError,
    ledger::{format_date, Document, SchemaVersion},
    migration::{self, decode_document},
};

pub const INVALID_BACKUP_MESSAGE: &str = "That file doesn't look like a valid backup.";
const EXPORT_FILE_PREFIX: &str = "budget-planner-buckets";

/// Result of parsing an import file, ready to replace the active document.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub document: Document,
    pub source_version: SchemaVersion,
    pub dropped: usize,
    pub migrations: Vec<String>,
}

pub struct TransferService;

impl TransferService {
    pub fn export_json(document: &Document) -> Result<String, LedgerError> {
        document.to_pretty_json()
    }

    /// `budget-planner-buckets-YYYY-MM-DD.json` for the given day.
    pub fn export_file_name(date: NaiveDate) -> String {
        format!("{}-{}.json", EXPORT_FILE_PREFIX, format_date(date))
    }

    pub fn export_to_path(document: &Document, path: &Path) -> Result<(), LedgerError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, Self::export_json(document)?)?;
        info!(path = %path.display(), records = document.record_count(), "exported ledger");
        Ok(())
    }

    /// Parses and normalizes a backup, migrating it up to `target`.
    ///
    /// Unparsable text or an unknown top-level shape is rejected as an invalid backup;
    /// a backup newer than `target` is a schema mismatch.
    pub fn parse_import(text: &str, target: SchemaVersion) -> Result<ImportOutcome, LedgerError> {
        let value: Value = serde_json::from_str(text).map_err(|err| {
            debug!(error = %err, "import is not valid JSON");
            invalid_backup()
        })?;
        let decoded = decode_document(&value).ok_or_else(invalid_backup)?;
        let source_version = decoded.document.version();
        let migrated = migration::migrate(decoded.document, target)?;
        if decoded.dropped > 0 {
            debug!(dropped = decoded.dropped, "dropped invalid records from import");
        }
        Ok(ImportOutcome {
            document: migrated.document,
            source_version,
            dropped: decoded.dropped,
            migrations: migrated.steps,
        })
    }

    pub fn import_from_path(
        path: &Path,
        target: SchemaVersion,
    ) -> Result<ImportOutcome, LedgerError> {
        let text = fs::read_to_string(path)?;
        Self::parse_import(&text, target)
    }
}

fn invalid_backup() -> LedgerError {
    LedgerError::InvalidImport(INVALID_BACKUP_MESSAGE.into())
}

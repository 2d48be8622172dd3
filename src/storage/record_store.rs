use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use crate::{
    errors::LedgerError,
    ledger::{Document, SchemaVersion},
    migration::{self, decode_as, Decoded},
};

use super::{Result, StorageBackend};

/// Where the document returned by [`RecordStore::load`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Read from the active version's key.
    Stored,
    /// Migrated from an older version's key and persisted under the active key.
    Migrated { from: SchemaVersion },
    /// Nothing usable was stored.
    Empty,
}

/// Outcome of a load: the document plus what happened on the way.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub document: Document,
    pub source: LoadSource,
    pub migrations: Vec<String>,
    pub dropped: usize,
}

/// Loads and saves the document of one schema version against a [`StorageBackend`].
#[derive(Clone)]
pub struct RecordStore {
    backend: Arc<dyn StorageBackend>,
    version: SchemaVersion,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn StorageBackend>, version: SchemaVersion) -> Self {
        Self { backend, version }
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    pub fn key(&self) -> &'static str {
        self.version.storage_key()
    }

    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    /// Reads the active key, falling back to the newest decodable older key.
    ///
    /// Never fails: unreadable or malformed data is logged and treated as absent.
    pub fn load(&self) -> LoadReport {
        if let Some(decoded) = self.read_decoded(self.version) {
            info!(
                key = self.key(),
                records = decoded.document.record_count(),
                "loaded ledger document"
            );
            return LoadReport {
                document: decoded.document,
                source: LoadSource::Stored,
                migrations: Vec::new(),
                dropped: decoded.dropped,
            };
        }

        for older in self.version.older() {
            let Some(decoded) = self.read_decoded(older) else {
                continue;
            };
            let migrated = match migration::migrate(decoded.document, self.version) {
                Ok(migrated) => migrated,
                Err(err) => {
                    warn!(key = older.storage_key(), error = %err, "migration failed");
                    continue;
                }
            };
            if let Err(err) = self.save(&migrated.document) {
                warn!(key = self.key(), error = %err, "failed to persist migrated document");
            }
            info!(
                from = %older,
                to = %self.version,
                records = migrated.document.record_count(),
                "migrated stored ledger document"
            );
            return LoadReport {
                document: migrated.document,
                source: LoadSource::Migrated { from: older },
                migrations: migrated.steps,
                dropped: decoded.dropped,
            };
        }

        info!(key = self.key(), "no stored ledger document, starting empty");
        LoadReport {
            document: Document::empty(self.version),
            source: LoadSource::Empty,
            migrations: Vec::new(),
            dropped: 0,
        }
    }

    /// Overwrites the active key with the whole document.
    pub fn save(&self, document: &Document) -> Result<()> {
        if document.version() != self.version {
            return Err(LedgerError::SchemaMismatch {
                found: document.version(),
                expected: self.version,
            });
        }
        let json = document.to_json()?;
        self.backend.write(self.key(), &json)?;
        info!(
            key = self.key(),
            records = document.record_count(),
            "saved ledger document"
        );
        Ok(())
    }

    fn read_decoded(&self, version: SchemaVersion) -> Option<Decoded> {
        let key = version.storage_key();
        let raw = match self.backend.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, error = %err, "failed to read stored ledger document");
                return None;
            }
        };
        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "stored ledger document is not valid JSON");
                return None;
            }
        };
        let decoded = decode_as(&value, version);
        if decoded.is_none() {
            warn!(key, "stored ledger document has an unexpected shape");
        }
        decoded
    }
}

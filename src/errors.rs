use thiserror::Error;

use crate::ledger::SchemaVersion;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidImport(String),
    #[error("document schema {found} does not match the active schema {expected}")]
    SchemaMismatch {
        found: SchemaVersion,
        expected: SchemaVersion,
    },
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

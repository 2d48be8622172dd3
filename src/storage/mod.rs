pub mod json_backend;
pub mod memory;
pub mod record_store;

use crate::errors::LedgerError;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over a string key-value store holding serialized ledger documents.
pub trait StorageBackend: Send + Sync {
    /// Raw value under `key`, or `None` when nothing was stored.
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    /// Keys currently present, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

pub use json_backend::JsonStorage;
pub use memory::MemoryStorage;
pub use record_store::{LoadReport, LoadSource, RecordStore};

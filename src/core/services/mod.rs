pub mod aggregation_service;
pub mod entry_service;
pub mod query_service;
pub mod transfer_service;

pub use aggregation_service::{
    AggregationService, BucketTotal, Comparison, Direction, MonthSlice, MonthSummary,
};
pub use entry_service::{EntryDraft, EntryService};
pub use query_service::{QueryService, SortKey};
pub use transfer_service::{ImportOutcome, TransferService};

use crate::errors::LedgerError;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error("{0}")]
    Invalid(String),
}

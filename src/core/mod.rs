pub mod ledger_manager;
pub mod services;
pub mod utils;
pub mod view_state;

pub use ledger_manager::{ImportSummary, LedgerManager, LoadMetadata};
pub use view_state::ViewState;

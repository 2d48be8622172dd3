#![doc(test(attr(deny(warnings))))]

//! Budget Planner keeps a personal spending ledger in a key/value store: entries
//! or monthly bucket totals across four schema versions, with migration between
//! them, month aggregation and a filterable entry list.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod migration;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Budget Planner tracing initialized.");
    });
}

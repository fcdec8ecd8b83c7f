//! Heft reconciles a free-text measurement ledger note against a
//! row-per-day sheet: pending values are written to the sheet and the note
//! is replaced with a short rolling history.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes global tracing once per process.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        utils::init_tracing(verbose);
        tracing::debug!("heft tracing initialized");
    });
}

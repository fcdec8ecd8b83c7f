//! heft-core
//!
//! Reconciliation engine for the measurement ledger: row location, pairing,
//! transactional writes and history recomputation.
//! Depends on heft-domain. No CLI, no terminal I/O, no direct storage interactions.

pub mod document;
pub mod error;
pub mod history;
pub mod locator;
pub mod notes;
pub mod pairer;
pub mod reconcile_service;
pub mod settings;
pub mod time;
pub mod writer;

pub use document::TabularDocument;
pub use error::CoreError;
pub use history::HistoryService;
pub use locator::{OpenRange, RowLocator};
pub use notes::{NoteBackend, NoteEntry};
pub use pairer::RowPairer;
pub use reconcile_service::*;
pub use settings::LedgerSettings;
pub use time::{effective_today, Clock, FixedClock};
pub use writer::TransactionalWriter;

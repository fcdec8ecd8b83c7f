//! heft-domain
//!
//! Pure domain models (Measurement, LedgerNote, Sheet, RowPairing) and the
//! ledger-note grammar. No I/O, no CLI, no storage.

pub mod grammar;
pub mod measurement;
pub mod note;
pub mod pairing;
pub mod sheet;

pub use grammar::{format_history, parse, validate, GrammarError};
pub use measurement::{Measurement, Reading, UNKNOWN_TOKEN};
pub use note::LedgerNote;
pub use pairing::RowPairing;
pub use sheet::{CellValue, ColumnLayout, InvalidCellAddress, LedgerRow, Sheet};

use chrono::NaiveDate;
use heft_domain::GrammarError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Malformed ledger note: {0}")]
    Grammar(#[from] GrammarError),
    #[error("No row dated {0} in the sheet's date column")]
    DateNotFound(NaiveDate),
    #[error("Row {row} for {date} already holds a measurement; nothing to do")]
    AlreadyWritten { date: NaiveDate, row: usize },
    #[error(
        "Found {gaps} consecutive rows without a date after row {from_row}; \
         check that the sheet's date column covers the days being written"
    )]
    TooManyGaps { from_row: usize, gaps: usize },
    #[error("Row {row} already holds `{existing}`; no changes have been made")]
    CellAlreadyWritten { row: usize, existing: String },
    #[error(
        "The note holds {provided} pending value(s) but {expected} day(s) are missing a \
         measurement; correct the note (use `?` for a forgotten value)"
    )]
    CountMismatch { expected: usize, provided: usize },
    #[error("Writing the sheet failed: {0}")]
    Write(String),
    #[error(
        "The sheet was written but the ledger note could not be replaced: {reason}. \
         Replace the note text by hand with `{history}`; running again before that \
         stops at an already-written row"
    )]
    NoteReplace { reason: String, history: String },
    #[error("No note titled `{0}` was found")]
    NoteNotFound(String),
    #[error("{count} notes are titled `{title}`; expected exactly one")]
    AmbiguousNote { title: String, count: usize },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

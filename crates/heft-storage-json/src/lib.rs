//! heft-storage-json
//!
//! File-based backends for the reconciliation engine: a JSON sheet document
//! and a directory of plain-text notes.

mod files;
pub mod notes;
pub mod sheet;

pub use notes::LocalNoteStore;
pub use sheet::{load_sheet_from_path, save_sheet_to_path, JsonSheetDocument, SheetBackup};

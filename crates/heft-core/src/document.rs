//! Seam to the row-per-day tabular ledger.

use chrono::NaiveDate;
use heft_domain::{CellValue, ColumnLayout, LedgerRow, Sheet};

use crate::CoreError;

/// Cell-level access to a tabular document. Rows and columns are 1-based.
/// Mutations stay in memory until [`TabularDocument::flush`].
pub trait TabularDocument {
    fn row_count(&self) -> usize;

    /// Cells outside the document read as [`CellValue::Empty`].
    fn read_cell(&self, row: usize, col: usize) -> CellValue;

    fn write_cell(&mut self, row: usize, col: usize, value: CellValue) -> Result<(), CoreError>;

    /// Persists every pending mutation at once.
    fn flush(&mut self) -> Result<(), CoreError>;

    /// First row whose cell in `col` holds exactly `date`.
    fn find_row_by_date(&self, date: NaiveDate, col: usize) -> Option<usize> {
        (1..=self.row_count()).find(|&row| self.read_cell(row, col).as_date() == Some(date))
    }

    fn ledger_row(&self, row: usize, layout: ColumnLayout) -> LedgerRow {
        LedgerRow::new(
            row,
            &self.read_cell(row, layout.date_column),
            self.read_cell(row, layout.measurement_column),
        )
    }
}

/// Purely in-memory document; flushing has nothing to persist.
impl TabularDocument for Sheet {
    fn row_count(&self) -> usize {
        Sheet::row_count(self)
    }

    fn read_cell(&self, row: usize, col: usize) -> CellValue {
        self.cell(row, col).clone()
    }

    fn write_cell(&mut self, row: usize, col: usize, value: CellValue) -> Result<(), CoreError> {
        self.set_cell(row, col, value)
            .map_err(|err| CoreError::InvalidOperation(err.to_string()))
    }

    fn flush(&mut self) -> Result<(), CoreError> {
        Ok(())
    }
}

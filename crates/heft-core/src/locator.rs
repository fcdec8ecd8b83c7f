//! Finds the span of sheet rows that pending values must fill.

use chrono::NaiveDate;
use heft_domain::ColumnLayout;
use tracing::debug;

use crate::{document::TabularDocument, CoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Rows from the first unfilled day up to today, inclusive.
pub struct OpenRange {
    pub start_row: usize,
    pub today_row: usize,
}

pub struct RowLocator;

impl RowLocator {
    /// Exact-match scan of the date column.
    pub fn find_row_for_date<D>(
        document: &D,
        layout: ColumnLayout,
        date: NaiveDate,
    ) -> Result<usize, CoreError>
    where
        D: TabularDocument + ?Sized,
    {
        document
            .find_row_by_date(date, layout.date_column)
            .ok_or(CoreError::DateNotFound(date))
    }

    /// First open row of the run ending at today's row. Fails with
    /// [`CoreError::AlreadyWritten`] when today's row is already filled.
    pub fn find_first_open_row<D>(
        document: &D,
        layout: ColumnLayout,
        today: NaiveDate,
    ) -> Result<usize, CoreError>
    where
        D: TabularDocument + ?Sized,
    {
        Self::locate(document, layout, today).map(|range| range.start_row)
    }

    /// Walks backward from today's row: dated empty rows extend the range,
    /// dateless empty rows are skipped, and the first filled row stops the walk.
    pub fn locate<D>(
        document: &D,
        layout: ColumnLayout,
        today: NaiveDate,
    ) -> Result<OpenRange, CoreError>
    where
        D: TabularDocument + ?Sized,
    {
        let today_row = Self::find_row_for_date(document, layout, today)?;
        if document.ledger_row(today_row, layout).is_recorded() {
            return Err(CoreError::AlreadyWritten {
                date: today,
                row: today_row,
            });
        }

        let mut start_row = today_row;
        for row in (1..=today_row).rev() {
            let entry = document.ledger_row(row, layout);
            if entry.is_recorded() {
                break;
            }
            if entry.has_date() {
                start_row = row;
            }
        }
        debug!(start_row, today_row, "located open rows");
        Ok(OpenRange {
            start_row,
            today_row,
        })
    }

    /// Dated rows with an empty measurement cell in `start..=end`.
    pub fn count_open_rows<D>(document: &D, layout: ColumnLayout, start: usize, end: usize) -> usize
    where
        D: TabularDocument + ?Sized,
    {
        (start..=end)
            .filter(|&row| document.ledger_row(row, layout).is_open())
            .count()
    }
}

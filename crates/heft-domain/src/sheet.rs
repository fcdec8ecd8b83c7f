//! Row-per-day tabular ledger: cells, rows and the in-memory grid.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::measurement::{Measurement, UNKNOWN_TOKEN};

/// Text formats accepted for dates stored as plain text in the date column.
const TEXT_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d %B %Y", "%d %b %Y", "%d/%m/%Y", "%Y/%m/%d"];
const TEXT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static EMPTY_CELL: CellValue = CellValue::Empty;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
/// A single cell. Serialized as `null`, a number, an ISO date or text.
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Date(NaiveDate),
    Text(String),
}

impl CellValue {
    /// True for empty cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Number(_) | CellValue::Date(_) => false,
        }
    }

    /// Interprets the cell as a calendar date, accepting text dates.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            CellValue::Date(date) => Some(*date),
            CellValue::Text(text) => parse_text_date(text.trim()),
            CellValue::Empty | CellValue::Number(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Date(date) => write!(f, "{date}"),
            CellValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&Measurement> for CellValue {
    /// Known values become numbers so spreadsheets treat them as such; the
    /// sentinel stays text so it is never mistaken for a recorded value.
    fn from(measurement: &Measurement) -> Self {
        match measurement {
            Measurement::Known(reading) => CellValue::Number(reading.value()),
            Measurement::Unknown => CellValue::Text(UNKNOWN_TOKEN.to_string()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(date: NaiveDate) -> Self {
        CellValue::Date(date)
    }
}

fn parse_text_date(text: &str) -> Option<NaiveDate> {
    TEXT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, TEXT_DATETIME_FORMAT)
                .ok()
                .map(|datetime| datetime.date())
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Which 1-based columns hold the date and the measurement.
pub struct ColumnLayout {
    pub date_column: usize,
    pub measurement_column: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            date_column: 2,
            measurement_column: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Read-only view of one sheet row under a [`ColumnLayout`].
pub struct LedgerRow {
    pub row_index: usize,
    pub date: Option<NaiveDate>,
    pub measurement: CellValue,
}

impl LedgerRow {
    pub fn new(row_index: usize, date_cell: &CellValue, measurement: CellValue) -> Self {
        Self {
            row_index,
            date: date_cell.as_date(),
            measurement,
        }
    }

    pub fn has_date(&self) -> bool {
        self.date.is_some()
    }

    /// A measurement (or anything else) already occupies the cell.
    pub fn is_recorded(&self) -> bool {
        !self.measurement.is_blank()
    }

    /// Dated and still waiting for its measurement.
    pub fn is_open(&self) -> bool {
        self.has_date() && !self.is_recorded()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Row and column indices start at 1.
pub struct InvalidCellAddress {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for InvalidCellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell ({}, {}) is out of range; rows and columns start at 1",
            self.row, self.col
        )
    }
}

impl std::error::Error for InvalidCellAddress {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// In-memory grid. Reads outside the stored rows yield empty cells and
/// writes grow the grid as needed.
pub struct Sheet {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn push_row(&mut self, cells: Vec<CellValue>) -> usize {
        self.rows.push(cells);
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> &CellValue {
        if row == 0 || col == 0 {
            return &EMPTY_CELL;
        }
        self.rows
            .get(row - 1)
            .and_then(|cells| cells.get(col - 1))
            .unwrap_or(&EMPTY_CELL)
    }

    pub fn set_cell(
        &mut self,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<(), InvalidCellAddress> {
        if row == 0 || col == 0 {
            return Err(InvalidCellAddress { row, col });
        }
        if self.rows.len() < row {
            self.rows.resize_with(row, Vec::new);
        }
        let cells = &mut self.rows[row - 1];
        if cells.len() < col {
            cells.resize_with(col, CellValue::default);
        }
        cells[col - 1] = value;
        Ok(())
    }
}

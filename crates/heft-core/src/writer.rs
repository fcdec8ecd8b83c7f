//! All-or-nothing application of a validated pairing.

use heft_domain::{CellValue, ColumnLayout, RowPairing};
use tracing::info;

use crate::{document::TabularDocument, CoreError};

pub struct TransactionalWriter;

impl TransactionalWriter {
    /// Sets every paired cell, then flushes once. The pairing is trusted as
    /// produced by [`crate::RowPairer`]; nothing is re-validated here.
    pub fn write<D>(
        document: &mut D,
        layout: ColumnLayout,
        pairing: &RowPairing,
    ) -> Result<usize, CoreError>
    where
        D: TabularDocument + ?Sized,
    {
        for (row, measurement) in pairing.iter() {
            document
                .write_cell(row, layout.measurement_column, CellValue::from(measurement))
                .map_err(into_write_error)?;
        }
        document.flush().map_err(into_write_error)?;
        info!(rows = pairing.len(), "wrote measurements to the sheet");
        Ok(pairing.len())
    }
}

fn into_write_error(err: CoreError) -> CoreError {
    match err {
        CoreError::Write(_) => err,
        other => CoreError::Write(other.to_string()),
    }
}

//! Assigns pending measurements to sheet rows before anything is written.

use heft_domain::{ColumnLayout, Measurement, RowPairing};
use tracing::debug;

use crate::{document::TabularDocument, CoreError};

pub struct RowPairer;

impl RowPairer {
    /// Walks forward from `start_row`, skipping at most `max_gap - 1`
    /// consecutive dateless rows between values. Every target cell must be
    /// empty; any failure returns no pairing at all.
    pub fn pair<D>(
        document: &D,
        layout: ColumnLayout,
        pending: &[Measurement],
        start_row: usize,
        max_gap: usize,
    ) -> Result<RowPairing, CoreError>
    where
        D: TabularDocument + ?Sized,
    {
        let mut pairing = RowPairing::new();
        let mut current_row = start_row;

        for measurement in pending {
            let mut gaps = 0;
            let mut entry = document.ledger_row(current_row, layout);
            while !entry.has_date() {
                current_row += 1;
                gaps += 1;
                if gaps >= max_gap {
                    return Err(CoreError::TooManyGaps {
                        from_row: current_row - gaps,
                        gaps,
                    });
                }
                entry = document.ledger_row(current_row, layout);
            }

            if entry.is_recorded() {
                return Err(CoreError::CellAlreadyWritten {
                    row: current_row,
                    existing: entry.measurement.to_string(),
                });
            }
            if !pairing.insert(current_row, measurement.clone()) {
                return Err(CoreError::InvalidOperation(format!(
                    "row {current_row} was paired twice"
                )));
            }
            current_row += 1;
        }

        debug!(rows = ?pairing.rows(), "paired pending measurements");
        Ok(pairing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{measurements, sheet_from};
    use heft_domain::{CellValue, Sheet};

    fn layout() -> ColumnLayout {
        ColumnLayout {
            date_column: 1,
            measurement_column: 2,
        }
    }

    /// Rows 1..=9 are filled history, open dated rows follow from row 10.
    fn sheet_with_open_rows_from_ten(open: &[Option<u32>]) -> Sheet {
        let mut rows: Vec<(Option<u32>, Option<&str>)> =
            (1..=9).map(|n| (Some(n), Some("80"))).collect();
        rows.extend(open.iter().map(|date| (*date, None)));
        sheet_from(&rows)
    }

    fn rendered(pairing: &RowPairing) -> Vec<(usize, String)> {
        pairing
            .iter()
            .map(|(row, measurement)| (row, measurement.to_string()))
            .collect()
    }

    #[test]
    fn pairs_contiguous_rows_exactly() {
        let sheet = sheet_with_open_rows_from_ten(&[
            Some(10),
            Some(11),
            Some(12),
            Some(13),
            Some(14),
        ]);
        let pending = measurements(&["70", "71", "?", "69.5", "70"]);

        let pairing = RowPairer::pair(&sheet, layout(), &pending, 10, 10).unwrap();

        assert_eq!(
            rendered(&pairing),
            vec![
                (10, "70".to_string()),
                (11, "71".to_string()),
                (12, "?".to_string()),
                (13, "69.5".to_string()),
                (14, "70".to_string()),
            ]
        );
    }

    #[test]
    fn skips_dateless_rows() {
        let sheet =
            sheet_with_open_rows_from_ten(&[Some(10), Some(11), Some(12), None, Some(13)]);
        let pending = measurements(&["70", "71", "72", "73"]);

        let pairing = RowPairer::pair(&sheet, layout(), &pending, 10, 10).unwrap();

        assert_eq!(pairing.rows(), vec![10, 11, 12, 14]);
        assert_eq!(pairing.get(14), Some(&"73".parse().unwrap()));
    }

    #[test]
    fn gap_counter_resets_after_each_assignment() {
        let sheet = sheet_with_open_rows_from_ten(&[Some(10), None, Some(11), None, Some(12)]);
        let pending = measurements(&["70", "71", "72"]);

        let pairing = RowPairer::pair(&sheet, layout(), &pending, 10, 2).unwrap();

        assert_eq!(pairing.rows(), vec![10, 12, 14]);
    }

    #[test]
    fn too_many_gaps_fails() {
        let sheet = sheet_with_open_rows_from_ten(&[Some(10), None, None, None]);
        let pending = measurements(&["70", "71"]);

        let err = RowPairer::pair(&sheet, layout(), &pending, 10, 3).unwrap_err();

        assert!(matches!(err, CoreError::TooManyGaps { from_row: 11, gaps: 3 }));
    }

    #[test]
    fn header_start_row_counts_as_gap() {
        let mut sheet = sheet_from(&[(Some(1), None), (Some(2), None)]);
        sheet.rows.insert(0, vec!["Date column title".into()]);
        let pending = measurements(&["70.5", "71.2"]);

        let pairing = RowPairer::pair(&sheet, layout(), &pending, 1, 10).unwrap();
        assert_eq!(pairing.rows(), vec![2, 3]);

        assert!(matches!(
            RowPairer::pair(&sheet, layout(), &pending, 1, 1),
            Err(CoreError::TooManyGaps { .. })
        ));
    }

    #[test]
    fn collision_fails_without_partial_map() {
        let mut sheet = sheet_with_open_rows_from_ten(&[Some(10), Some(11), Some(12)]);
        sheet.set_cell(12, 2, CellValue::Number(70.0)).unwrap();
        let pending = measurements(&["70", "71", "72"]);

        let err = RowPairer::pair(&sheet, layout(), &pending, 10, 10).unwrap_err();

        match err {
            CoreError::CellAlreadyWritten { row, existing } => {
                assert_eq!(row, 12);
                assert_eq!(existing, "70");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_pending_pairs_nothing() {
        let sheet = sheet_with_open_rows_from_ten(&[Some(10)]);
        let pairing = RowPairer::pair(&sheet, layout(), &[], 10, 10).unwrap();
        assert!(pairing.is_empty());
    }

    #[test]
    fn text_dates_are_accepted() {
        let mut sheet = Sheet::new("text dates");
        sheet.push_row(vec!["2021-01-01".into()]);
        sheet.push_row(vec!["2021-01-02".into()]);
        let pairing =
            RowPairer::pair(&sheet, layout(), &measurements(&["70.5", "71.2"]), 1, 10).unwrap();
        assert_eq!(pairing.rows(), vec![1, 2]);
    }
}

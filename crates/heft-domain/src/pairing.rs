//! Validated, pre-write assignment of pending measurements to sheet rows.

use crate::measurement::Measurement;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered `row → measurement` map. Entry `i` corresponds to pending value
/// `i`; a row can only be targeted once.
pub struct RowPairing {
    entries: Vec<(usize, Measurement)>,
}

impl RowPairing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pairing. Returns `false` (and leaves the map untouched) when
    /// the row is already taken.
    #[must_use]
    pub fn insert(&mut self, row: usize, measurement: Measurement) -> bool {
        if self.contains_row(row) {
            return false;
        }
        self.entries.push((row, measurement));
        true
    }

    pub fn contains_row(&self, row: usize) -> bool {
        self.entries.iter().any(|(existing, _)| *existing == row)
    }

    pub fn get(&self, row: usize) -> Option<&Measurement> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == row)
            .map(|(_, measurement)| measurement)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Measurement)> + '_ {
        self.entries.iter().map(|(row, measurement)| (*row, measurement))
    }

    pub fn rows(&self) -> Vec<usize> {
        self.entries.iter().map(|(row, _)| *row).collect()
    }
}

//! The free-text ledger note split into committed history and pending values.

use std::{fmt, str::FromStr};

use crate::{
    grammar::{self, format_history, join_values, GrammarError},
    measurement::Measurement,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerNote {
    /// Values already written to the sheet, kept for reference. Oldest first.
    pub history: Vec<Measurement>,
    /// Values entered since the last run, not yet written. Oldest first.
    pub pending: Vec<Measurement>,
}

impl LedgerNote {
    pub fn new(history: Vec<Measurement>, pending: Vec<Measurement>) -> Self {
        Self { history, pending }
    }

    /// The canonical post-run shape: history and nothing pending.
    pub fn history_only(history: Vec<Measurement>) -> Self {
        Self::new(history, Vec::new())
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty() && self.pending.is_empty()
    }
}

impl FromStr for LedgerNote {
    type Err = GrammarError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        grammar::parse(text)
    }
}

impl fmt::Display for LedgerNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_history(&self.history))?;
        f.write_str(&join_values(&self.pending))
    }
}

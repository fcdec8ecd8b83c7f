//! Immutable options threaded through every reconciliation component.

use heft_domain::ColumnLayout;

pub const DEFAULT_MAX_ROW_GAP: usize = 10;
pub const DEFAULT_HISTORY_WINDOW: usize = 3;
pub const DEFAULT_ROLLOVER_HOUR: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSettings {
    pub layout: ColumnLayout,
    /// How many of the most recent values the rewritten note keeps. `0` is
    /// treated as `1`.
    pub history_window_size: usize,
    /// Consecutive dateless rows the pairer may skip before giving up.
    pub max_row_gap: usize,
    /// Runs before this local hour count as the previous day.
    pub day_rollover_hour: u32,
    /// Stop when the note was not edited during the current day.
    pub require_fresh_note: bool,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            layout: ColumnLayout::default(),
            history_window_size: DEFAULT_HISTORY_WINDOW,
            max_row_gap: DEFAULT_MAX_ROW_GAP,
            day_rollover_hour: DEFAULT_ROLLOVER_HOUR,
            require_fresh_note: true,
        }
    }
}

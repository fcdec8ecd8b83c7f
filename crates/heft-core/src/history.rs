//! Rebuilds the committed history kept in the replacement ledger note.

use heft_domain::Measurement;

pub struct HistoryService;

impl HistoryService {
    /// Old history followed by the newly written values, trimmed to the most
    /// recent `window` entries. A window of `0` keeps one value.
    pub fn recompute_history(
        history: &[Measurement],
        newly_written: &[Measurement],
        window: usize,
    ) -> Vec<Measurement> {
        let window = window.max(1);
        let combined: Vec<Measurement> = history.iter().chain(newly_written).cloned().collect();
        let skip = combined.len().saturating_sub(window);
        combined.into_iter().skip(skip).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::measurements;
    use heft_domain::{format_history, LedgerNote};

    #[test]
    fn keeps_most_recent_values() {
        let recomputed = HistoryService::recompute_history(
            &measurements(&["70.1", "70.2"]),
            &measurements(&["82.2", "83.4"]),
            2,
        );
        assert_eq!(format_history(&recomputed), "(82.2, 83.4), ");
    }

    #[test]
    fn window_can_reach_back_into_old_history() {
        let recomputed = HistoryService::recompute_history(
            &measurements(&["70.1", "71.1"]),
            &measurements(&["83.4"]),
            2,
        );
        assert_eq!(format_history(&recomputed), "(71.1, 83.4), ");
    }

    #[test]
    fn short_history_is_kept_whole() {
        let recomputed =
            HistoryService::recompute_history(&[], &measurements(&["?", "85"]), 3);
        assert_eq!(recomputed, measurements(&["?", "85"]));
    }

    #[test]
    fn zero_window_keeps_one_value() {
        let recomputed =
            HistoryService::recompute_history(&measurements(&["70"]), &measurements(&["71"]), 0);
        assert_eq!(recomputed, measurements(&["71"]));
    }

    #[test]
    fn replacement_text_is_history_only() {
        let note: LedgerNote = "(82.3, 84.5), ?, 85, ".parse().unwrap();
        let text = format_history(&HistoryService::recompute_history(
            &note.history,
            &note.pending,
            2,
        ));
        assert_eq!(text, "(?, 85), ");
        let reparsed: LedgerNote = text.parse().unwrap();
        assert!(!reparsed.has_pending());
    }
}

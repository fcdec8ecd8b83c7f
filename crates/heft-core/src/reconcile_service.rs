//! One reconciliation run: plan against the current note and sheet, then
//! commit the sheet write followed by the note replacement.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use heft_domain::{format_history, GrammarError, LedgerNote, Measurement, RowPairing};
use tracing::{debug, info, warn};

use crate::{
    document::TabularDocument, effective_today, history::HistoryService, locator::RowLocator,
    notes::NoteBackend, pairer::RowPairer, settings::LedgerSettings, time::Clock,
    writer::TransactionalWriter, CoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Idle,
    Fetched,
    Validated,
    Parsed,
    RowsLocated,
    Paired,
    Written,
    HistoryRecomputed,
    NoteReplaced,
    Done,
    Failed,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunStage::Idle => "idle",
            RunStage::Fetched => "note fetched",
            RunStage::Validated => "note validated",
            RunStage::Parsed => "note parsed",
            RunStage::RowsLocated => "rows located",
            RunStage::Paired => "values paired",
            RunStage::Written => "sheet written",
            RunStage::HistoryRecomputed => "history recomputed",
            RunStage::NoteReplaced => "note replaced",
            RunStage::Done => "done",
            RunStage::Failed => "failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Everything needed to commit, computed without touching either backend.
pub struct ReconcilePlan {
    pub today: NaiveDate,
    pub start_row: usize,
    pub today_row: usize,
    pub note: LedgerNote,
    pub pairing: RowPairing,
    pub new_history: Vec<Measurement>,
}

impl ReconcilePlan {
    pub fn replacement_text(&self) -> String {
        format_history(&self.new_history)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Ready(ReconcilePlan),
    /// The note only holds history.
    NothingPending { today: NaiveDate },
    /// Today's row is already filled in.
    AlreadyWritten { date: NaiveDate, row: usize },
    /// The note was not edited since the current day started.
    NoteStale {
        edited_at: NaiveDateTime,
        today: NaiveDate,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub rows_written: usize,
    pub replacement_text: String,
}

pub struct ReconcileService {
    settings: LedgerSettings,
    stage: RunStage,
}

impl ReconcileService {
    pub fn new(settings: LedgerSettings) -> Self {
        Self {
            settings,
            stage: RunStage::Idle,
        }
    }

    /// Last stage reached; [`RunStage::Failed`] after any error.
    pub fn stage(&self) -> RunStage {
        self.stage
    }

    pub fn plan(
        &mut self,
        notes: &dyn NoteBackend,
        document: &dyn TabularDocument,
        clock: &dyn Clock,
    ) -> Result<PlanOutcome, CoreError> {
        self.stage = RunStage::Idle;
        let outcome = self.build_plan(notes, document, clock);
        if outcome.is_err() {
            self.advance(RunStage::Failed);
        }
        outcome
    }

    /// Writes the sheet, then replaces the note. The order is fixed: a note
    /// failure after a successful write leaves the sheet ahead of the note and
    /// is reported as [`CoreError::NoteReplace`].
    pub fn commit(
        &mut self,
        plan: &ReconcilePlan,
        notes: &mut dyn NoteBackend,
        document: &mut dyn TabularDocument,
    ) -> Result<ReconcileReport, CoreError> {
        let rows_written =
            match TransactionalWriter::write(document, self.settings.layout, &plan.pairing) {
                Ok(rows) => rows,
                Err(err) => {
                    self.advance(RunStage::Failed);
                    return Err(err);
                }
            };
        self.advance(RunStage::Written);

        let replacement_text = plan.replacement_text();
        self.advance(RunStage::HistoryRecomputed);

        if let Err(err) = notes.replace_ledger_note(&replacement_text) {
            warn!(
                error = %err,
                history = %replacement_text,
                "sheet written but ledger note not replaced"
            );
            self.advance(RunStage::Failed);
            return Err(CoreError::NoteReplace {
                reason: err.to_string(),
                history: replacement_text,
            });
        }
        self.advance(RunStage::NoteReplaced);
        info!(history = %replacement_text, "ledger note replaced");

        self.advance(RunStage::Done);
        Ok(ReconcileReport {
            rows_written,
            replacement_text,
        })
    }

    fn build_plan(
        &mut self,
        notes: &dyn NoteBackend,
        document: &dyn TabularDocument,
        clock: &dyn Clock,
    ) -> Result<PlanOutcome, CoreError> {
        let settings = self.settings;
        let today = effective_today(clock.now(), settings.day_rollover_hour);

        let entry = notes.fetch_ledger_note()?;
        self.advance(RunStage::Fetched);

        if settings.require_fresh_note {
            if let Some(edited_at) = entry.edited_at {
                if edited_at < start_of_day(today) {
                    return Ok(PlanOutcome::NoteStale { edited_at, today });
                }
            }
        }

        heft_domain::validate(&entry.text)?;
        self.advance(RunStage::Validated);
        let note = heft_domain::parse(&entry.text)?;
        self.advance(RunStage::Parsed);

        let range = match RowLocator::locate(document, settings.layout, today) {
            Ok(range) => range,
            Err(CoreError::AlreadyWritten { date, row }) => {
                return Ok(PlanOutcome::AlreadyWritten { date, row });
            }
            Err(err) => return Err(err),
        };
        self.advance(RunStage::RowsLocated);

        if !note.has_pending() {
            return Ok(PlanOutcome::NothingPending { today });
        }

        if let Some(odd) = note.pending.iter().find(|m| !m.has_conventional_shape()) {
            return Err(GrammarError::UnconventionalValue(odd.to_string()).into());
        }

        let expected = RowLocator::count_open_rows(
            document,
            settings.layout,
            range.start_row,
            range.today_row,
        );
        if expected != note.pending.len() {
            return Err(CoreError::CountMismatch {
                expected,
                provided: note.pending.len(),
            });
        }

        let pairing = RowPairer::pair(
            document,
            settings.layout,
            &note.pending,
            range.start_row,
            settings.max_row_gap,
        )?;
        self.advance(RunStage::Paired);

        let new_history = HistoryService::recompute_history(
            &note.history,
            &note.pending,
            settings.history_window_size,
        );
        Ok(PlanOutcome::Ready(ReconcilePlan {
            today,
            start_row: range.start_row,
            today_row: range.today_row,
            note,
            pairing,
            new_history,
        }))
    }

    fn advance(&mut self, stage: RunStage) {
        debug!(from = %self.stage, to = %stage, "reconcile stage");
        self.stage = stage;
    }
}

/// Midnight of the effective day. The rollover hour only picks the day.
fn start_of_day(today: NaiveDate) -> NaiveDateTime {
    today.and_time(NaiveTime::MIN)
}

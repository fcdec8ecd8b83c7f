use std::io::IsTerminal;

use dialoguer::{theme::ColorfulTheme, Confirm};
use heft_core::{PlanOutcome, ReconcilePlan, ReconcileService};

use crate::{
    cli::{output::Formatter, AppContext, ReconcileArgs},
    errors::CliError,
};

pub fn run(context: &AppContext, args: ReconcileArgs) -> Result<(), CliError> {
    let formatter = context.formatter();
    let clock = context.clock()?;
    let mut notes = context.note_store();
    let mut sheet = context.open_sheet()?;
    let mut service = ReconcileService::new(context.settings());

    let plan = match service.plan(&notes, &sheet, clock.as_ref())? {
        PlanOutcome::Ready(plan) => plan,
        PlanOutcome::NothingPending { today } => {
            formatter.print_info(format!(
                "The ledger note has no pending values; nothing to write for {today}."
            ));
            return Ok(());
        }
        PlanOutcome::AlreadyWritten { date, row } => {
            formatter.print_info(format!(
                "Row {row} for {date} already holds a measurement; nothing to do."
            ));
            return Ok(());
        }
        PlanOutcome::NoteStale { edited_at, today } => {
            formatter.print_warning(format!(
                "The ledger note was last edited {}, before {today} began. \
                 Add today's value (a `?` is fine) and run again.",
                edited_at.format("%Y-%m-%d %H:%M")
            ));
            return Ok(());
        }
    };

    print_plan(&formatter, &plan);
    if args.dry_run {
        formatter.print_info("Dry run: the sheet and the note were left untouched.");
        return Ok(());
    }
    if !args.yes && !confirm()? {
        formatter.print_info("Cancelled; no changes made.");
        return Ok(());
    }

    let report = service.commit(&plan, &mut notes, &mut sheet)?;
    formatter.print_success(format!(
        "Wrote {} value(s) to {}",
        report.rows_written,
        sheet.path().display()
    ));
    formatter.print_success(format!(
        "Ledger note replaced with `{}`",
        report.replacement_text
    ));
    Ok(())
}

fn print_plan(formatter: &Formatter, plan: &ReconcilePlan) {
    formatter.print_header(format!("Reconcile up to {}", plan.today));
    let rows: Vec<(String, String)> = plan
        .pairing
        .iter()
        .map(|(row, value)| (format!("Row {row}"), value.to_string()))
        .collect();
    formatter.print_two_column(&rows);
    formatter.print_info(format!("New note text: `{}`", plan.replacement_text()));
}

fn confirm() -> Result<bool, CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidArguments(
            "confirmation needs an interactive terminal; pass --yes to commit without asking"
                .into(),
        ));
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Write these values and replace the note?")
        .default(false)
        .interact()
        .map_err(CliError::from)
}

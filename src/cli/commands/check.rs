use heft_core::NoteBackend;
use heft_domain::{LedgerNote, Measurement};

use crate::{cli::AppContext, errors::CliError};

/// Parses the ledger note without touching the sheet.
pub fn run(context: &AppContext) -> Result<(), CliError> {
    let formatter = context.formatter();
    let store = context.note_store();
    let path = store.ledger_note_path()?;
    let entry = store.fetch_ledger_note()?;
    let note: LedgerNote = heft_domain::parse(&entry.text).map_err(heft_core::CoreError::from)?;

    formatter.print_header(format!("Ledger note `{}`", entry.title));
    let mut rows = vec![
        ("File".to_string(), path.display().to_string()),
        ("History".to_string(), describe(&note.history)),
        ("Pending".to_string(), describe(&note.pending)),
    ];
    if let Some(edited_at) = entry.edited_at {
        rows.push((
            "Edited".to_string(),
            edited_at.format("%Y-%m-%d %H:%M").to_string(),
        ));
    }
    formatter.print_two_column(&rows);

    let unconventional: Vec<String> = note
        .pending
        .iter()
        .filter(|value| !value.has_conventional_shape())
        .map(ToString::to_string)
        .collect();
    if !unconventional.is_empty() {
        formatter.print_warning(format!(
            "Pending value(s) {} will be rejected (expected 2-3 digits and at most one decimal)",
            unconventional.join(", ")
        ));
    } else if note.has_pending() {
        formatter.print_success(format!("{} pending value(s) ready", note.pending.len()));
    } else {
        formatter.print_info("Nothing pending.");
    }
    Ok(())
}

fn describe(values: &[Measurement]) -> String {
    if values.is_empty() {
        return "(none)".into();
    }
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_lists_values_in_order() {
        let note: LedgerNote = "(82.3), ?, 85".parse().unwrap();
        assert_eq!(describe(&note.history), "82.3");
        assert_eq!(describe(&note.pending), "?, 85");
        assert_eq!(describe(&[]), "(none)");
    }
}

use crate::{
    cli::{AppContext, ConfigCommand},
    errors::CliError,
};
use heft_config::{Config, ConfigError};

pub fn run(context: &AppContext, command: ConfigCommand) -> Result<(), CliError> {
    match command {
        ConfigCommand::Show { json: true } => show_json(context),
        ConfigCommand::Show { json: false } => show(context),
        ConfigCommand::Init { force } => init(context, force),
        ConfigCommand::Path => {
            println!("{}", context.config_manager().config_path().display());
            Ok(())
        }
    }
}

fn show(context: &AppContext) -> Result<(), CliError> {
    let formatter = context.formatter();
    let config = context.config();
    let manager = context.config_manager();

    formatter.print_header("Configuration");
    let source = if manager.exists() {
        manager.config_path().display().to_string()
    } else {
        format!("{} (not written; defaults)", manager.config_path().display())
    };
    let rows = vec![
        ("Config file".to_string(), source),
        ("Note title".to_string(), config.note_title.clone()),
        (
            "Notes dir".to_string(),
            config.resolve_notes_dir().display().to_string(),
        ),
        (
            "Notes archive".to_string(),
            config.resolve_notes_archive_dir().display().to_string(),
        ),
        ("Sheet".to_string(), context.sheet_path().display().to_string()),
        (
            "Sheet backups".to_string(),
            format!(
                "{} (keep {})",
                config.resolve_sheet_backup_dir(context.home()).display(),
                config.backup_retention
            ),
        ),
        (
            "Columns".to_string(),
            format!(
                "date {}, measurement {}",
                config.date_column, config.measurement_column
            ),
        ),
        (
            "History window".to_string(),
            config.history_window_size.to_string(),
        ),
        ("Max row gap".to_string(), config.max_row_gap.to_string()),
        (
            "Day starts at".to_string(),
            format!("{:02}:00", config.day_rollover_hour),
        ),
        (
            "Fresh note only".to_string(),
            config.require_fresh_note.to_string(),
        ),
        ("Theme".to_string(), config.theme.to_string()),
    ];
    formatter.print_two_column(&rows);
    Ok(())
}

fn show_json(context: &AppContext) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(context.config())
        .map_err(|err| ConfigError::Serde(err.to_string()))?;
    println!("{json}");
    Ok(())
}

fn init(context: &AppContext, force: bool) -> Result<(), CliError> {
    let formatter = context.formatter();
    let manager = context.config_manager();

    if manager.exists() && !force {
        formatter.print_warning(format!(
            "{} already exists; pass --force to overwrite it",
            manager.config_path().display()
        ));
        return Ok(());
    }
    if let Some(backup) = manager.backup_existing()? {
        formatter.print_info(format!("Previous configuration kept as {backup}"));
    }
    manager.save(&Config::default())?;
    formatter.print_success(format!(
        "Wrote default configuration to {}",
        manager.config_path().display()
    ));
    Ok(())
}

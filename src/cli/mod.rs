//! Command-line surface of the `heft` binary.

pub mod commands;
pub mod context;
pub mod output;
pub mod system_clock;

use clap::{Args, Parser, Subcommand};

use crate::errors::CliError;

pub use context::AppContext;

#[derive(Debug, Parser)]
#[command(
    name = "heft",
    version,
    about = "Reconcile a measurement ledger note with a row-per-day sheet"
)]
pub struct Cli {
    /// Log engine decisions to stderr (overrides HEFT_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the note's pending values to the sheet and replace the note
    /// with the recent history.
    Reconcile(ReconcileArgs),
    /// Parse the ledger note and show its history and pending values.
    Check,
    /// Inspect or create the configuration file.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Show build metadata.
    Version,
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct ReconcileArgs {
    /// Show what would be written without touching the sheet or the note.
    #[arg(long)]
    pub dry_run: bool,

    /// Commit without asking for confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigCommand {
    /// Print the active configuration and the paths it resolves to.
    Show {
        /// Print the raw JSON instead.
        #[arg(long)]
        json: bool,
    },
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file (a backup is kept).
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file location.
    Path,
}

/// Parses the process arguments, initializes logging and runs the command.
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    crate::init(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Version = cli.command {
        commands::version::run();
        return Ok(());
    }

    let context = AppContext::load()?;
    match cli.command {
        Command::Reconcile(args) => commands::reconcile::run(&context, args),
        Command::Check => commands::check::run(&context),
        Command::Config(command) => commands::config::run(&context, command),
        Command::Version => Ok(()),
    }
}

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use heft_config::{Config, ConfigManager};
use heft_core::{Clock, FixedClock, LedgerSettings};
use heft_storage_json::{JsonSheetDocument, LocalNoteStore};
use tracing::debug;

use crate::{
    cli::{
        output::{Formatter, OutputPreferences},
        system_clock::SystemClock,
    },
    errors::CliError,
    utils::paths::app_data_dir,
};

/// Pins the clock to a local `YYYY-MM-DDTHH:MM:SS` instant.
pub const NOW_ENV: &str = "HEFT_NOW";

/// Loaded configuration plus the backends it points at.
pub struct AppContext {
    home: PathBuf,
    config_manager: ConfigManager,
    config: Config,
}

impl AppContext {
    pub fn load() -> Result<Self, CliError> {
        Self::with_home(app_data_dir())
    }

    pub fn with_home(home: PathBuf) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(home.clone())?;
        let config = config_manager.load()?;
        debug!(home = %home.display(), "loaded configuration");
        Ok(Self {
            home,
            config_manager,
            config,
        })
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_manager(&self) -> &ConfigManager {
        &self.config_manager
    }

    pub fn settings(&self) -> LedgerSettings {
        self.config.ledger_settings()
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(OutputPreferences::from_config(&self.config))
    }

    pub fn sheet_path(&self) -> PathBuf {
        self.config.resolve_sheet_path(&self.home)
    }

    pub fn note_store(&self) -> LocalNoteStore {
        LocalNoteStore::new(
            self.config.resolve_notes_dir(),
            self.config.resolve_notes_archive_dir(),
            self.config.note_title.clone(),
        )
    }

    pub fn open_sheet(&self) -> Result<JsonSheetDocument, CliError> {
        Ok(JsonSheetDocument::open_with_retention(
            self.sheet_path(),
            self.config.resolve_sheet_backup_dir(&self.home),
            self.config.backup_retention,
        )?)
    }

    /// The system clock unless `HEFT_NOW` pins it.
    pub fn clock(&self) -> Result<Box<dyn Clock>, CliError> {
        match std::env::var(NOW_ENV) {
            Ok(raw) if !raw.trim().is_empty() => {
                let now = NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S")
                    .map_err(|err| {
                        CliError::InvalidArguments(format!("{NOW_ENV}=`{raw}` is not a local time: {err}"))
                    })?;
                Ok(Box::new(FixedClock(now)))
            }
            _ => Ok(Box::new(SystemClock)),
        }
    }
}

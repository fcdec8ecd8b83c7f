use serde::{de::Deserializer, Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

use heft_core::settings::{DEFAULT_HISTORY_WINDOW, DEFAULT_MAX_ROW_GAP, DEFAULT_ROLLOVER_HOUR};
use heft_core::LedgerSettings;
use heft_domain::ColumnLayout;

use crate::ConfigError;

pub const DEFAULT_NOTE_TITLE: &str = "Bodyweights note";
pub const DEFAULT_BACKUP_RETENTION: usize = 5;

/// Where the ledger lives and how it is reconciled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory scanned for the ledger note. Defaults to `~/Documents/Notes`.
    pub notes_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Where replaced notes are archived. Defaults to `<notes_dir>/archive`.
    pub notes_archive_dir: Option<PathBuf>,

    #[serde(default = "Config::default_note_title")]
    pub note_title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// JSON sheet file. Defaults to `<home>/ledger/sheet.json`.
    pub sheet_path: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Defaults to `<home>/backups`.
    pub sheet_backup_dir: Option<PathBuf>,

    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    #[serde(default = "Config::default_date_column")]
    pub date_column: usize,

    #[serde(default = "Config::default_measurement_column")]
    pub measurement_column: usize,

    #[serde(default = "Config::default_history_window_size")]
    pub history_window_size: usize,

    #[serde(default = "Config::default_max_row_gap")]
    pub max_row_gap: usize,

    #[serde(default = "Config::default_day_rollover_hour")]
    pub day_rollover_hour: u32,

    #[serde(default = "Config::default_true")]
    pub require_fresh_note: bool,

    #[serde(default)]
    pub theme: Theme,

    #[serde(default = "Config::default_true")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        let layout = ColumnLayout::default();
        Self {
            notes_dir: None,
            notes_archive_dir: None,
            note_title: Self::default_note_title(),
            sheet_path: None,
            sheet_backup_dir: None,
            backup_retention: DEFAULT_BACKUP_RETENTION,
            date_column: layout.date_column,
            measurement_column: layout.measurement_column,
            history_window_size: DEFAULT_HISTORY_WINDOW,
            max_row_gap: DEFAULT_MAX_ROW_GAP,
            day_rollover_hour: DEFAULT_ROLLOVER_HOUR,
            require_fresh_note: true,
            theme: Theme::default(),
            ui_color_enabled: true,
        }
    }
}

impl Config {
    pub fn default_note_title() -> String {
        DEFAULT_NOTE_TITLE.into()
    }

    fn default_backup_retention() -> usize {
        DEFAULT_BACKUP_RETENTION
    }

    fn default_date_column() -> usize {
        ColumnLayout::default().date_column
    }

    fn default_measurement_column() -> usize {
        ColumnLayout::default().measurement_column
    }

    fn default_history_window_size() -> usize {
        DEFAULT_HISTORY_WINDOW
    }

    fn default_max_row_gap() -> usize {
        DEFAULT_MAX_ROW_GAP
    }

    fn default_day_rollover_hour() -> u32 {
        DEFAULT_ROLLOVER_HOUR
    }

    fn default_true() -> bool {
        true
    }

    pub fn resolve_notes_dir(&self) -> PathBuf {
        if let Some(path) = &self.notes_dir {
            return path.clone();
        }

        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join("Notes")
    }

    pub fn resolve_notes_archive_dir(&self) -> PathBuf {
        match &self.notes_archive_dir {
            Some(path) => path.clone(),
            None => self.resolve_notes_dir().join("archive"),
        }
    }

    pub fn resolve_sheet_path(&self, home: &Path) -> PathBuf {
        match &self.sheet_path {
            Some(path) => path.clone(),
            None => home.join("ledger").join("sheet.json"),
        }
    }

    pub fn resolve_sheet_backup_dir(&self, home: &Path) -> PathBuf {
        match &self.sheet_backup_dir {
            Some(path) => path.clone(),
            None => home.join("backups"),
        }
    }

    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout {
            date_column: self.date_column,
            measurement_column: self.measurement_column,
        }
    }

    pub fn ledger_settings(&self) -> LedgerSettings {
        LedgerSettings {
            layout: self.layout(),
            history_window_size: self.history_window_size,
            max_row_gap: self.max_row_gap,
            day_rollover_hour: self.day_rollover_hour,
            require_fresh_note: self.require_fresh_note,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.note_title.trim().is_empty() {
            return Err(ConfigError::Invalid("note_title must not be empty".into()));
        }
        if self.date_column == 0 || self.measurement_column == 0 {
            return Err(ConfigError::Invalid(
                "date_column and measurement_column start at 1".into(),
            ));
        }
        if self.date_column == self.measurement_column {
            return Err(ConfigError::Invalid(format!(
                "date_column and measurement_column are both {}",
                self.date_column
            )));
        }
        if self.max_row_gap == 0 {
            return Err(ConfigError::Invalid("max_row_gap must be at least 1".into()));
        }
        if self.day_rollover_hour > 23 {
            return Err(ConfigError::Invalid(format!(
                "day_rollover_hour must be between 0 and 23, got {}",
                self.day_rollover_hour
            )));
        }
        Ok(())
    }
}

/// Output style of the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Plain,
    #[default]
    Iconic,
}

impl Theme {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" => Theme::Plain,
            _ => Theme::Iconic,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Theme::Plain => "plain",
            Theme::Iconic => "iconic",
        };
        f.write_str(label)
    }
}

/// Unknown or null values fall back to the default theme.
impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.map(|v| Theme::parse(&v)).unwrap_or_default())
    }
}

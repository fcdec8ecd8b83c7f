//! JSON-file sheet with timestamped backups taken on every flush.

use std::{
    cmp::Reverse,
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use heft_core::{CoreError, TabularDocument};
use heft_domain::{CellValue, Sheet};
use tracing::{debug, info};

use crate::files::{canonical_name, replace_atomically};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const DEFAULT_RETENTION: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetBackup {
    pub name: String,
    pub created_at: NaiveDateTime,
    pub path: PathBuf,
}

/// A [`Sheet`] loaded from disk. Cell writes stay in memory until
/// [`TabularDocument::flush`], which backs up the file on disk and then
/// replaces it.
#[derive(Debug, Clone)]
pub struct JsonSheetDocument {
    path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
    sheet: Sheet,
    dirty: bool,
}

impl JsonSheetDocument {
    pub fn open(path: PathBuf, backups_dir: PathBuf) -> Result<Self, CoreError> {
        Self::open_with_retention(path, backups_dir, DEFAULT_RETENTION)
    }

    pub fn open_with_retention(
        path: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
    ) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::Storage(format!(
                "sheet `{}` not found",
                path.display()
            )));
        }
        let sheet = load_sheet_from_path(&path)?;
        debug!(path = %path.display(), rows = sheet.row_count(), "loaded sheet");
        Ok(Self {
            path,
            backups_dir,
            retention: retention.max(1),
            sheet,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Backups of this sheet, newest first.
    pub fn list_backups(&self) -> Result<Vec<SheetBackup>, CoreError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let prefix = format!("{}_", self.slug());
        let suffix = format!(".{BACKUP_EXTENSION}");
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            // Another sheet's slug may start with ours; the rest must be the stamp.
            let Some(created_at) = name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(&suffix))
                .and_then(parse_backup_timestamp)
            else {
                continue;
            };
            entries.push(SheetBackup {
                name: name.to_string(),
                created_at,
                path: path.clone(),
            });
        }
        entries.sort_by_key(|backup| Reverse(backup.created_at));
        Ok(entries)
    }

    fn slug(&self) -> String {
        let stem = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        canonical_name(stem, "sheet")
    }

    fn backup_existing_file(&self) -> Result<(), CoreError> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.backups_dir)?;
        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT);
        let file_name = format!("{}_{}.{}", self.slug(), timestamp, BACKUP_EXTENSION);
        let backup_path = self.backups_dir.join(&file_name);
        fs::copy(&self.path, &backup_path)?;
        info!(backup = %backup_path.display(), "backed up sheet");
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        for stale in self.list_backups()?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(stale.path);
        }
        Ok(())
    }
}

impl TabularDocument for JsonSheetDocument {
    fn row_count(&self) -> usize {
        self.sheet.row_count()
    }

    fn read_cell(&self, row: usize, col: usize) -> CellValue {
        self.sheet.cell(row, col).clone()
    }

    fn write_cell(&mut self, row: usize, col: usize, value: CellValue) -> Result<(), CoreError> {
        self.sheet
            .set_cell(row, col, value)
            .map_err(|err| CoreError::InvalidOperation(err.to_string()))?;
        self.dirty = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), CoreError> {
        if !self.dirty {
            return Ok(());
        }
        self.backup_existing_file()?;
        save_sheet_to_path(&self.sheet, &self.path)?;
        self.dirty = false;
        Ok(())
    }
}

/// Saves a sheet to an arbitrary path on disk.
pub fn save_sheet_to_path(sheet: &Sheet, path: &Path) -> Result<(), CoreError> {
    let json =
        serde_json::to_string_pretty(sheet).map_err(|err| CoreError::Serde(err.to_string()))?;
    replace_atomically(path, &json)
}

/// Loads a sheet from the provided filesystem path.
pub fn load_sheet_from_path(path: &Path) -> Result<Sheet, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

/// Reads a `YYYYMMDD_HHMM` stamp and nothing else.
fn parse_backup_timestamp(stamp: &str) -> Option<NaiveDateTime> {
    let (date, time) = stamp.split_once('_')?;
    if !is_digits(date, 8) || !is_digits(time, 4) {
        return None;
    }
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT).ok()
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

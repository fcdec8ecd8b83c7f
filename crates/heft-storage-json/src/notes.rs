//! Ledger note kept as a plain-text file inside a notes directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use heft_core::{
    notes::{expect_single, title_matches},
    CoreError, NoteBackend, NoteEntry,
};
use tracing::{debug, info};

use crate::files::{canonical_name, replace_atomically};

const NOTE_EXTENSIONS: &[&str] = &["txt", "md"];
/// Subdirectory levels searched below the notes directory.
const MAX_DEPTH: usize = 2;
const ARCHIVE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone)]
struct NoteFile {
    title: String,
    path: PathBuf,
}

/// Finds the ledger note by file stem. Replacing the note first copies the
/// old file into the archive directory.
#[derive(Debug, Clone)]
pub struct LocalNoteStore {
    notes_dir: PathBuf,
    archive_dir: PathBuf,
    title: String,
}

impl LocalNoteStore {
    pub fn new(notes_dir: PathBuf, archive_dir: PathBuf, title: impl Into<String>) -> Self {
        Self {
            notes_dir,
            archive_dir,
            title: title.into(),
        }
    }

    /// Path of the single note carrying the ledger title.
    pub fn ledger_note_path(&self) -> Result<PathBuf, CoreError> {
        if !self.notes_dir.is_dir() {
            return Err(CoreError::Storage(format!(
                "notes directory `{}` not found",
                self.notes_dir.display()
            )));
        }
        let mut found = Vec::new();
        self.scan(&self.notes_dir, MAX_DEPTH, &mut found)?;
        let matches: Vec<NoteFile> = found
            .into_iter()
            .filter(|note| title_matches(&note.title, &self.title))
            .collect();
        expect_single(matches, &self.title).map(|note| note.path)
    }

    fn scan(&self, dir: &Path, depth: usize, found: &mut Vec<NoteFile>) -> Result<(), CoreError> {
        if dir == self.archive_dir {
            return Ok(());
        }
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let name = path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default();
            if path.is_dir() {
                if depth > 0 && !name.to_lowercase().contains("backup") {
                    self.scan(&path, depth - 1, found)?;
                }
                continue;
            }
            if !is_note_file(&path) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                found.push(NoteFile {
                    title: stem.to_string(),
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    fn archive(&self, path: &Path) -> Result<PathBuf, CoreError> {
        fs::create_dir_all(&self.archive_dir)?;
        let timestamp = Local::now().format(ARCHIVE_TIMESTAMP_FORMAT);
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or(NOTE_EXTENSIONS[0]);
        let file_name = format!(
            "{}_{}.{}",
            canonical_name(&self.title, "note"),
            timestamp,
            extension
        );
        let archived = self.archive_dir.join(file_name);
        fs::copy(path, &archived)?;
        Ok(archived)
    }
}

impl NoteBackend for LocalNoteStore {
    fn fetch_ledger_note(&self) -> Result<NoteEntry, CoreError> {
        let path = self.ledger_note_path()?;
        let text = fs::read_to_string(&path)?;
        let edited_at = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .ok()
            .map(|modified| DateTime::<Local>::from(modified).naive_local());
        debug!(path = %path.display(), ?edited_at, "fetched ledger note");
        Ok(NoteEntry {
            title: self.title.clone(),
            text,
            edited_at,
        })
    }

    fn replace_ledger_note(&mut self, new_text: &str) -> Result<(), CoreError> {
        let path = self.ledger_note_path()?;
        let archived = self.archive(&path)?;
        info!(archive = %archived.display(), "archived ledger note");
        replace_atomically(&path, new_text)
    }
}

fn is_note_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| NOTE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

//! Seam to the note-taking backend holding the ledger note.

use chrono::NaiveDateTime;

use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A note as reported by the backend.
pub struct NoteEntry {
    pub title: String,
    pub text: String,
    /// Local time of the last edit, when the backend knows it.
    pub edited_at: Option<NaiveDateTime>,
}

/// Backend owning the ledger note. Exactly one note may carry the ledger title.
pub trait NoteBackend {
    /// Fails with [`CoreError::NoteNotFound`] or [`CoreError::AmbiguousNote`]
    /// unless exactly one note matches.
    fn fetch_ledger_note(&self) -> Result<NoteEntry, CoreError>;

    /// Retires the current ledger note and stores `new_text` in its place.
    fn replace_ledger_note(&mut self, new_text: &str) -> Result<(), CoreError>;
}

/// Case-insensitive title comparison ignoring surrounding whitespace.
pub fn title_matches(candidate: &str, wanted: &str) -> bool {
    candidate.trim().to_lowercase() == wanted.trim().to_lowercase()
}

/// Narrows title matches down to the single ledger note.
pub fn expect_single<T>(mut matches: Vec<T>, title: &str) -> Result<T, CoreError> {
    match matches.len() {
        0 => Err(CoreError::NoteNotFound(title.to_string())),
        1 => Ok(matches.remove(0)),
        count => Err(CoreError::AmbiguousNote {
            title: title.to_string(),
            count,
        }),
    }
}

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::Command;
use heft_config::{Config, ConfigManager};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const NOTE_TITLE: &str = "Bodyweights note";
pub const TODAY: &str = "2024-01-05T12:00:00";

/// Days 1–3 recorded, days 4 and 5 open. Row 1 is a header.
pub const SHEET_JSON: &str = r#"{
  "name": "Weights",
  "rows": [
    ["Week", "Date", "Weight"],
    [1, "2024-01-01", 82.1],
    [null, "2024-01-02", 82.3],
    [null, "2024-01-03", 84.5],
    [null, "2024-01-04", null],
    [null, "2024-01-05", null]
  ]
}"#;

pub struct TestHome {
    pub home: PathBuf,
    pub notes_dir: PathBuf,
    pub note_path: PathBuf,
    pub sheet_path: PathBuf,
}

impl TestHome {
    pub fn archive_dir(&self) -> PathBuf {
        self.notes_dir.join("archive")
    }

    pub fn backups_dir(&self) -> PathBuf {
        self.home.join("backups")
    }

    pub fn note_text(&self) -> String {
        fs::read_to_string(&self.note_path).expect("read note")
    }

    pub fn sheet_text(&self) -> String {
        fs::read_to_string(&self.sheet_path).expect("read sheet")
    }

    /// `heft` pinned to [`TODAY`] and this home, without colors.
    pub fn heft(&self) -> Command {
        self.heft_at(TODAY)
    }

    pub fn heft_at(&self, now: &str) -> Command {
        let mut cmd = Command::cargo_bin("heft").expect("heft binary");
        cmd.env("HEFT_HOME", &self.home)
            .env("HEFT_NOW", now)
            .env("NO_COLOR", "1")
            .env_remove("HEFT_LOG");
        cmd
    }
}

fn fresh_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates an isolated home with a config, a JSON sheet and the ledger note.
pub fn setup_home(note_text: &str, sheet_json: &str, history_window_size: usize) -> TestHome {
    let base = fresh_dir();
    let home = base.join("home");
    let notes_dir = base.join("notes");
    let sheet_path = base.join("sheet.json");
    fs::create_dir_all(&notes_dir).expect("notes dir");

    let note_path = notes_dir.join(format!("{NOTE_TITLE}.txt"));
    fs::write(&note_path, note_text).expect("write note");
    fs::write(&sheet_path, sheet_json).expect("write sheet");

    let config = Config {
        notes_dir: Some(notes_dir.clone()),
        sheet_path: Some(sheet_path.clone()),
        history_window_size,
        ..Config::default()
    };
    ConfigManager::with_base_dir(home.clone())
        .expect("config manager")
        .save(&config)
        .expect("save config");

    TestHome {
        home,
        notes_dir,
        note_path,
        sheet_path,
    }
}

/// A home directory with nothing in it.
pub fn empty_home() -> PathBuf {
    fresh_dir().join("home")
}

pub fn file_count(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

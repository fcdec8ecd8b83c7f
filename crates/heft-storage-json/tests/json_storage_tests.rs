use std::fs;

use chrono::NaiveDate;
use heft_core::{CoreError, NoteBackend, TabularDocument};
use heft_domain::{CellValue, Sheet};
use heft_storage_json::{save_sheet_to_path, JsonSheetDocument, LocalNoteStore};
use tempfile::tempdir;

const TITLE: &str = "Bodyweights note";

fn sample_sheet() -> Sheet {
    let mut sheet = Sheet::new("Weights");
    sheet.push_row(vec!["Week".into(), "Date".into(), "Weight".into()]);
    sheet.push_row(vec![
        CellValue::Empty,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().into(),
        CellValue::Number(82.3),
    ]);
    sheet.push_row(vec![CellValue::Empty, "2024-01-02".into()]);
    sheet
}

#[test]
fn sheet_document_reads_json_cells() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("sheet.json");
    fs::write(
        &path,
        r#"{"name": "Weights", "rows": [["Week", "Date", "Weight"], [null, "2024-01-01", 82.3], [null, "14 Jan 2024"]]}"#,
    )
    .expect("write sheet");

    let document = JsonSheetDocument::open(path, dir.path().join("backups")).expect("open");

    assert_eq!(document.row_count(), 3);
    assert_eq!(document.read_cell(2, 3), CellValue::Number(82.3));
    assert_eq!(
        document.find_row_by_date(NaiveDate::from_ymd_opt(2024, 1, 14).unwrap(), 2),
        Some(3)
    );
    assert_eq!(document.read_cell(3, 3), CellValue::Empty);
}

#[test]
fn flush_backs_up_then_replaces_the_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("sheet.json");
    let backups = dir.path().join("backups");
    save_sheet_to_path(&sample_sheet(), &path).expect("save sheet");
    let original = fs::read_to_string(&path).expect("read sheet");

    let mut document = JsonSheetDocument::open(path.clone(), backups).expect("open");
    document.flush().expect("clean flush");
    assert!(document.list_backups().expect("list").is_empty());

    document
        .write_cell(3, 3, CellValue::Number(82.5))
        .expect("write cell");
    assert!(document.is_dirty());
    document.flush().expect("flush");

    let backups = document.list_backups().expect("list");
    assert_eq!(backups.len(), 1);
    assert!(backups[0].name.starts_with("sheet_"));
    assert_eq!(fs::read_to_string(&backups[0].path).expect("read backup"), original);

    let reopened = JsonSheetDocument::open(path.clone(), dir.path().join("backups")).expect("reopen");
    assert_eq!(reopened.read_cell(3, 3), CellValue::Number(82.5));
    assert!(!dir.path().join("sheet.json.tmp").exists());
}

#[test]
fn backups_are_pruned_to_retention() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("sheet.json");
    let backups = dir.path().join("backups");
    save_sheet_to_path(&sample_sheet(), &path).expect("save sheet");
    fs::create_dir_all(&backups).expect("backups dir");
    for stamp in ["20230101_0800", "20230102_0800", "20230103_0800"] {
        fs::write(backups.join(format!("sheet_{stamp}.json")), "{}").expect("seed backup");
    }

    let mut document = JsonSheetDocument::open_with_retention(path, backups, 2).expect("open");
    document
        .write_cell(3, 3, CellValue::Text("?".into()))
        .expect("write cell");
    document.flush().expect("flush");

    let names: Vec<String> = document
        .list_backups()
        .expect("list")
        .into_iter()
        .map(|backup| backup.name)
        .collect();
    assert_eq!(names.len(), 2);
    assert_eq!(names[1], "sheet_20230103_0800.json");
}

#[test]
fn backups_of_other_sheets_in_a_shared_dir_are_left_alone() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("w.json");
    let backups = dir.path().join("backups");
    save_sheet_to_path(&sample_sheet(), &path).expect("save sheet");
    fs::create_dir_all(&backups).expect("backups dir");
    for name in ["w_2_20230101_0800.json", "w_2_20230102_0800.json", "w_notes.json"] {
        fs::write(backups.join(name), "{}").expect("seed foreign file");
    }

    let mut document = JsonSheetDocument::open_with_retention(path, backups.clone(), 1).expect("open");
    assert!(document.list_backups().expect("list").is_empty());

    document
        .write_cell(3, 3, CellValue::Number(82.5))
        .expect("write cell");
    document.flush().expect("flush");

    assert_eq!(document.list_backups().expect("list").len(), 1);
    assert!(backups.join("w_2_20230101_0800.json").exists());
    assert!(backups.join("w_2_20230102_0800.json").exists());
    assert!(backups.join("w_notes.json").exists());
}

#[test]
fn missing_sheet_is_a_storage_error() {
    let dir = tempdir().expect("tempdir");
    let err = JsonSheetDocument::open(dir.path().join("none.json"), dir.path().join("b"))
        .expect_err("missing sheet");
    assert!(matches!(err, CoreError::Storage(_)));
}

#[test]
fn note_store_finds_note_by_title_in_nested_dirs() {
    let dir = tempdir().expect("tempdir");
    let notes = dir.path().join("notes");
    fs::create_dir_all(notes.join("health")).expect("notes dirs");
    fs::write(notes.join("health").join("bodyweights NOTE.md"), "(82.3), 83").expect("note");
    fs::write(notes.join("groceries.txt"), "milk").expect("other note");

    let store = LocalNoteStore::new(notes.clone(), notes.join("archive"), TITLE);
    let entry = store.fetch_ledger_note().expect("fetch");

    assert_eq!(entry.text, "(82.3), 83");
    assert!(entry.edited_at.is_some());
}

#[test]
fn note_store_skips_archive_and_backup_dirs() {
    let dir = tempdir().expect("tempdir");
    let notes = dir.path().join("notes");
    fs::create_dir_all(notes.join("archive")).expect("archive");
    fs::create_dir_all(notes.join("Old Backups")).expect("backups");
    fs::write(notes.join("archive").join("Bodyweights note.txt"), "old").expect("archived");
    fs::write(notes.join("Old Backups").join("Bodyweights note.txt"), "older").expect("backup");

    let store = LocalNoteStore::new(notes.clone(), notes.join("archive"), TITLE);
    assert!(matches!(
        store.fetch_ledger_note(),
        Err(CoreError::NoteNotFound(_))
    ));

    fs::write(notes.join("Bodyweights note.txt"), "85").expect("note");
    assert_eq!(store.fetch_ledger_note().expect("fetch").text, "85");
}

#[test]
fn note_store_rejects_duplicate_titles() {
    let dir = tempdir().expect("tempdir");
    let notes = dir.path().join("notes");
    fs::create_dir_all(notes.join("phone")).expect("dirs");
    fs::write(notes.join("Bodyweights note.txt"), "85").expect("note");
    fs::write(notes.join("phone").join("bodyweights note.md"), "86").expect("dup");

    let store = LocalNoteStore::new(notes.clone(), notes.join("archive"), TITLE);
    assert!(matches!(
        store.fetch_ledger_note(),
        Err(CoreError::AmbiguousNote { count: 2, .. })
    ));
}

#[test]
fn note_store_ignores_notes_below_max_depth() {
    let dir = tempdir().expect("tempdir");
    let notes = dir.path().join("notes");
    let deep = notes.join("a").join("b").join("c");
    fs::create_dir_all(&deep).expect("dirs");
    fs::write(deep.join("Bodyweights note.txt"), "85").expect("note");

    let store = LocalNoteStore::new(notes.clone(), notes.join("archive"), TITLE);
    assert!(matches!(
        store.fetch_ledger_note(),
        Err(CoreError::NoteNotFound(_))
    ));
}

#[test]
fn replace_archives_the_old_note() {
    let dir = tempdir().expect("tempdir");
    let notes = dir.path().join("notes");
    fs::create_dir_all(&notes).expect("notes dir");
    let note_path = notes.join("Bodyweights note.txt");
    fs::write(&note_path, "(82.3, 84.5), ?, 85, ").expect("note");

    let mut store = LocalNoteStore::new(notes.clone(), notes.join("archive"), TITLE);
    store.replace_ledger_note("(?, 85), ").expect("replace");

    assert_eq!(fs::read_to_string(&note_path).expect("read"), "(?, 85), ");
    let archived: Vec<_> = fs::read_dir(notes.join("archive"))
        .expect("archive dir")
        .map(|entry| entry.expect("entry").path())
        .collect();
    assert_eq!(archived.len(), 1);
    let name = archived[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("bodyweights_note_"));
    assert!(name.ends_with(".txt"));
    assert_eq!(
        fs::read_to_string(&archived[0]).expect("read archive"),
        "(82.3, 84.5), ?, 85, "
    );
    assert_eq!(store.fetch_ledger_note().expect("fetch").text, "(?, 85), ");
}

use std::fs;

use heft_config::{Config, ConfigError, ConfigManager, Theme};
use tempfile::tempdir;

#[test]
fn default_config_points_at_the_bodyweights_note() {
    let cfg = Config::default();

    assert_eq!(cfg.note_title, "Bodyweights note");
    assert_eq!(cfg.date_column, 2);
    assert_eq!(cfg.measurement_column, 3);
    assert_eq!(cfg.history_window_size, 3);
    assert_eq!(cfg.max_row_gap, 10);
}

#[test]
fn load_without_file_returns_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    assert!(!manager.exists());
    assert_eq!(manager.load().expect("load config"), Config::default());
    assert!(manager.config_path().ends_with("config/config.json"));
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let cfg = Config {
        note_title: "Weights".into(),
        sheet_path: Some(dir.path().join("sheet.json")),
        history_window_size: 5,
        theme: Theme::Plain,
        ..Config::default()
    };

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(!dir.path().join("config.json.tmp").exists());
}

#[test]
fn invalid_config_is_rejected_on_load() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));
    fs::write(manager.config_path(), r#"{"date_column": 0}"#).expect("write");

    assert!(matches!(manager.load(), Err(ConfigError::Invalid(_))));
}

#[test]
fn backup_existing_copies_the_current_file() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    assert_eq!(manager.backup_existing().expect("backup"), None);

    manager.save(&Config::default()).expect("save config");
    let name = manager
        .backup_existing()
        .expect("backup")
        .expect("backup written");

    assert_eq!(manager.list_backups().expect("list"), vec![name.clone()]);
    let copied = fs::read_to_string(manager.backups_dir().join(name)).expect("read backup");
    let original = fs::read_to_string(manager.config_path()).expect("read config");
    assert_eq!(copied, original);
}

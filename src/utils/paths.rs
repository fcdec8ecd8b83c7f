use dirs::home_dir;
use std::{env, path::PathBuf};

/// Overrides the application home directory.
pub const HOME_ENV: &str = "HEFT_HOME";
const DEFAULT_DIR_NAME: &str = ".heft";

/// Returns the application data directory, defaulting to `~/.heft`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV).filter(|value| !value.is_empty()) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

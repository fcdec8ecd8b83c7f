use std::io;

use heft_config::ConfigError;
use heft_core::CoreError;
use thiserror::Error;

/// Failures surfaced by the `heft` commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Prompt(#[from] dialoguer::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    InvalidArguments(String),
}

//! heft-config
//!
//! Persistent user configuration: where the ledger note and the sheet live,
//! the sheet's column layout and the reconciliation tunables.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, Theme};

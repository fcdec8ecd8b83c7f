pub mod check;
pub mod config;
pub mod reconcile;
pub mod version;

mod config;
pub mod database;

pub use config::{Config, GrowthConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::Result;

/// Returns the TaskFlow data directory, creating it if needed.
///
/// `TASKFLOW_HOME` wins when set. Otherwise `~/.config/taskflow[-dev]/`,
/// with the `-dev` suffix selected by `TASKFLOW_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("TASKFLOW_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("TASKFLOW_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("taskflow-dev")
            } else {
                base_dir.join("taskflow")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

mod config;
pub mod task_file;

pub use config::{Config, MetricsConfig, PreferencesConfig};
pub use task_file::TaskFile;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/calmcal[-dev]/` based on CALMCAL_ENV.
///
/// Set CALMCAL_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CALMCAL_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("calmcal-dev")
    } else {
        base_dir.join("calmcal")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

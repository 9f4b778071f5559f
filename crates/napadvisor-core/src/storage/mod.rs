mod config;

pub use config::{Config, DefaultsConfig, InputConfig, OutputConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "NAPADVISOR_CONFIG_DIR";

/// Returns `~/.config/napadvisor/`, or `$NAPADVISOR_CONFIG_DIR` when set.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("napadvisor"),
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveFailed {
        path: dir.clone(),
        message: e.to_string(),
    })?;
    Ok(dir)
}

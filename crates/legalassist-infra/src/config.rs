//! Configuration loader for LegalAssist.
//!
//! Reads a TOML file into [`AppConfig`]. An explicitly requested file must
//! exist; the default `legalassist.toml` in the working directory is
//! optional and falls back to built-in defaults when absent.

use std::path::{Path, PathBuf};

use legalassist_types::config::AppConfig;
use legalassist_types::error::ConfigError;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "legalassist.toml";

/// Load configuration.
///
/// - `Some(path)`: the file must exist and parse.
/// - `None`: reads `./legalassist.toml` if present, otherwise defaults.
///
/// The result is validated before it is returned.
pub async fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => read_config(path).await?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            match tokio::fs::try_exists(&default_path).await {
                Ok(true) => read_config(&default_path).await?,
                _ => {
                    tracing::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    AppConfig::default()
                }
            }
        }
    };

    config.validate()?;
    Ok(config)
}

async fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let config = toml::from_str::<AppConfig>(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

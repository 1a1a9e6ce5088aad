use std::{env, path::PathBuf};

use thiserror::Error;

use crate::errors::UnsupportedPlatformError;
use crate::platform::PlatformFamily;

/// Runtime configuration for one reconciliation run.
///
/// The platform family is resolved here, before any declaration is read, so
/// an unsupported host fails fast with a clear error.
#[derive(Debug, Clone)]
pub struct Config {
    pub platform: PlatformFamily,
    pub monitors_file: PathBuf,
    pub conf_path: PathBuf,
    pub service_name: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SENTINEL_MONITORS_FILE is required and must not be empty")]
    MissingMonitorsFile,
    #[error(transparent)]
    UnsupportedPlatform(#[from] UnsupportedPlatformError),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let platform = match env::var("SENTINEL_PLATFORM")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
        {
            Some(name) => PlatformFamily::from_name(&name)?,
            None => PlatformFamily::probe()?,
        };

        let monitors_file = env::var("SENTINEL_MONITORS_FILE")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingMonitorsFile)?;

        let conf_path = env::var("SENTINEL_CONF_PATH")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(platform.default_conf_path()));

        let service_name = env::var("SENTINEL_SERVICE")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| platform.service_name().to_string());

        Ok(Self {
            platform,
            monitors_file,
            conf_path,
            service_name,
        })
    }
}

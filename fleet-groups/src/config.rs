use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::i18n::Messages;

/// Environment variable that overrides the groups data file location.
pub const DATA_PATH_ENV: &str = "FLEET_GROUPS_DATA";

/// Errors emitted while reading the application config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config IO failed")]
    Io(#[from] std::io::Error),
    #[error("config JSON failed")]
    Json(#[from] serde_json::Error),
}

/// Application configuration read from `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Location of the groups JSON file; defaults next to the config.
    pub data_path: Option<PathBuf>,
    /// Overrides of the dialog labels.
    pub messages: Messages,
}

impl AppConfig {
    /// Load the config from its default location.
    ///
    /// A missing file yields defaults; an unreadable one is logged and also
    /// yields defaults.
    pub fn load_or_default() -> Self {
        match load_config_from_path(&config_path()) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("failed to load config, using defaults: {err}");
                Self::default()
            },
        }
    }

    /// Groups file location after applying the environment override.
    pub fn data_path(&self) -> PathBuf {
        resolve_data_path(
            self.data_path.as_deref(),
            std::env::var(DATA_PATH_ENV).ok().as_deref(),
        )
    }
}

pub(crate) fn load_config_from_path(
    path: &Path,
) -> Result<AppConfig, ConfigError> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        },
        Err(err) => return Err(err.into()),
    };
    Ok(serde_json::from_str(&data)?)
}

fn resolve_data_path(configured: Option<&Path>, env: Option<&str>) -> PathBuf {
    if let Some(path) = env.filter(|value| !value.trim().is_empty()) {
        return PathBuf::from(path);
    }
    match configured {
        Some(path) => path.to_path_buf(),
        None => config_dir().join("groups.json"),
    }
}

fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return Path::new(&home).join(".config").join("fleet-groups");
    }
    std::env::temp_dir().join("fleet-groups")
}

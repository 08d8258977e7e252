//! Configuration loaded from `~/.bashly.toml` or `--config PATH`

use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Write logs to `<dir>/bashly.log` instead of stderr
    pub log_directory: Option<PathBuf>,
    pub log_level: String,
    pub hint: HintConfig,
}

/// Live hint shown by the line editor
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HintConfig {
    pub enabled: bool,
    pub show_options: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_directory: None,
            log_level: "warn".to_string(),
            hint: HintConfig::default(),
        }
    }
}

impl Default for HintConfig {
    fn default() -> Self {
        HintConfig {
            enabled: true,
            show_options: true,
        }
    }
}

impl Config {
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an explicitly named config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &content)
    }

    /// Load `~/.bashly.toml`, falling back to defaults when it does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Config::default()),
        }
    }
}

/// Get home directory
pub fn dirs_home() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

pub fn default_path() -> Option<PathBuf> {
    dirs_home().map(|h| h.join(".bashly.toml"))
}

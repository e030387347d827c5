//! Persistent application config
//!
//! Only the last opened folder is remembered. The file is read once at
//! startup and overwritten on close.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Config file name, relative to the working directory
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Everything stored in `config.json`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Folder that was open when the app was last closed.
    /// Older config files spell the key `LastPath`.
    #[serde(default, alias = "LastPath")]
    pub last_path: String,
}

impl Config {
    /// Create a config remembering the given folder
    pub fn new(last_path: impl Into<String>) -> Self {
        Self {
            last_path: last_path.into(),
        }
    }

    /// Config to write on close for the folder that is currently open
    pub fn for_folder(folder: &Path) -> Self {
        Self::new(folder.to_string_lossy())
    }

    /// Convert to JSON string for the config file
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string (from the config file)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid JSON in config file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcome of reading the config file at startup
#[derive(Debug)]
pub enum ConfigLoad {
    /// No config file yet (first run)
    Missing,
    /// The file exists but could not be read or parsed
    Invalid(ConfigError),
    /// Config loaded successfully
    Loaded(Config),
}

impl ConfigLoad {
    /// The remembered folder, or an empty string for anything but `Loaded`
    pub fn last_path(&self) -> &str {
        match self {
            ConfigLoad::Loaded(config) => &config.last_path,
            ConfigLoad::Missing | ConfigLoad::Invalid(_) => "",
        }
    }

    /// Folder to reopen at startup: only a loaded, non-empty path
    pub fn startup_folder(&self) -> Option<PathBuf> {
        let last_path = self.last_path();
        (!last_path.is_empty()).then(|| PathBuf::from(last_path))
    }
}

/// Location of the config file on disk
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_FILE)
    }
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path to the config file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the config file
    pub fn load(&self) -> ConfigLoad {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return ConfigLoad::Missing,
            Err(source) => {
                return ConfigLoad::Invalid(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match Config::from_json(&json) {
            Ok(config) => ConfigLoad::Loaded(config),
            Err(source) => ConfigLoad::Invalid(ConfigError::Json {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Write the config file, replacing whatever was there
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = config.to_json().map_err(|source| ConfigError::Json {
            path: self.path.clone(),
            source,
        })?;

        fs::write(&self.path, json).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

//! Runtime configuration
//!
//! Read from an explicit path, else from `<config_dir>/netweave/config.json`,
//! else built-in defaults. Unknown keys are rejected.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;
use crate::layers::ConnectionPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `env_logger` filter used when `RUST_LOG` is unset
    pub log_level: String,
    pub connections: ConnectionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: constants::config::DEFAULT_LOG_LEVEL.to_string(),
            connections: ConnectionPolicy::default(),
        }
    }
}

impl Config {
    /// Load from `explicit` if given; otherwise from the default location when
    /// that file exists; otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Platform config location, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::config::DIR_NAME).join(constants::config::FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", text).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert!(config.connections.allow_self_loops);
        assert!(config.connections.allow_parallel);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let file = write_config(r#"{"connections": {"allow_parallel": false}}"#);
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(
            config,
            Config {
                log_level: "info".into(),
                connections: ConnectionPolicy {
                    allow_self_loops: true,
                    allow_parallel: false,
                },
            }
        );
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let file = write_config(r#"{"log_level": "debug", "asset_base": "/srv"}"#);
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.json"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}

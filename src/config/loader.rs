// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{AwsAllError, Result};

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Resolve the config file for a run.
///
/// - An explicit path must exist.
/// - Otherwise [`default_config_path`] is loaded if present.
/// - Otherwise built-in defaults apply.
pub fn load_optional(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(AwsAllError::Config(format!(
                    "config file {:?} does not exist",
                    path
                )));
            }
            load_and_validate(path)
        }
        None => {
            let path = default_config_path();
            if path.is_file() {
                debug!(path = ?path, "loading default config file");
                load_and_validate(&path)
            } else {
                debug!("no config file found; using defaults");
                Ok(ConfigFile::default())
            }
        }
    }
}

/// `aws-all.toml` in the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("aws-all.toml")
}

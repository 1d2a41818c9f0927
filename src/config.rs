// File: src/config.rs
//! Engine configuration: defaults, then an optional JSON file, then the
//! environment.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const STORE_PATH_ENV: &str = "CIPHER_STORE_PATH";
pub const STRICT_LEARNING_ENV: &str = "CIPHER_STRICT_LEARNING";

const APP_DIR: &str = "text-cipher";
const STORE_FILE: &str = "learned_ciphers.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where learned ciphers are kept. A `.bin` extension selects bincode.
    pub store_path: PathBuf,
    /// Refuse to learn ciphers whose decode direction would be lossy.
    pub strict_learning: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            strict_learning: false,
        }
    }
}

/// `<local data dir>/text-cipher/learned_ciphers.json`, or the bare file name
/// when the platform has no data directory.
pub fn default_store_path() -> PathBuf {
    match dirs::data_local_dir().or_else(dirs::home_dir) {
        Some(mut path) => {
            path.push(APP_DIR);
            path.push(STORE_FILE);
            path
        }
        None => PathBuf::from(STORE_FILE),
    }
}

impl EngineConfig {
    /// Builds the configuration from defaults, the file at `path` if given,
    /// and then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(store) = lookup(STORE_PATH_ENV) {
            if !store.trim().is_empty() {
                self.store_path = PathBuf::from(store);
            }
        }
        if let Some(flag) = lookup(STRICT_LEARNING_ENV) {
            self.strict_learning = parse_flag(STRICT_LEARNING_ENV, &flag)?;
        }
        Ok(())
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

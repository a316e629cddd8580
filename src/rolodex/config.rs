//! # Configuration
//!
//! Stored as `config.json` in the data directory (`$ROLODEX_HOME`, or the
//! OS data dir). Missing keys fall back to defaults.
//!
//! | Key          | Default            | Description                              |
//! |--------------|--------------------|------------------------------------------|
//! | `data-file`  | `address_book.bin` | Book file, relative to the data dir      |
//! | `batch-size` | `3`                | Records per batch for `list --batched`   |
//! | `autosave`   | `true`             | Save after mutating one-shot commands    |

use crate::error::{Result, RolodexError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DATA_FILE: &str = "address_book.bin";
const DEFAULT_BATCH_SIZE: usize = 3;

pub const KEYS: [&str; 3] = ["data-file", "batch-size", "autosave"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RolodexConfig {
    #[serde(default = "default_data_file")]
    pub data_file: String,

    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_autosave() -> bool {
    true
}

impl Default for RolodexConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            batch_size: default_batch_size(),
            autosave: default_autosave(),
        }
    }
}

impl RolodexConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(RolodexError::Io)?;
        let config: RolodexConfig =
            serde_json::from_str(&content).map_err(RolodexError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(RolodexError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(RolodexError::Serialization)?;
        fs::write(config_path, content).map_err(RolodexError::Io)?;
        Ok(())
    }

    /// Resolves the book file against the data directory. Absolute paths
    /// are kept as they are.
    pub fn data_path<P: AsRef<Path>>(&self, data_dir: P) -> PathBuf {
        data_dir.as_ref().join(&self.data_file)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data-file" => Some(self.data_file.clone()),
            "batch-size" => Some(self.batch_size.to_string()),
            "autosave" => Some(self.autosave.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data-file" => {
                if value.trim().is_empty() {
                    return Err(RolodexError::Config("data-file cannot be empty".into()));
                }
                self.data_file = value.to_string();
            }
            "batch-size" => {
                self.batch_size = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        RolodexError::Config(format!(
                            "batch-size must be a positive integer, got '{}'",
                            value
                        ))
                    })?;
            }
            "autosave" => {
                self.autosave = value.parse::<bool>().map_err(|_| {
                    RolodexError::Config(format!(
                        "autosave must be true or false, got '{}'",
                        value
                    ))
                })?;
            }
            other => {
                return Err(RolodexError::Config(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }
}

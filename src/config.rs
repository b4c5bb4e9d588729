use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Driver defaults. Command-line flags win over these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_format")]
    pub format: OutputFormat,
    #[serde(default)]
    pub positions: bool,
    /// Used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_format() -> OutputFormat {
    OutputFormat::Text
}

fn default_log_filter() -> String {
    String::from("warn")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            format: default_format(),
            positions: false,
            log_filter: default_log_filter(),
        }
    }
}

impl Config {
    /// Reads the config file if there is one, then applies `CMMSCAN_*`
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::load_from(&Self::get_config_path())?;
        config.apply_overrides(env::var("CMMSCAN_FORMAT").ok(), env::var("CMMSCAN_POSITIONS").ok())?;
        Ok(config)
    }

    /// A missing file means defaults; an unreadable or malformed one is an
    /// error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides(
        &mut self,
        format: Option<String>,
        positions: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = format {
            self.format = match value.to_ascii_lowercase().as_str() {
                "text" => OutputFormat::Text,
                "json" => OutputFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidOverride {
                        key: "CMMSCAN_FORMAT",
                        value,
                    })
                }
            };
        }
        if let Some(value) = positions {
            self.positions = match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidOverride {
                        key: "CMMSCAN_POSITIONS",
                        value,
                    })
                }
            };
        }
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(io::Error::from)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn get_config_path() -> PathBuf {
        if let Ok(custom) = env::var("CMMSCAN_CONFIG") {
            return PathBuf::from(custom);
        }
        let home = if cfg!(windows) {
            env::var("USERPROFILE")
        } else {
            env::var("HOME")
        };
        PathBuf::from(home.unwrap_or_else(|_| String::from(".")))
            .join(".cmmscan")
            .join("config.json")
    }
}

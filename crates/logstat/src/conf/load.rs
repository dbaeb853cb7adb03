//! Load — config loading from file and environment variables.

use std::path::{Path, PathBuf};
use std::fs::File;
use std::io::Read;

use super::model::{AnalyzerConfig, ConfigError};

pub const DEFAULT_CONFIG_PATH: &str = "logstat.toml";

/// Where the file layer of a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Nothing at this implicit location; built-in defaults were used
    Defaults(PathBuf),
}

impl AnalyzerConfig {
    /// Load configuration from file and environment variables
    /// Priority: Environment Variables > Config File > Defaults
    ///
    /// An explicit `path` must exist. Otherwise `LOGSTAT_CONFIG_FILE` or
    /// `logstat.toml` is used when present, and defaults when not.
    pub fn load(path: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let (mut config, source) = match path {
            Some(path) => (Self::from_file(path)?, ConfigSource::File(path.to_path_buf())),
            None => {
                let implicit: PathBuf = std::env::var("LOGSTAT_CONFIG_FILE")
                    .map(Into::into)
                    .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
                if implicit.exists() {
                    (Self::from_file(&implicit)?, ConfigSource::File(implicit))
                } else {
                    (Self::default(), ConfigSource::Defaults(implicit))
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok((config, source))
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `LOGSTAT_*` overrides. Values that do not parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(capacity) = lookup("LOGSTAT_CHANNEL_CAPACITY").and_then(|s| s.parse().ok()) {
            self.channel_capacity = capacity;
        }
        if let Some(limit) = lookup("LOGSTAT_MAX_CONCURRENT_FILES").and_then(|s| s.parse().ok()) {
            self.max_concurrent_files = limit;
        }
        if let Some(strip) = lookup("LOGSTAT_STRIP_QUERY").and_then(|s| s.parse().ok()) {
            self.strip_query_strings = strip;
        }
        if let Some(level) = lookup("LOGSTAT_LOG_LEVEL") {
            self.log_level = level;
        }
    }
}

//! Model — AnalyzerConfig and its error type.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analyze::AnalyzeOptions;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Result channel capacity between file tasks and the merger
    pub channel_capacity: usize,
    /// 0 means one concurrent task per file
    pub max_concurrent_files: usize,
    pub strip_query_strings: bool,
    /// Filter used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 2,
            max_concurrent_files: 0,
            strip_query_strings: false,
            log_level: "info".to_string(),
        }
    }
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid("channel_capacity must be > 0".to_string()));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn options(&self) -> AnalyzeOptions {
        AnalyzeOptions {
            channel_capacity: self.channel_capacity,
            max_concurrent_files: self.max_concurrent_files,
            strip_query_strings: self.strip_query_strings,
        }
    }
}

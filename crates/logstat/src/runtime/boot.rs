//! Boot — logging init, config load, input filtering, analysis run.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::analyze::{analyze_files, AnalysisReport};
use crate::conf::{AnalyzerConfig, ConfigError, ConfigSource};

/// Initialise the tracing / logging subsystem.
///
/// `RUST_LOG` wins; otherwise `default_level` is used. Logs go to stderr so
/// stdout stays clean for the report.
pub fn init_logging(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load config, applying the command-line override for query stripping.
///
/// Runs before logging is up; report the returned source with
/// `log_config_source` once it is.
pub fn load_config(
    path: Option<&Path>,
    strip_query: bool,
) -> Result<(AnalyzerConfig, ConfigSource), ConfigError> {
    let (mut config, source) = AnalyzerConfig::load(path)?;
    if strip_query {
        config.strip_query_strings = true;
    }
    Ok((config, source))
}

pub fn log_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
        ConfigSource::Defaults(path) => {
            debug!("Config file not found at {}, using defaults", path.display())
        }
    }
}

/// Keep only paths that exist, logging each decision.
pub fn existing_files(candidates: Vec<PathBuf>) -> Vec<PathBuf> {
    candidates
        .into_iter()
        .filter(|path| {
            if path.exists() {
                info!("Found {}", path.display());
                true
            } else {
                warn!("{} (file not found)", path.display());
                false
            }
        })
        .collect()
}

/// Run the analysis over `files` with the loaded configuration.
pub async fn run(files: Vec<PathBuf>, config: &AnalyzerConfig) -> AnalysisReport {
    info!(
        "Analyzing {} file(s): channel_capacity={}, max_concurrent_files={}, strip_query_strings={}",
        files.len(),
        config.channel_capacity,
        config.max_concurrent_files,
        config.strip_query_strings
    );

    let report = analyze_files(files, config.options()).await;

    info!(
        "Analysis complete: {} requests from {} file(s), {} failure(s)",
        report.stats.total_requests,
        report.files_processed,
        report.failures.len()
    );

    report
}

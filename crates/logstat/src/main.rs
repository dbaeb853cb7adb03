use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use clap::Parser;

use logstat::runtime::boot;

#[derive(Parser, Debug)]
#[command(
    name = "logstat",
    version,
    about = "Aggregate traffic statistics from access logs"
)]
struct Cli {
    /// Log files to analyze; the format is detected per line
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Path to the logstat config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Count paths without their query string
    #[arg(long)]
    strip_query: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, source) = boot::load_config(cli.config.as_deref(), cli.strip_query)
        .with_context(|| match &cli.config {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to load configuration".to_string(),
        })?;
    boot::init_logging(&config.log_level);
    boot::log_config_source(&source);

    let files = boot::existing_files(cli.files);
    if files.is_empty() {
        bail!("None of the given log files exist");
    }

    let report = boot::run(files, &config).await;
    let rendered = serde_json::to_string_pretty(&report)
        .context("Failed to serialize report")?;
    println!("{}", rendered);

    Ok(())
}

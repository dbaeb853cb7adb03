//! Coordinator — one task per file, results fanned back in over a bounded channel.

use std::path::PathBuf;
use std::sync::Arc;
use futures_util::future::join_all;
use tokio::sync::{mpsc, Semaphore};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};

use crate::stats::{Stats, StatsMerger};

use super::error::AnalyzeError;
use super::file::aggregate_file;
use super::{AnalysisReport, AnalyzeOptions, FileFailure};

/// What a file task publishes when it is done.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<Stats, AnalyzeError>,
}

/// Analyze every file concurrently and merge the results.
///
/// Each file gets its own task that exclusively owns its `Stats` until it is
/// sent on the result channel. A coordinator task waits for all of them and
/// only then releases the last sender, which is what ends the merge loop.
/// Failures stay per file and never cancel siblings.
pub async fn analyze_files(paths: Vec<PathBuf>, options: AnalyzeOptions) -> AnalysisReport {
    let (tx, rx) = mpsc::channel::<FileOutcome>(options.channel_capacity.max(1));

    let limiter = (options.max_concurrent_files > 0)
        .then(|| Arc::new(Semaphore::new(options.max_concurrent_files)));
    let options = Arc::new(options);

    let mut tasks = Vec::with_capacity(paths.len());
    for path in paths {
        let tx = tx.clone();
        let options = Arc::clone(&options);
        let limiter = limiter.clone();
        let task_path = path.clone();

        let handle = tokio::spawn(async move {
            let _permit = match limiter {
                Some(limiter) => limiter.acquire_owned().await.ok(),
                None => None,
            };

            let result = aggregate_file(&task_path, &options).await;
            if let Ok(stats) = &result {
                info!("Processed: {} ({} valid lines)", task_path.display(), stats.total_requests);
            }

            if tx.send(FileOutcome { path: task_path, result }).await.is_err() {
                warn!("Result channel closed before all files were reported");
            }
        });
        tasks.push((path, handle));
    }

    // Join barrier: the original sender lives until every task has finished.
    tokio::spawn(async move {
        let (paths, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();
        for (path, joined) in paths.into_iter().zip(join_all(handles).await) {
            if let Err(e) = joined {
                error!("File task for {} panicked: {}", path.display(), e);
                let result = Err(AnalyzeError::TaskFailed {
                    path: path.clone(),
                    message: e.to_string(),
                });
                if tx.send(FileOutcome { path, result }).await.is_err() {
                    warn!("Result channel closed before all files were reported");
                }
            }
        }
        drop(tx);
    });

    collect(rx).await
}

/// Drain the result channel until every sender is gone.
async fn collect(rx: mpsc::Receiver<FileOutcome>) -> AnalysisReport {
    let mut merger = StatsMerger::new();
    let mut failures = Vec::new();

    let mut outcomes = ReceiverStream::new(rx);
    while let Some(outcome) = outcomes.next().await {
        match outcome.result {
            Ok(stats) => merger.push(stats),
            Err(e) => {
                warn!("Skipping {}: {}", outcome.path.display(), e);
                failures.push(FileFailure {
                    path: outcome.path,
                    error: e.to_string(),
                });
            }
        }
    }

    AnalysisReport {
        files_processed: merger.files(),
        stats: merger.finish(),
        failures,
    }
}

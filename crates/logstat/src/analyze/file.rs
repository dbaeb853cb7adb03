//! File — streams one log file through detection and parsing.

use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::{debug, trace};

use crate::parser::{LineDispatcher, MAX_LINE_SIZE};
use crate::stats::{Accumulator, Stats};

use super::error::AnalyzeError;
use super::AnalyzeOptions;

/// Read `path` line by line and build its `Stats`.
///
/// Lines no parser accepts are skipped and counted in `skipped_lines`.
/// At most `MAX_LINE_SIZE + 1` bytes of a line are buffered; the rest of an
/// oversized line is discarded unread. Only failing to open or read the file
/// is an error.
pub async fn aggregate_file(path: &Path, options: &AnalyzeOptions) -> Result<Stats, AnalyzeError> {
    let file = File::open(path).await.map_err(|source| AnalyzeError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = BufReader::new(file);
    let dispatcher = LineDispatcher::new();
    let mut acc = Accumulator::new(options.strip_query_strings);

    let mut buf = Vec::new();
    let mut line_no: u64 = 0;

    let read_error = |source| AnalyzeError::Read {
        path: path.to_path_buf(),
        source,
    };

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(MAX_LINE_SIZE as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await
            .map_err(read_error)?;
        if read == 0 {
            break;
        }
        line_no += 1;

        if buf.len() > MAX_LINE_SIZE && buf.last() != Some(&b'\n') {
            discard_line(&mut reader).await.map_err(read_error)?;
        }

        let raw = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        match dispatcher.parse_bytes(raw) {
            Ok(record) => acc.record(record),
            Err(e) => {
                trace!("{}:{} skipped: {}", path.display(), line_no, e);
                acc.skip();
            }
        }
    }

    debug!(
        "Finished {}: {} lines read, {} parsed",
        path.display(),
        line_no,
        acc.total_requests()
    );

    Ok(acc.finish())
}

/// Consume input up to and including the next `\n`.
async fn discard_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> io::Result<()> {
    loop {
        let (used, done) = {
            let chunk = reader.fill_buf().await?;
            if chunk.is_empty() {
                return Ok(());
            }
            match chunk.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (chunk.len(), false),
            }
        };
        reader.consume(used);
        if done {
            return Ok(());
        }
    }
}

//! Chat-log conversion: JSON-lines Telegram exports to a plain-text dataset.
//!
//! Each log line is one JSON record. Only `"message"` events with non-empty
//! text are kept; their newlines are escaped so every message fits on one
//! dataset line. Logs are written newest first, so the output of each file is
//! reversed to put the newest message last.

use rayon::prelude::*;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::{SeqError, SeqResult};
use crate::utils::escape_newlines;

/// The fields of a log record the converter looks at. Everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
struct LogRecord {
    #[serde(default)]
    event: String,
    #[serde(default)]
    text: String,
}

/// Outcome of converting a batch of log files.
#[derive(Debug, Default)]
pub struct LogReport {
    /// Messages of every readable file, in input file order.
    pub messages: Vec<String>,
    /// Files that could not be read, with the error that stopped them.
    pub failed: Vec<(PathBuf, SeqError)>,
}

/// Extract the dataset line for one raw log record, if it carries a message.
///
/// Records of three bytes or fewer are treated as blank. Malformed JSON is
/// logged and skipped.
#[must_use]
pub fn message_text(raw: &str) -> Option<String> {
    if raw.len() <= 3 {
        return None;
    }

    let record: LogRecord = match serde_json::from_str(raw) {
        Ok(record) => record,
        Err(e) => {
            warn!(error = %e, record = raw, "skipping malformed log record");
            return None;
        }
    };

    if record.event != "message" || record.text.is_empty() {
        return None;
    }

    Some(escape_newlines(&record.text))
}

/// Convert the raw contents of one log file, newest message last.
///
/// Invalid UTF-8 is replaced with U+FFFD record by record, so one bad byte
/// does not cost the rest of the file.
#[must_use]
pub fn convert_log(contents: &[u8]) -> Vec<String> {
    let lines: Vec<&[u8]> = contents.split(|&b| b == b'\n').collect();
    let mut messages: Vec<String> = lines
        .par_iter()
        .filter_map(|raw| message_text(&String::from_utf8_lossy(raw)))
        .collect();
    messages.reverse();
    messages
}

/// Read and convert one log file.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn convert_log_file(path: &Path) -> SeqResult<Vec<String>> {
    let contents = std::fs::read(path).map_err(|e| SeqError::io(path, e))?;
    let messages = convert_log(&contents);
    debug!(path = %path.display(), messages = messages.len(), "converted log file");
    Ok(messages)
}

/// Convert several log files in parallel.
///
/// Unreadable files are logged and reported; the others are still converted.
#[must_use]
pub fn convert_logs(paths: &[PathBuf]) -> LogReport {
    let results: Vec<(PathBuf, SeqResult<Vec<String>>)> = paths
        .par_iter()
        .map(|path| (path.clone(), convert_log_file(path)))
        .collect();

    let mut report = LogReport::default();
    for (path, result) in results {
        match result {
            Ok(messages) => report.messages.extend(messages),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping log file");
                report.failed.push((path, e));
            }
        }
    }
    report
}

/// Write one message per line.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_dataset(path: &Path, messages: &[String]) -> SeqResult<()> {
    let file = File::create(path).map_err(|e| SeqError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    for message in messages {
        writeln!(writer, "{message}").map_err(|e| SeqError::io(path, e))?;
    }
    writer.flush().map_err(|e| SeqError::io(path, e))
}

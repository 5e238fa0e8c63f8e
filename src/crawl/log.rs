//! Append-only, timestamped crawl log file.
//!
//! One `CrawlLog` is bound to one file for one crawl. The handle is passed
//! explicitly to the crawler; it is flushed by [`CrawlLog::close`] on the
//! normal path and by `Drop` on every other path.

use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing::debug;

/// `2024-05-01 13:37:00,123`
const TIMESTAMP_FORMAT: &[FormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second],[subsecond digits:3]"
);

/// Errors from opening or writing the crawl log.
#[derive(Debug, Error)]
pub enum CrawlLogError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write log file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to format log timestamp: {0}")]
    Timestamp(#[from] time::error::Format),
}

/// Timestamped line log bound to one file.
#[derive(Debug)]
pub struct CrawlLog {
    path: PathBuf,
    offset: UtcOffset,
    writer: Option<LineWriter<File>>,
}

impl CrawlLog {
    /// Opens `path` in append mode, creating it if missing.
    ///
    /// Timestamps use the local UTC offset determined at open time, falling
    /// back to UTC when it cannot be determined. Open the log before starting
    /// a multi-threaded runtime so the local offset can be read.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlLogError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, CrawlLogError> {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        Self::open_with_offset(path, offset)
    }

    /// Opens `path` in append mode with an explicit timestamp offset.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlLogError::Open`] if the file cannot be opened.
    pub fn open_with_offset(
        path: impl AsRef<Path>,
        offset: UtcOffset,
    ) -> Result<Self, CrawlLogError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| CrawlLogError::Open {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "crawl log opened");
        Ok(Self {
            path,
            offset,
            writer: Some(LineWriter::new(file)),
        })
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one `{timestamp} {message}` line.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlLogError::Write`] if the line cannot be written or the
    /// log was already closed.
    pub fn info(&mut self, message: &str) -> Result<(), CrawlLogError> {
        let timestamp = OffsetDateTime::now_utc()
            .to_offset(self.offset)
            .format(TIMESTAMP_FORMAT)?;
        let Some(writer) = self.writer.as_mut() else {
            return Err(self.write_error(std::io::Error::other("log already closed")));
        };
        // Messages never span lines in the log.
        let message = message.replace(['\r', '\n'], " ");
        if let Err(source) = writeln!(writer, "{timestamp} {message}") {
            return Err(self.write_error(source));
        }
        Ok(())
    }

    /// Flushes and releases the file.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlLogError::Write`] if the final flush fails.
    pub fn close(mut self) -> Result<(), CrawlLogError> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|source| CrawlLogError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        debug!(path = %self.path.display(), "crawl log closed");
        Ok(())
    }

    fn write_error(&self, source: std::io::Error) -> CrawlLogError {
        CrawlLogError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Drop for CrawlLog {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

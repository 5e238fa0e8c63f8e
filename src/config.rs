//! Run configuration and defaults.

use std::path::PathBuf;

use crate::download::constants::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use crate::progress::{DEFAULT_BAR_WIDTH, DEFAULT_COMPLETE_MESSAGE};

/// Default crawl log filename, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "crawling.log";

/// URLs longer than this are middle-ellipsized in log lines.
pub const MAX_URL_DISPLAY: usize = 40;

/// Filenames longer than this are middle-ellipsized in log lines.
pub const MAX_FILENAME_DISPLAY: usize = 15;

/// Settings for one crawl invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Directory images are written to; created on first download.
    pub destination_dir: PathBuf,
    /// Crawl log file, opened in append mode.
    pub log_file: PathBuf,
    /// HTTP connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Total per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Progress bar width in characters.
    pub progress_width: usize,
    /// Message appended when the progress bar completes.
    pub complete_message: String,
    /// Display width for URLs in log lines.
    pub max_url_display: usize,
    /// Display width for filenames in log lines.
    pub max_filename_display: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            destination_dir: default_destination_dir(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            connect_timeout_secs: CONNECT_TIMEOUT_SECS,
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            progress_width: DEFAULT_BAR_WIDTH,
            complete_message: DEFAULT_COMPLETE_MESSAGE.to_string(),
            max_url_display: MAX_URL_DISPLAY,
            max_filename_display: MAX_FILENAME_DISPLAY,
        }
    }
}

impl CrawlConfig {
    /// Returns a copy with a different destination directory.
    #[must_use]
    pub fn with_destination_dir(mut self, destination_dir: impl Into<PathBuf>) -> Self {
        self.destination_dir = destination_dir.into();
        self
    }
}

/// Current working directory, or `.` when it cannot be determined.
#[must_use]
pub fn default_destination_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

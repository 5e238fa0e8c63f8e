//! Crawl orchestration: the per-URL pipeline and the crawl log.
//!
//! For every line of the URL list the crawler runs
//! `parse → robots check → fetch → persist`, stops at the first stage that
//! does not succeed, and writes exactly one log line for the outcome.
//!
//! # Example
//!
//! ```no_run
//! use imgcrawl_core::{CrawlConfig, CrawlLog, Crawler};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CrawlConfig::default().with_destination_dir("./images");
//! let crawler = Crawler::new(config)?;
//! let mut log = CrawlLog::open("crawling.log")?;
//! let summary = crawler
//!     .run(Path::new("urls.txt"), &mut log, std::io::stdout())
//!     .await?;
//! log.close()?;
//! println!("{} downloaded", summary.downloaded);
//! # Ok(())
//! # }
//! ```

mod display;
mod log;
mod outcome;

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};

use crate::config::CrawlConfig;
use crate::download::{DownloadError, HttpClient, RobotsChecker};
use crate::parser::parse_url_record;
use crate::progress::{ProgressError, ProgressReporter};

pub use display::truncate_middle;
pub use log::{CrawlLog, CrawlLogError};
pub use outcome::CrawlOutcome;

/// Process-level crawl failures. Per-URL failures never surface here.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The URL list could not be opened or read.
    #[error("{path}: {source}")]
    UrlList {
        /// The URL list path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The crawl log could not be written.
    #[error(transparent)]
    Log(#[from] CrawlLogError),

    /// The progress bar could not be created or drawn.
    #[error(transparent)]
    Progress(#[from] ProgressError),
}

impl CrawlError {
    fn url_list(path: &Path, source: std::io::Error) -> Self {
        Self::UrlList {
            path: path.to_path_buf(),
            source,
        }
    }

    /// OS error code when the URL list could not be opened.
    #[must_use]
    pub fn url_list_os_error(&self) -> Option<i32> {
        match self {
            Self::UrlList { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Per-outcome counts for one crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    pub processed: usize,
    pub downloaded: usize,
    pub invalid: usize,
    pub policy_unreachable: usize,
    pub disallowed: usize,
    pub fetch_failed: usize,
    pub not_an_image: usize,
    pub write_failed: usize,
}

impl CrawlSummary {
    fn record(&mut self, outcome: &CrawlOutcome) {
        self.processed += 1;
        let slot = match outcome {
            CrawlOutcome::Downloaded { .. } => &mut self.downloaded,
            CrawlOutcome::InvalidUrl { .. } => &mut self.invalid,
            CrawlOutcome::PolicyUnreachable { .. } => &mut self.policy_unreachable,
            CrawlOutcome::PolicyDisallowed => &mut self.disallowed,
            CrawlOutcome::FetchFailed { .. } => &mut self.fetch_failed,
            CrawlOutcome::NotAnImage { .. } => &mut self.not_an_image,
            CrawlOutcome::WriteFailed { .. } => &mut self.write_failed,
        };
        *slot += 1;
    }

    /// URLs that did not end in a stored image.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.processed - self.downloaded
    }
}

/// 1-based sequence number of successful downloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DownloadCounter(u64);

impl DownloadCounter {
    fn new() -> Self {
        Self(1)
    }

    /// Sequence number the next stored image will use.
    fn next_sequence(self) -> u64 {
        self.0
    }

    fn advance(&mut self) {
        self.0 += 1;
    }
}

/// Drives the per-URL pipeline over a URL list.
#[derive(Debug, Clone)]
pub struct Crawler {
    client: HttpClient,
    robots: RobotsChecker,
    config: CrawlConfig,
}

impl Crawler {
    /// Creates a crawler with an HTTP client built from the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: CrawlConfig) -> Result<Self, DownloadError> {
        let client =
            HttpClient::with_timeouts(config.connect_timeout_secs, config.request_timeout_secs)?;
        Ok(Self::with_client(client, config))
    }

    /// Creates a crawler around an existing client.
    #[must_use]
    pub fn with_client(client: HttpClient, config: CrawlConfig) -> Self {
        let robots = RobotsChecker::new(client.clone());
        Self {
            client,
            robots,
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls every line of `url_file`, logging one line per URL to `log` and
    /// drawing progress to `progress_out`.
    ///
    /// The list is read twice: once to count lines for the progress maximum,
    /// once to process them. Blank lines are processed and logged as invalid.
    ///
    /// # Errors
    ///
    /// Returns [`CrawlError::UrlList`] if the list cannot be opened or read,
    /// and [`CrawlError::Log`] / [`CrawlError::Progress`] if the log or the
    /// progress bar cannot be written. Per-URL failures are logged, not
    /// returned.
    #[instrument(skip(self, log, progress_out), fields(url_file = %url_file.display()))]
    pub async fn run<W: Write>(
        &self,
        url_file: &Path,
        log: &mut CrawlLog,
        progress_out: W,
    ) -> Result<CrawlSummary, CrawlError> {
        let total = count_lines(url_file).await?;
        debug!(total, "counted URL lines");

        log.info(&format!(
            "downloading images from URLs listed in file \"{}\" into directory \"{}\".",
            url_file.display(),
            self.config.destination_dir.display()
        ))?;

        let mut summary = CrawlSummary::default();
        if total == 0 {
            info!("URL list is empty");
            return Ok(summary);
        }

        #[allow(clippy::cast_precision_loss)]
        let mut progress =
            ProgressReporter::new(progress_out, total as f64, self.config.progress_width)?;

        let file = File::open(url_file)
            .await
            .map_err(|e| CrawlError::url_list(url_file, e))?;
        let mut lines = BufReader::new(file).lines();
        let mut counter = DownloadCounter::new();

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| CrawlError::url_list(url_file, e))?
        {
            let line = line.trim();
            let outcome = self.process_url(line, counter.next_sequence()).await;
            if outcome.is_downloaded() {
                counter.advance();
            }

            log.info(&self.log_message(line, &outcome))?;
            self.trace_outcome(line, &outcome);
            summary.record(&outcome);

            #[allow(clippy::cast_precision_loss)]
            let processed = summary.processed as f64;
            progress.update(processed)?;
        }

        progress.complete(&self.config.complete_message)?;

        info!(
            processed = summary.processed,
            downloaded = summary.downloaded,
            failed = summary.failed(),
            "crawl complete"
        );
        Ok(summary)
    }

    /// Runs the pipeline for one trimmed line.
    ///
    /// `sequence_number` names the stored file if this URL is downloaded.
    #[instrument(skip(self))]
    pub async fn process_url(&self, line: &str, sequence_number: u64) -> CrawlOutcome {
        let record = match parse_url_record(line) {
            Ok(record) => record,
            Err(e) => return CrawlOutcome::invalid_url(&e),
        };

        match self
            .robots
            .is_allowed(&record.url, &record.scheme, &record.authority)
            .await
        {
            Ok(true) => {}
            Ok(false) => return CrawlOutcome::PolicyDisallowed,
            Err(e) => {
                return CrawlOutcome::PolicyUnreachable {
                    reason: e.to_string(),
                };
            }
        }

        self.client
            .fetch_and_store(&record.url, &self.config.destination_dir, sequence_number)
            .await
    }

    /// `{tag}: {url}`, plus `as {filename}` for downloads, shortened for display.
    fn log_message(&self, line: &str, outcome: &CrawlOutcome) -> String {
        let url = truncate_middle(line, self.config.max_url_display);
        match outcome {
            CrawlOutcome::Downloaded { filename } => format!(
                "{}: {url} as {}",
                outcome.tag(),
                truncate_middle(filename, self.config.max_filename_display)
            ),
            other => format!("{}: {url}", other.tag()),
        }
    }

    fn trace_outcome(&self, line: &str, outcome: &CrawlOutcome) {
        match outcome {
            CrawlOutcome::Downloaded { filename } => {
                info!(url = %line, filename = %filename, "downloaded");
            }
            CrawlOutcome::InvalidUrl { .. } | CrawlOutcome::PolicyDisallowed => {
                debug!(url = %line, outcome = %outcome, "skipped");
            }
            other => warn!(url = %line, outcome = %other, "not downloaded"),
        }
    }
}

async fn count_lines(url_file: &Path) -> Result<usize, CrawlError> {
    let file = File::open(url_file)
        .await
        .map_err(|e| CrawlError::url_list(url_file, e))?;
    let mut lines = BufReader::new(file).lines();
    let mut total = 0;
    while lines
        .next_line()
        .await
        .map_err(|e| CrawlError::url_list(url_file, e))?
        .is_some()
    {
        total += 1;
    }
    Ok(total)
}

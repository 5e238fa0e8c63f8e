//! HTTP client wrapper for fetching and storing images.
//!
//! This module provides the `HttpClient` struct which issues GET requests
//! with explicit timeouts, verifies the declared content type, and streams
//! image bodies to disk.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument};
use url::Url;

use super::constants::{CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS};
use super::error::DownloadError;
use super::filename::sequenced_filename;
use super::mime::is_image_content_type;
use crate::crawl::CrawlOutcome;
use crate::user_agent;

/// HTTP client for fetching robots.txt files and images.
///
/// This client is designed to be created once and reused for every URL of a
/// crawl, taking advantage of connection pooling.
///
/// # Example
///
/// ```no_run
/// use imgcrawl_core::download::HttpClient;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let url = url::Url::parse("https://example.com/cat.png")?;
/// let stored = client.store_image(&url, Path::new("./images"), 1).await?;
/// println!("Stored as: {}", stored.filename);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

/// Metadata about one stored image.
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Filename inside the destination directory, e.g. `1_cat.png`.
    pub filename: String,
    /// Full output path.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes_written: u64,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with default timeouts.
    ///
    /// Default configuration:
    /// - Connect timeout: 10 seconds
    /// - Total request timeout: 30 seconds
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, REQUEST_TIMEOUT_SECS)
            .expect("failed to build HTTP client with static configuration")
    }

    /// Creates a new HTTP client with explicit timeout values.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError::ClientBuild`] if the TLS backend or system
    /// configuration prevents the client from being built.
    pub fn with_timeouts(
        connect_timeout_secs: u64,
        request_timeout_secs: u64,
    ) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(request_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(DownloadError::client_build)?;
        Ok(Self { client })
    }

    /// Fetches `url` and stores it as image number `sequence_number`.
    ///
    /// Never fails: every error is folded into the matching [`CrawlOutcome`]
    /// (`FetchFailed`, `NotAnImage`, `WriteFailed`). On success the outcome is
    /// `Downloaded` and the caller is responsible for advancing its counter.
    #[instrument(skip(self, destination_dir), fields(url = %url))]
    pub async fn fetch_and_store(
        &self,
        url: &Url,
        destination_dir: &Path,
        sequence_number: u64,
    ) -> CrawlOutcome {
        match self
            .store_image(url, destination_dir, sequence_number)
            .await
        {
            Ok(stored) => CrawlOutcome::Downloaded {
                filename: stored.filename,
            },
            Err(error) => CrawlOutcome::from_download_error(&error),
        }
    }

    /// Fetches `url`, verifies it is an image, and writes it to
    /// `{destination_dir}/{sequence_number}_{basename}`.
    ///
    /// The destination directory is created if missing. A file that fails
    /// mid-write is removed before the error is returned.
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The request fails (network error, timeout)
    /// - The server returns an error status (4xx, 5xx)
    /// - The declared content type is not `image/*`
    /// - Creating the directory or writing the file fails
    #[must_use = "stored image contains the filename to log"]
    pub async fn store_image(
        &self,
        url: &Url,
        destination_dir: &Path,
        sequence_number: u64,
    ) -> Result<StoredImage, DownloadError> {
        debug!("starting image fetch");

        let response = self.get(url.as_str()).await?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        if !is_image_content_type(content_type.as_deref()) {
            debug!(content_type = ?content_type, "response is not an image");
            return Err(DownloadError::not_an_image(url.as_str(), content_type));
        }

        tokio::fs::create_dir_all(destination_dir)
            .await
            .map_err(|e| DownloadError::io(destination_dir, e))?;

        let filename = sequenced_filename(sequence_number, url, content_type.as_deref());
        let file_path = destination_dir.join(&filename);
        debug!(path = %file_path.display(), "resolved output path");

        let mut file = File::create(&file_path)
            .await
            .map_err(|e| DownloadError::io(file_path.clone(), e))?;

        // Stream response body to file, with cleanup on error
        let stream_result = stream_to_file(&mut file, response, url.as_str(), &file_path).await;
        drop(file);

        if stream_result.is_err() {
            debug!(path = %file_path.display(), "cleaning up partial file after error");
            let _ = tokio::fs::remove_file(&file_path).await;
        }

        let bytes_written = stream_result?;

        info!(
            path = %file_path.display(),
            bytes = bytes_written,
            "image stored"
        );

        Ok(StoredImage {
            filename,
            path: file_path,
            bytes_written,
        })
    }

    /// Issues a GET request, mapping transport failures and error statuses.
    async fn get(&self, url: &str) -> Result<reqwest::Response, DownloadError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url, status.as_u16()));
        }

        Ok(response)
    }

    /// Returns a reference to the underlying reqwest client.
    ///
    /// Used by the robots.txt checker, which needs the raw status code.
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

/// Streams response body to file, returning bytes written.
///
/// Transport errors while reading the body are network errors; errors while
/// writing are IO errors.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    file_path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    // Ensure all data is flushed to disk
    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_client_with_timeouts_builds() {
        assert!(HttpClient::with_timeouts(1, 1).is_ok());
    }

    #[test]
    fn test_http_client_default_builds() {
        let client = HttpClient::default();
        let _inner: &Client = client.inner();
    }
}

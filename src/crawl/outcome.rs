//! Per-URL crawl outcomes and their log messages.

use std::fmt;

use crate::download::DownloadError;
use crate::parser::ParseError;

pub(crate) const LOG_URL_INVALID: &str = "url string invalid";
pub(crate) const LOG_POLICY_UNREACHABLE: &str = "unable to access URL";
pub(crate) const LOG_DISALLOWED: &str = "download disallowed by robots.txt";
pub(crate) const LOG_FETCH_FAILED: &str = "failed to open image URL";
pub(crate) const LOG_NOT_AN_IMAGE: &str = "url content is not an image";
pub(crate) const LOG_WRITE_FAILED: &str = "unable to download the image";
pub(crate) const LOG_DOWNLOADED: &str = "downloaded";

/// Terminal result of processing one URL line.
///
/// Every variant except `Downloaded` short-circuits the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The line is not a URL with scheme, authority and path.
    InvalidUrl {
        /// Why validation failed.
        reason: String,
    },
    /// The host's robots.txt could not be fetched or read.
    PolicyUnreachable {
        /// Why the policy was unavailable.
        reason: String,
    },
    /// robots.txt forbids fetching the URL.
    PolicyDisallowed,
    /// The image request failed (transport error, timeout, error status).
    FetchFailed {
        /// Why the request failed.
        reason: String,
    },
    /// The response did not declare an `image/*` content type.
    NotAnImage {
        /// The declared content type, if any.
        content_type: Option<String>,
    },
    /// The image could not be written to the destination directory.
    WriteFailed {
        /// Why the write failed.
        reason: String,
    },
    /// The image was stored under `filename`.
    Downloaded {
        /// Filename inside the destination directory.
        filename: String,
    },
}

impl CrawlOutcome {
    /// Maps a validation error to `InvalidUrl`.
    #[must_use]
    pub fn invalid_url(error: &ParseError) -> Self {
        Self::InvalidUrl {
            reason: error.reason(),
        }
    }

    /// Maps a fetch/persist error to its outcome.
    #[must_use]
    pub fn from_download_error(error: &DownloadError) -> Self {
        match error {
            DownloadError::NotAnImage { content_type, .. } => Self::NotAnImage {
                content_type: content_type.clone(),
            },
            e if e.is_write_failure() => Self::WriteFailed {
                reason: e.to_string(),
            },
            e => Self::FetchFailed {
                reason: e.to_string(),
            },
        }
    }

    /// Log tag that distinguishes this outcome in the crawl log.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => LOG_URL_INVALID,
            Self::PolicyUnreachable { .. } => LOG_POLICY_UNREACHABLE,
            Self::PolicyDisallowed => LOG_DISALLOWED,
            Self::FetchFailed { .. } => LOG_FETCH_FAILED,
            Self::NotAnImage { .. } => LOG_NOT_AN_IMAGE,
            Self::WriteFailed { .. } => LOG_WRITE_FAILED,
            Self::Downloaded { .. } => LOG_DOWNLOADED,
        }
    }

    /// Detail for diagnostics; `None` for outcomes that need no explanation.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::InvalidUrl { reason }
            | Self::PolicyUnreachable { reason }
            | Self::FetchFailed { reason }
            | Self::WriteFailed { reason } => Some(reason),
            Self::NotAnImage { content_type } => content_type.as_deref(),
            Self::PolicyDisallowed | Self::Downloaded { .. } => None,
        }
    }

    #[must_use]
    pub fn is_downloaded(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Downloaded { filename } => write!(f, "{} as {filename}", self.tag()),
            other => match other.reason() {
                Some(reason) => write!(f, "{} ({reason})", other.tag()),
                None => f.write_str(other.tag()),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_invalid_url_uses_short_reason() {
        let outcome = CrawlOutcome::invalid_url(&ParseError::no_path("https://example.com"));
        assert_eq!(
            outcome,
            CrawlOutcome::InvalidUrl {
                reason: "URL has no path".to_string()
            }
        );
        assert!(!outcome.to_string().contains('\n'));
    }

    #[test]
    fn test_from_download_error_classifies() {
        let not_image = DownloadError::not_an_image("u", Some("text/html".to_string()));
        assert_eq!(
            CrawlOutcome::from_download_error(&not_image),
            CrawlOutcome::NotAnImage {
                content_type: Some("text/html".to_string())
            }
        );

        let io = DownloadError::io(
            PathBuf::from("/x/1_a.png"),
            std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"),
        );
        assert!(matches!(
            CrawlOutcome::from_download_error(&io),
            CrawlOutcome::WriteFailed { .. }
        ));

        let status = DownloadError::http_status("https://example.com/a.png", 500);
        assert!(matches!(
            CrawlOutcome::from_download_error(&status),
            CrawlOutcome::FetchFailed { .. }
        ));
    }

    #[test]
    fn test_tags_are_distinct() {
        let outcomes = [
            CrawlOutcome::InvalidUrl { reason: String::new() },
            CrawlOutcome::PolicyUnreachable { reason: String::new() },
            CrawlOutcome::PolicyDisallowed,
            CrawlOutcome::FetchFailed { reason: String::new() },
            CrawlOutcome::NotAnImage { content_type: None },
            CrawlOutcome::WriteFailed { reason: String::new() },
            CrawlOutcome::Downloaded { filename: String::new() },
        ];
        let mut tags: Vec<_> = outcomes.iter().map(CrawlOutcome::tag).collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), outcomes.len());
    }

    #[test]
    fn test_display() {
        let downloaded = CrawlOutcome::Downloaded {
            filename: "1_cat.png".to_string(),
        };
        assert_eq!(downloaded.to_string(), "downloaded as 1_cat.png");
        assert!(downloaded.is_downloaded());
        assert_eq!(
            CrawlOutcome::PolicyDisallowed.to_string(),
            "download disallowed by robots.txt"
        );
    }
}

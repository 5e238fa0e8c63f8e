//! Error types for URL validation.

use thiserror::Error;

/// Maximum URL length to accept (standard browser limit).
/// URLs longer than this are rejected to prevent memory issues.
pub const MAX_URL_LENGTH: usize = 2000;

/// Errors that can occur while validating a URL line.
#[derive(Debug, Clone, Error)]
pub enum ParseError {
    /// URL is malformed or missing one of scheme, authority, or path
    #[error("invalid URL '{url}': {reason}\n  Suggestion: {suggestion}")]
    InvalidUrl {
        /// The URL that failed validation
        url: String,
        /// Why the URL is invalid
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// URL exceeds maximum allowed length
    #[error(
        "URL too long ({length} chars, max {max}): {url_preview}...\n  Suggestion: Use a URL shortener or check for extraneous content"
    )]
    UrlTooLong {
        /// Truncated URL for display
        url_preview: String,
        /// Actual length
        length: usize,
        /// Maximum allowed
        max: usize,
    },
}

impl ParseError {
    /// Creates an `InvalidUrl` error for a blank line.
    #[must_use]
    pub fn empty() -> Self {
        Self::InvalidUrl {
            url: String::new(),
            reason: "line is empty".to_string(),
            suggestion: "Remove blank lines from the URL list".to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a malformed URL.
    #[must_use]
    pub fn malformed(url: &str, parse_error: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: parse_error.to_string(),
            suggestion: "Check the URL format and try again".to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a URL without a scheme.
    #[must_use]
    pub fn no_scheme(url: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: "URL has no scheme".to_string(),
            suggestion: "Prefix the URL with http:// or https://".to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a URL without an authority.
    #[must_use]
    pub fn no_host(url: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: "URL has no host".to_string(),
            suggestion: "Ensure the URL includes a domain (e.g., example.com)".to_string(),
        }
    }

    /// Creates an `InvalidUrl` error for a URL without a path.
    #[must_use]
    pub fn no_path(url: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            reason: "URL has no path".to_string(),
            suggestion: "Point the URL at an image file (e.g., /images/photo.jpg)".to_string(),
        }
    }

    /// Short single-line reason, without the URL or suggestion.
    #[must_use]
    pub fn reason(&self) -> String {
        match self {
            Self::InvalidUrl { reason, .. } => reason.clone(),
            Self::UrlTooLong { length, max, .. } => {
                format!("URL too long ({length} chars, max {max})")
            }
        }
    }

    /// Creates a `UrlTooLong` error for URLs exceeding the maximum length.
    #[must_use]
    pub fn too_long(url: &str) -> Self {
        Self::UrlTooLong {
            url_preview: url.chars().take(50).collect(),
            length: url.len(),
            max: MAX_URL_LENGTH,
        }
    }
}

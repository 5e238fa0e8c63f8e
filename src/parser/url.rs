//! Structural validation of URL lines.

use tracing::{debug, trace};
use url::Url;

use super::error::{MAX_URL_LENGTH, ParseError};

/// A URL line split into the components the crawl pipeline needs.
///
/// Only structurally valid records are ever constructed: scheme, authority
/// and path are all non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRecord {
    /// The trimmed input line.
    pub raw: String,
    /// Lowercased scheme, e.g. `https`.
    pub scheme: String,
    /// Authority as written in the input (host, optional userinfo and port).
    pub authority: String,
    /// Path as written in the input, always starting with `/`.
    pub path: String,
    /// The fully parsed URL used for requests.
    pub url: Url,
}

/// Parses a URL line into a [`UrlRecord`].
///
/// The check is syntactic only: no network access is made. The path is
/// judged on the raw input, so `https://example.com` is rejected even though
/// URL normalization would add a trailing `/`.
///
/// # Errors
///
/// Returns [`ParseError`] when the line is blank, too long, unparseable, or
/// lacks a scheme, an authority, or a path.
///
/// # Examples
///
/// ```
/// use imgcrawl_core::parser::parse_url_record;
///
/// let record = parse_url_record("https://example.com/img/cat.png").unwrap();
/// assert_eq!(record.scheme, "https");
/// assert_eq!(record.authority, "example.com");
/// assert_eq!(record.path, "/img/cat.png");
///
/// assert!(parse_url_record("https://example.com").is_err());
/// ```
#[tracing::instrument(level = "trace", skip(raw), fields(raw_len = raw.len()))]
pub fn parse_url_record(raw: &str) -> Result<UrlRecord, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::empty());
    }

    // Check URL length first (prevents memory issues with very long URLs)
    if trimmed.len() > MAX_URL_LENGTH {
        return Err(ParseError::too_long(trimmed));
    }

    let parsed = Url::parse(trimmed).map_err(|e| match e {
        url::ParseError::RelativeUrlWithoutBase => ParseError::no_scheme(trimmed),
        url::ParseError::EmptyHost => ParseError::no_host(trimmed),
        other => ParseError::malformed(trimmed, &other.to_string()),
    })?;

    let (authority, path) = split_authority_and_path(trimmed);
    trace!(authority, path, "split URL components");

    if authority.is_empty() || parsed.host_str().is_none_or(str::is_empty) {
        debug!(url = %trimmed, "URL has no authority");
        return Err(ParseError::no_host(trimmed));
    }
    if path.is_empty() {
        debug!(url = %trimmed, "URL has no path");
        return Err(ParseError::no_path(trimmed));
    }

    Ok(UrlRecord {
        raw: trimmed.to_string(),
        scheme: parsed.scheme().to_string(),
        authority: authority.to_string(),
        path: path.to_string(),
        url: parsed,
    })
}

/// Returns whether `raw` is a structurally valid absolute URL.
#[must_use]
pub fn is_valid_url(raw: &str) -> bool {
    parse_url_record(raw).is_ok()
}

/// Splits the text after `scheme://` into authority and path.
///
/// Returns empty strings for components that are absent in the raw text.
fn split_authority_and_path(raw: &str) -> (&str, &str) {
    let Some((_, rest)) = raw.split_once("://") else {
        return ("", "");
    };
    let authority_end = rest.find(&['/', '?', '#'][..]).unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let remainder = &rest[authority_end..];
    if !remainder.starts_with('/') {
        return (authority, "");
    }
    let path_end = remainder.find(&['?', '#'][..]).unwrap_or(remainder.len());
    (authority, &remainder[..path_end])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_record_valid_components() {
        let record = parse_url_record("https://example.com/images/cat.png").unwrap();
        assert_eq!(record.raw, "https://example.com/images/cat.png");
        assert_eq!(record.scheme, "https");
        assert_eq!(record.authority, "example.com");
        assert_eq!(record.path, "/images/cat.png");
    }

    #[test]
    fn test_parse_url_record_trims_whitespace() {
        let record = parse_url_record("  http://example.com/a.jpg \n").unwrap();
        assert_eq!(record.raw, "http://example.com/a.jpg");
    }

    #[test]
    fn test_parse_url_record_keeps_port_in_authority() {
        let record = parse_url_record("http://127.0.0.1:8080/pic.gif").unwrap();
        assert_eq!(record.authority, "127.0.0.1:8080");
        assert_eq!(record.path, "/pic.gif");
    }

    #[test]
    fn test_parse_url_record_path_excludes_query_and_fragment() {
        let record = parse_url_record("https://example.com/img.png?size=large#top").unwrap();
        assert_eq!(record.path, "/img.png");
    }

    #[test]
    fn test_parse_url_record_root_path_is_valid() {
        let record = parse_url_record("https://example.com/").unwrap();
        assert_eq!(record.path, "/");
    }

    #[test]
    fn test_parse_url_record_non_http_scheme_is_structurally_valid() {
        let record = parse_url_record("ftp://files.example.com/a.png").unwrap();
        assert_eq!(record.scheme, "ftp");
    }

    // ==================== Rejections ====================

    #[test]
    fn test_parse_url_record_rejects_missing_scheme() {
        let err = parse_url_record("example.com/image.jpg").unwrap_err();
        assert!(err.to_string().contains("no scheme"), "got: {err}");
    }

    #[test]
    fn test_parse_url_record_rejects_missing_authority() {
        assert!(parse_url_record("file:///home/user/image.png").is_err());
        assert!(parse_url_record("mailto:user@example.com").is_err());
        assert!(parse_url_record("http:///image.png").is_err());
    }

    #[test]
    fn test_parse_url_record_rejects_missing_path() {
        let err = parse_url_record("https://example.com").unwrap_err();
        assert!(err.to_string().contains("no path"), "got: {err}");
        assert!(parse_url_record("https://example.com?q=1").is_err());
    }

    #[test]
    fn test_parse_url_record_rejects_blank_line() {
        assert!(parse_url_record("").is_err());
        assert!(parse_url_record("   \t").is_err());
    }

    #[test]
    fn test_parse_url_record_rejects_garbage() {
        assert!(parse_url_record("not a url at all").is_err());
        assert!(parse_url_record("http://exa mple.com/a.png").is_err());
    }

    #[test]
    fn test_parse_url_record_rejects_too_long() {
        let long_url = format!("https://example.com/{}", "a".repeat(2100));
        let err = parse_url_record(&long_url).unwrap_err();
        assert!(matches!(err, ParseError::UrlTooLong { .. }));
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com/a.png"));
        assert!(!is_valid_url("https://example.com"));
    }

    #[test]
    fn test_split_authority_and_path() {
        assert_eq!(
            split_authority_and_path("https://host:1/p/q?x#y"),
            ("host:1", "/p/q")
        );
        assert_eq!(split_authority_and_path("https://host"), ("host", ""));
        assert_eq!(split_authority_and_path("mailto:a@b"), ("", ""));
    }
}

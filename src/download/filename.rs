//! Filename derivation and sanitization for stored images.
//!
//! Stored images are named `{sequence}_{basename}`, where the basename is the
//! final path segment of the source URL.

use std::path::{Component, Path};

use tracing::debug;
use url::Url;

use super::constants::FALLBACK_BASENAME;

/// Builds the stored filename for the `sequence`-th successful download.
///
/// When the URL path ends in `/` the basename falls back to `image` plus an
/// extension guessed from the declared content type.
#[must_use]
pub fn sequenced_filename(sequence: u64, url: &Url, content_type: Option<&str>) -> String {
    let basename = url_basename(url).unwrap_or_else(|| {
        let extension = content_type.map_or("", extension_from_content_type);
        format!("{FALLBACK_BASENAME}{extension}")
    });
    format!("{sequence}_{basename}")
}

/// Returns the percent-decoded, sanitized final path segment of `url`.
///
/// Returns `None` when the last segment is empty (path ends in `/`).
pub(crate) fn url_basename(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    if last.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(last).unwrap_or_else(|e| {
        debug!(
            segment = %last,
            error = %e,
            "URL decoding failed, using raw segment"
        );
        last.into()
    });
    Some(sanitize_filename(&decoded))
}

/// Guess file extension from an image Content-Type header.
pub(crate) fn extension_from_content_type(content_type: &str) -> &'static str {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();

    match mime.as_str() {
        "image/jpeg" | "image/jpg" | "image/pjpeg" => ".jpg",
        "image/png" => ".png",
        "image/gif" => ".gif",
        "image/webp" => ".webp",
        "image/svg+xml" => ".svg",
        "image/bmp" | "image/x-ms-bmp" => ".bmp",
        "image/tiff" => ".tiff",
        "image/x-icon" | "image/vnd.microsoft.icon" => ".ico",
        "image/avif" => ".avif",
        _ => "",
    }
}

/// Sanitizes filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        return "_".to_string();
    }

    if is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

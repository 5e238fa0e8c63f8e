//! Content-Type inspection.

use super::constants::IMAGE_MIME_TYPE;

/// Returns the lowercased primary MIME type (`image` in `image/png`).
///
/// Parameters after `;` are ignored. Returns `None` for an empty value.
#[must_use]
pub fn primary_mime_type(content_type: &str) -> Option<String> {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    let primary = essence.split('/').next().unwrap_or("").trim();
    (!primary.is_empty()).then(|| primary.to_ascii_lowercase())
}

/// Returns whether a declared content type denotes image data.
///
/// A missing header is never an image.
#[must_use]
pub fn is_image_content_type(content_type: Option<&str>) -> bool {
    content_type
        .and_then(primary_mime_type)
        .is_some_and(|primary| primary == IMAGE_MIME_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_mime_type() {
        assert_eq!(primary_mime_type("image/png").as_deref(), Some("image"));
        assert_eq!(
            primary_mime_type(" Text/HTML ; charset=utf-8").as_deref(),
            Some("text")
        );
        assert_eq!(primary_mime_type(""), None);
        assert_eq!(primary_mime_type("; charset=utf-8"), None);
    }

    #[test]
    fn test_is_image_content_type() {
        assert!(is_image_content_type(Some("image/jpeg")));
        assert!(is_image_content_type(Some("IMAGE/webp; q=0.9")));
        assert!(!is_image_content_type(Some("text/html")));
        assert!(!is_image_content_type(Some("application/octet-stream")));
        assert!(!is_image_content_type(None));
    }
}

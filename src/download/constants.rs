//! Constants for the download module (timeouts, content types).

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default total request timeout (30 seconds), covering robots.txt and image bodies.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Upper bound accepted for a configured request timeout (10 minutes).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;

/// Primary MIME type an image response must declare.
pub const IMAGE_MIME_TYPE: &str = "image";

/// Well-known path of the crawling policy file.
pub const ROBOTS_FILE: &str = "robots.txt";

/// Basename used when the URL path ends in `/`.
pub const FALLBACK_BASENAME: &str = "image";

//! Shared User-Agent string for robots.txt and image requests.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fierce/imgcrawl";

/// Default User-Agent for every request (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("imgcrawl/{version} (image-crawler; +{PROJECT_UA_URL})")
}

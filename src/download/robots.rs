//! Minimal robots.txt fetching and evaluation for polite crawling.
//!
//! Supports the `User-agent: *` group with `Allow` and `Disallow` rules.
//! Nothing is cached: every check fetches the host's robots.txt again.

use tracing::{debug, instrument};
use url::Url;

use super::client::HttpClient;
use super::constants::ROBOTS_FILE;

/// Agent name whose rule group is evaluated.
const WILDCARD_AGENT: &str = "*";

/// Checks URLs against their host's robots.txt.
///
/// One checker is owned by the crawler and reused for every URL; it shares
/// the crawler's HTTP client.
#[derive(Debug, Clone)]
pub struct RobotsChecker {
    client: HttpClient,
}

/// What a host's robots.txt says, before evaluating a particular path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotsPolicy {
    /// No policy file (or one with no applicable rules).
    AllowAll,
    /// Access to the policy file itself is forbidden (401/403).
    DisallowAll,
    /// Rules from the wildcard agent group.
    Rules(Vec<RobotsRule>),
}

/// One `Allow`/`Disallow` line from the wildcard group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotsRule {
    /// True for `Allow`, false for `Disallow`.
    pub allow: bool,
    /// Percent-encoded path prefix, starting with `/`; empty matches everything.
    pub prefix: String,
}

impl RobotsChecker {
    #[must_use]
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Returns whether robots.txt on `{scheme}://{authority}` allows `url`.
    ///
    /// A missing robots.txt allows everything. A robots.txt that cannot be
    /// fetched or read is an error, distinct from an explicit disallow.
    ///
    /// # Errors
    ///
    /// Returns `RobotsError` if scheme or authority is empty, or if the
    /// policy file cannot be fetched (network error, timeout, server error,
    /// non-text body).
    #[instrument(skip(self, url), fields(url = %url))]
    pub async fn is_allowed(
        &self,
        url: &Url,
        scheme: &str,
        authority: &str,
    ) -> Result<bool, RobotsError> {
        let robots_url = robots_url(scheme, authority)?;
        let policy = self.fetch_policy(&robots_url).await?;
        let target = request_target(url);
        let allowed = policy.allows(&target);
        if !allowed {
            debug!(target = %target, "robots.txt disallows path");
        }
        Ok(allowed)
    }

    /// Fetches and parses the policy at `robots_url`.
    ///
    /// # Errors
    ///
    /// See [`is_allowed`](Self::is_allowed).
    pub async fn fetch_policy(&self, robots_url: &str) -> Result<RobotsPolicy, RobotsError> {
        let response = self
            .client
            .inner()
            .get(robots_url)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RobotsError::Timeout(robots_url.to_string())
                } else {
                    RobotsError::Fetch(robots_url.to_string(), e)
                }
            })?;

        let status = response.status().as_u16();
        match status {
            200..=299 => {}
            401 | 403 => {
                debug!(status, "robots.txt access restricted, disallowing all");
                return Ok(RobotsPolicy::DisallowAll);
            }
            400..=499 => {
                debug!(status, "robots.txt absent, allowing all");
                return Ok(RobotsPolicy::AllowAll);
            }
            _ => return Err(RobotsError::Status(robots_url.to_string(), status)),
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RobotsError::Body(robots_url.to_string(), e))?;
        let body = std::str::from_utf8(&bytes)
            .map_err(|_| RobotsError::NotText(robots_url.to_string()))?;
        Ok(RobotsPolicy::parse(body))
    }
}

impl RobotsPolicy {
    /// Parses a robots.txt body, keeping only the wildcard agent's rules.
    ///
    /// A group without any `Disallow` rule is [`RobotsPolicy::AllowAll`].
    #[must_use]
    pub fn parse(body: &str) -> Self {
        let rules = parse_wildcard_rules(body);
        if rules.iter().all(|rule| rule.allow) {
            Self::AllowAll
        } else {
            Self::Rules(rules)
        }
    }

    /// Evaluates a request target (path plus optional query).
    ///
    /// Rules are tried in file order and the first matching prefix decides;
    /// no match means allowed. The target is compared in the same
    /// percent-encoded form as the rule paths.
    #[must_use]
    pub fn allows(&self, target: &str) -> bool {
        match self {
            Self::AllowAll => true,
            Self::DisallowAll => false,
            Self::Rules(rules) => {
                let target = normalize_percent_encoding(target);
                rules
                    .iter()
                    .find(|rule| target.starts_with(rule.prefix.as_str()))
                    .is_none_or(|rule| rule.allow)
            }
        }
    }
}

/// Builds `{scheme}://{authority}/robots.txt`.
///
/// # Errors
///
/// Returns [`RobotsError::MissingOrigin`] if either component is empty.
pub fn robots_url(scheme: &str, authority: &str) -> Result<String, RobotsError> {
    if scheme.is_empty() || authority.is_empty() {
        return Err(RobotsError::MissingOrigin);
    }
    Ok(format!("{scheme}://{authority}/{ROBOTS_FILE}"))
}

fn request_target(url: &Url) -> String {
    let path = if url.path().is_empty() { "/" } else { url.path() };
    match url.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}

/// Parses robots.txt body for the `User-agent: *` group's rules.
///
/// Consecutive `User-agent` lines form one group; the group applies when any
/// of them names `*`.
fn parse_wildcard_rules(body: &str) -> Vec<RobotsRule> {
    let mut in_star = false;
    let mut previous_was_agent = false;
    let mut rules: Vec<RobotsRule> = Vec::new();

    for line in body.lines() {
        let line = strip_comment(line).trim();
        if line.is_empty() {
            continue;
        }
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let field = field.trim().to_ascii_lowercase();
        let value = value.trim();

        if field == "user-agent" {
            let matches = value == WILDCARD_AGENT;
            in_star = if previous_was_agent {
                in_star || matches
            } else {
                matches
            };
            previous_was_agent = true;
            continue;
        }
        previous_was_agent = false;

        if !in_star {
            continue;
        }
        let allow = match field.as_str() {
            "allow" => true,
            "disallow" => false,
            _ => continue,
        };
        // An empty path matches everything and allows it, whichever field it came from.
        let prefix = normalize_rule_path(value);
        let rule = RobotsRule {
            allow: allow || prefix.is_empty(),
            prefix,
        };
        if !rules.contains(&rule) {
            rules.push(rule);
        }
    }

    rules
}

fn strip_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(before, _)| before)
}

fn normalize_rule_path(path: &str) -> String {
    let s = path.trim();
    if s.is_empty() {
        return String::new();
    }
    let mut s = s.to_string();
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    normalize_percent_encoding(&s)
}

/// Decodes then re-encodes every `/`-separated segment, so `/fotos/ä`,
/// `/fotos/%c3%a4` and `/fotos/%C3%A4` compare equal.
fn normalize_percent_encoding(path: &str) -> String {
    let decoded = urlencoding::decode(path).unwrap_or_else(|e| {
        debug!(path = %path, error = %e, "robots path decoding failed, using raw path");
        path.into()
    });
    decoded
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}

/// Errors from robots.txt checking.
#[derive(Debug, thiserror::Error)]
pub enum RobotsError {
    #[error("cannot build robots.txt URL without scheme and host")]
    MissingOrigin,
    #[error("failed to fetch {0}: {1}")]
    Fetch(String, #[source] reqwest::Error),
    #[error("timeout fetching {0}")]
    Timeout(String),
    #[error("{0} returned status {1}")]
    Status(String, u16),
    #[error("failed to read {0}: {1}")]
    Body(String, #[source] reqwest::Error),
    #[error("{0} is not a text document")]
    NotText(String),
}

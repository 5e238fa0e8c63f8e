//! Integration tests for robots.txt evaluation against a mock origin.

use imgcrawl_core::download::{HttpClient, RobotsChecker, RobotsError, RobotsPolicy};
use imgcrawl_core::parser::parse_url_record;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_robots(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body)
                .insert_header("content-type", "text/plain"),
        )
        .mount(&mock_server)
        .await;
    mock_server
}

async fn check(server: &MockServer, url_path: &str) -> Result<bool, RobotsError> {
    let record = parse_url_record(&format!("{}{url_path}", server.uri()))
        .expect("mock server URL should parse");
    RobotsChecker::new(HttpClient::new())
        .is_allowed(&record.url, &record.scheme, &record.authority)
        .await
}

#[tokio::test]
async fn test_robots_disallow_prefix_blocks_matching_paths() {
    let server = setup_robots(200, "User-agent: *\nDisallow: /private/\n").await;

    assert!(!check(&server, "/private/secret.png").await.unwrap());
    assert!(check(&server, "/public/cat.png").await.unwrap());
}

#[tokio::test]
async fn test_robots_first_matching_rule_decides() {
    let body = "User-agent: *\nDisallow: /images/\nAllow: /images/public/\n";
    let server = setup_robots(200, body).await;

    assert!(!check(&server, "/images/public/cat.png").await.unwrap());
    assert!(!check(&server, "/images/private/cat.png").await.unwrap());
    assert!(check(&server, "/cat.png").await.unwrap());

    let body = "User-agent: *\nAllow: /images/public/\nDisallow: /images/\n";
    let server = setup_robots(200, body).await;

    assert!(check(&server, "/images/public/cat.png").await.unwrap());
    assert!(!check(&server, "/images/private/cat.png").await.unwrap());
}

#[tokio::test]
async fn test_robots_non_ascii_rule_matches_encoded_url() {
    let server = setup_robots(200, "User-agent: *\nDisallow: /fotos/ä\n").await;

    assert!(!check(&server, "/fotos/ä.png").await.unwrap());
    assert!(!check(&server, "/fotos/%C3%A4.png").await.unwrap());
    assert!(check(&server, "/fotos/a.png").await.unwrap());
}

#[tokio::test]
async fn test_robots_rules_for_other_agents_ignored() {
    let body = "User-agent: BadBot\nDisallow: /\n\nUser-agent: *\nDisallow: /tmp/\n";
    let server = setup_robots(200, body).await;

    assert!(check(&server, "/cat.png").await.unwrap());
    assert!(!check(&server, "/tmp/cat.png").await.unwrap());
}

#[tokio::test]
async fn test_robots_query_is_part_of_match_target() {
    let server = setup_robots(200, "User-agent: *\nDisallow: /img?size=full\n").await;

    assert!(!check(&server, "/img?size=full").await.unwrap());
    assert!(check(&server, "/img?size=thumb").await.unwrap());
}

#[tokio::test]
async fn test_robots_missing_allows_everything() {
    let server = setup_robots(404, "not found").await;
    assert!(check(&server, "/anything/cat.png").await.unwrap());
}

#[tokio::test]
async fn test_robots_forbidden_disallows_everything() {
    let server = setup_robots(403, "forbidden").await;
    assert!(!check(&server, "/cat.png").await.unwrap());

    let server = setup_robots(401, "unauthorized").await;
    assert!(!check(&server, "/cat.png").await.unwrap());
}

#[tokio::test]
async fn test_robots_server_error_is_unreachable() {
    let server = setup_robots(503, "unavailable").await;
    let result = check(&server, "/cat.png").await;
    assert!(
        matches!(result, Err(RobotsError::Status(_, 503))),
        "expected status error, got {result:?}"
    );
}

#[tokio::test]
async fn test_robots_connection_refused_is_unreachable() {
    let record = parse_url_record("http://127.0.0.1:1/cat.png").unwrap();
    let result = RobotsChecker::new(HttpClient::new())
        .is_allowed(&record.url, &record.scheme, &record.authority)
        .await;
    assert!(
        matches!(result, Err(RobotsError::Fetch(..) | RobotsError::Timeout(_))),
        "expected fetch error, got {result:?}"
    );
}

#[tokio::test]
async fn test_fetch_policy_parses_body() {
    let server = setup_robots(200, "User-agent: *\nDisallow:\n").await;
    let policy = RobotsChecker::new(HttpClient::new())
        .fetch_policy(&format!("{}/robots.txt", server.uri()))
        .await
        .unwrap();
    assert_eq!(policy, RobotsPolicy::AllowAll);
}

//! Tests for the HTTP client module

use super::client::rate_limit_delay;
use super::*;
use crate::error::Error;
use crate::types::BackoffType;
use pretty_assertions::assert_eq;
use reqwest::header::{HeaderMap, HeaderValue};
use std::time::Duration;
use test_case::test_case;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_client(base_url: String, max_retries: u32) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(base_url)
        .max_retries(max_retries)
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(5),
            Duration::from_millis(10),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_http_client_config_default() {
    let config = HttpClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.max_retries, 2);
    assert!(config.base_url.is_none());
    assert!(config.rate_limit.is_none());
    assert!(config.user_agent.starts_with("okta-sdk-rust/"));
}

#[test]
fn test_http_client_config_builder() {
    let config = HttpClientConfig::builder()
        .base_url("https://dev-1.okta.com")
        .timeout(Duration::from_secs(60))
        .connect_timeout(Duration::from_secs(5))
        .max_retries(5)
        .backoff(
            BackoffType::Linear,
            Duration::from_millis(200),
            Duration::from_secs(30),
        )
        .rate_limit(RateLimiterConfig::per_second(4))
        .header("Accept", "application/json")
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://dev-1.okta.com".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(60));
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
    assert_eq!(config.max_retries, 5);
    assert_eq!(config.backoff_type, BackoffType::Linear);
    assert_eq!(config.rate_limit, Some(RateLimiterConfig::new(4, 4)));
    assert_eq!(
        config.default_headers.get("Accept"),
        Some(&"application/json".to_string())
    );
    assert_eq!(config.user_agent, "test-agent/1.0");
}

#[test]
fn test_request_config_builder() {
    let config = RequestConfig::new()
        .query("limit", "10")
        .query("q", "Everyone")
        .header("X-Request-Id", "abc123")
        .json(serde_json::json!({"profile": {"name": "Eng"}}))
        .timeout(Duration::from_secs(10))
        .retries(0);

    assert_eq!(
        config.query,
        vec![
            ("limit".to_string(), "10".to_string()),
            ("q".to_string(), "Everyone".to_string())
        ]
    );
    assert_eq!(
        config.headers.get("X-Request-Id"),
        Some(&"abc123".to_string())
    );
    assert!(config.body.is_some());
    assert_eq!(config.timeout, Some(Duration::from_secs(10)));
    assert_eq!(config.max_retries, Some(0));
}

// ============================================================================
// Request Descriptor Tests
// ============================================================================

#[test_case("https://dev-1.okta.com", "/api/v1/groups", "https://dev-1.okta.com/api/v1/groups" ; "root base")]
#[test_case("https://dev-1.okta.com/", "/api/v1/groups", "https://dev-1.okta.com/api/v1/groups" ; "trailing slash base")]
#[test_case("http://127.0.0.1:8080", "api/v1/users", "http://127.0.0.1:8080/api/v1/users" ; "relative without slash")]
fn test_resolve_relative_url(base: &str, uri: &str, expected: &str) {
    let base = Url::parse(base).unwrap();
    let url = HttpRequest::get(uri).resolve_url(&base).unwrap();
    assert_eq!(url.as_str(), expected);
}

#[test]
fn test_resolve_url_path_params_and_query() {
    let base = Url::parse("https://dev-1.okta.com").unwrap();
    let request = HttpRequest::get("/api/v1/groups/{groupId}/users")
        .path_param("groupId", "00g a/b")
        .query("limit", 2)
        .query_opt("after", None::<String>)
        .query_opt("q", Some("Eng & Ops"));

    let url = request.resolve_url(&base).unwrap();
    assert_eq!(
        url.as_str(),
        "https://dev-1.okta.com/api/v1/groups/00g%20a%2Fb/users?limit=2&q=Eng+%26+Ops"
    );
}

#[test]
fn test_resolve_url_missing_path_param() {
    let base = Url::parse("https://dev-1.okta.com").unwrap();
    let result = HttpRequest::get("/api/v1/users/{userId}").resolve_url(&base);
    assert!(matches!(result, Err(Error::Other(msg)) if msg.contains("userId")));
}

#[test]
fn test_follow_uses_link_verbatim() {
    let base = Url::parse("https://dev-1.okta.com").unwrap();
    let initial = HttpRequest::get("/api/v1/groups")
        .query("limit", 2)
        .header("Accept", "application/json");

    let next = initial.follow("https://dev-1.okta.com/api/v1/groups?after=00g2&limit=2");
    assert_eq!(next.method, reqwest::Method::GET);
    assert!(next.is_absolute());
    assert!(next.query.is_empty());
    assert_eq!(next.headers.get("Accept").unwrap(), "application/json");
    assert_eq!(
        next.resolve_url(&base).unwrap().as_str(),
        "https://dev-1.okta.com/api/v1/groups?after=00g2&limit=2"
    );
}

#[test_case("/api/v1/groups?after=00g2&limit=2", "https://dev-1.okta.com/api/v1/groups?after=00g2&limit=2" ; "absolute path with query")]
#[test_case("groups?after=00g2", "https://dev-1.okta.com/groups?after=00g2" ; "path relative")]
#[test_case("/api/v1/users/00u%201", "https://dev-1.okta.com/api/v1/users/00u%201" ; "encoded segment kept")]
fn test_follow_relative_link(link: &str, expected: &str) {
    let base = Url::parse("https://dev-1.okta.com").unwrap();
    let next = HttpRequest::get("/api/v1/groups")
        .query("limit", 2)
        .follow(link);

    assert!(!next.is_absolute());
    assert_eq!(next.resolve_url(&base).unwrap().as_str(), expected);
}

#[test]
fn test_request_context_headers() {
    let context = RequestContext::new()
        .with_request_id("corr-1")
        .with_forwarded_for("10.0.0.1");

    assert_eq!(
        context.headers(),
        vec![
            ("X-Request-Id", "corr-1"),
            ("X-Forwarded-For", "10.0.0.1")
        ]
    );
    assert!(RequestContext::default().headers().is_empty());
}

// ============================================================================
// Error Body Tests
// ============================================================================

#[test]
fn test_api_error_okta_body() {
    let body = r#"{
        "errorCode": "E0000001",
        "errorSummary": "Api validation failed: name",
        "errorLink": "E0000001",
        "errorId": "oaeAbc",
        "errorCauses": [{"errorSummary": "name: An object with this field already exists"}]
    }"#;

    match api_error(400, body) {
        Error::Api {
            status,
            error_code,
            error_summary,
            error_id,
            error_causes,
        } => {
            assert_eq!(status, 400);
            assert_eq!(error_code, "E0000001");
            assert_eq!(error_summary, "Api validation failed: name");
            assert_eq!(error_id.as_deref(), Some("oaeAbc"));
            assert_eq!(
                error_causes,
                vec!["name: An object with this field already exists".to_string()]
            );
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[test_case("" ; "empty body")]
#[test_case("<html>Bad Gateway</html>" ; "html body")]
#[test_case(r#"{"message": "nope"}"# ; "foreign json")]
fn test_api_error_fallback(body: &str) {
    assert!(matches!(
        api_error(502, body),
        Error::HttpStatus { status: 502, .. }
    ));
}

// ============================================================================
// Rate Limit Header Tests
// ============================================================================

#[test]
fn test_rate_limit_delay_from_reset_and_date() {
    let mut headers = HeaderMap::new();
    // 1_700_000_000 == Tue, 14 Nov 2023 22:13:20 GMT
    headers.insert("date", HeaderValue::from_static("Tue, 14 Nov 2023 22:13:20 GMT"));
    headers.insert("x-rate-limit-reset", HeaderValue::from_static("1700000005"));
    assert_eq!(rate_limit_delay(&headers), Some(Duration::from_secs(6)));
}

#[test]
fn test_rate_limit_delay_reset_in_past() {
    let mut headers = HeaderMap::new();
    headers.insert("date", HeaderValue::from_static("Tue, 14 Nov 2023 22:13:20 GMT"));
    headers.insert("x-rate-limit-reset", HeaderValue::from_static("1699999990"));
    assert_eq!(rate_limit_delay(&headers), Some(Duration::from_secs(1)));
}

#[test]
fn test_rate_limit_delay_fallbacks() {
    let mut headers = HeaderMap::new();
    assert_eq!(rate_limit_delay(&headers), None);

    headers.insert("retry-after", HeaderValue::from_static("7"));
    assert_eq!(rate_limit_delay(&headers), Some(Duration::from_secs(7)));

    // Reset without Date cannot be trusted against the local clock
    headers.insert("x-rate-limit-reset", HeaderValue::from_static("1700000005"));
    assert_eq!(rate_limit_delay(&headers), Some(Duration::from_secs(7)));
}

// ============================================================================
// Client Tests
// ============================================================================

#[tokio::test]
async fn test_http_client_get_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups/00g1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "00g1",
            "profile": {"name": "Everyone"}
        })))
        .mount(&mock_server)
        .await;

    let client = fast_client(mock_server.uri(), 0);
    let data: serde_json::Value = client.get_json("/api/v1/groups/00g1").await.unwrap();

    assert_eq!(data["profile"]["name"], "Everyone");
}

#[tokio::test]
async fn test_http_client_query_and_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param("q", "ann"))
        .and(header("Accept", "application/json"))
        .and(header("X-Request-Id", "req-456"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let config = HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .header("Accept", "application/json")
        .build();
    let client = HttpClient::with_config(config).unwrap();

    let response = client
        .get_with_config(
            "/api/v1/users",
            RequestConfig::new()
                .query("q", "ann")
                .header("X-Request-Id", "req-456"),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_ssws_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/groups"))
        .and(header("Authorization", "SSWS token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "00g9"})))
        .mount(&mock_server)
        .await;

    let client = fast_client(mock_server.uri(), 0).with_auth(crate::auth::AuthConfig::Ssws {
        token: "token-1".to_string(),
    });
    let response = client
        .post("/api/v1/groups", serde_json::json!({"profile": {"name": "x"}}))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_okta_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errorCode": "E0000007",
            "errorSummary": "Not found: Resource not found: missing (UserGroup)",
            "errorId": "oae1",
            "errorCauses": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(mock_server.uri(), 2);
    let err = client.get("/api/v1/groups/missing").await.unwrap_err();

    assert!(matches!(
        err,
        Error::Api { status: 404, ref error_code, .. } if error_code == "E0000007"
    ));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_http_client_retry_on_500() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = fast_client(mock_server.uri(), 2);
    let response = client.get("/api/v1/groups").await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_429_retry_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .insert_header("X-Okta-Request-Id", "req-throttled"),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(header("X-Okta-Retry-For", "req-throttled"))
        .and(header("X-Okta-Retry-Count", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = fast_client(mock_server.uri(), 2);
    let response = client.get("/api/v1/users").await.unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_http_client_429_exhausted() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = fast_client(mock_server.uri(), 1);
    let err = client.get("/api/v1/users").await.unwrap_err();
    assert!(matches!(err, Error::RateLimited { .. }));
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn test_http_client_full_url_ignores_base() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .and(query_param("after", "00g2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&mock_server)
        .await;

    let client = fast_client("https://unused.okta.com".to_string(), 0);
    let response = client
        .get(&format!("{}/api/v1/groups?after=00g2", mock_server.uri()))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

// ============================================================================
// Backoff Tests
// ============================================================================

fn backoff_client(backoff_type: BackoffType) -> HttpClient {
    let config = HttpClientConfig::builder()
        .backoff(
            backoff_type,
            Duration::from_millis(100),
            Duration::from_secs(1),
        )
        .build();
    HttpClient::with_config(config).unwrap()
}

#[test_case(BackoffType::Constant, 3, 100 ; "constant")]
#[test_case(BackoffType::Linear, 2, 300 ; "linear")]
#[test_case(BackoffType::Exponential, 3, 800 ; "exponential")]
#[test_case(BackoffType::Exponential, 10, 1000 ; "capped at max")]
fn test_calculate_backoff(backoff_type: BackoffType, attempt: u32, expected_ms: u64) {
    let client = backoff_client(backoff_type);
    assert_eq!(
        client.calculate_backoff(attempt),
        Duration::from_millis(expected_ms)
    );
}

#[test]
fn test_http_client_debug_hides_token() {
    let client = HttpClient::new()
        .unwrap()
        .with_auth(crate::auth::AuthConfig::Ssws {
            token: "super-secret".to_string(),
        });
    let debug = format!("{client:?}");
    assert!(debug.contains("SSWS"));
    assert!(!debug.contains("super-secret"));
    assert!(!client.has_rate_limiter());
}

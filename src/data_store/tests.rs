//! Tests for the data store module

use super::*;
use crate::error::Error;
use crate::http::HttpClientConfig;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> HttpDataStore {
    let config = HttpClientConfig::builder().max_retries(0).build();
    let client = crate::http::HttpClient::with_config(config).unwrap();
    HttpDataStore::from_org_url(&server.uri(), client).unwrap()
}

// ============================================================================
// Link Header Tests
// ============================================================================

#[test_case(r#"<https://x.okta.com/api/v1/groups?after=00g2>; rel="next""#, Some("https://x.okta.com/api/v1/groups?after=00g2") ; "single next")]
#[test_case(r#"<https://x.okta.com/a>; rel="self", <https://x.okta.com/b>; rel="next""#, Some("https://x.okta.com/b") ; "comma joined")]
#[test_case(r#"<https://x.okta.com/a>; rel="self""#, None ; "self only")]
#[test_case(r"<https://x.okta.com/c>; rel=next", Some("https://x.okta.com/c") ; "unquoted rel")]
#[test_case(r#"<https://x.okta.com/d>; rel="prev next""#, Some("https://x.okta.com/d") ; "multiple rels")]
#[test_case("", None ; "empty")]
fn test_parse_link_header(header: &str, expected: Option<&str>) {
    assert_eq!(parse_link_header(header, "next").as_deref(), expected);
}

// ============================================================================
// get_array Tests
// ============================================================================

#[tokio::test]
async fn test_get_array_with_separate_link_headers() {
    let server = MockServer::start().await;
    let next = format!("{}/api/v1/groups?after=00g2&limit=2", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .and(query_param("limit", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("Link", format!("<{}/api/v1/groups?limit=2>; rel=\"self\"", server.uri()))
                .append_header("Link", format!("<{next}>; rel=\"next\""))
                .set_body_json(json!([{"id": "00g1"}, {"id": "00g2"}])),
        )
        .mount(&server)
        .await;

    let store = store_for(&server);
    let page = store
        .get_array(
            &HttpRequest::get("/api/v1/groups").query("limit", 2),
            &RequestContext::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.items()[1]["id"], "00g2");
    assert_eq!(page.next_link(), Some(next.as_str()));
}

#[tokio::test]
async fn test_get_array_follows_relative_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .and(query_param("after", "00g2"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "00g3"}])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let request = HttpRequest::get("/api/v1/groups").follow("/api/v1/groups?after=00g2&limit=2");
    let page = store
        .get_array(&request, &RequestContext::default())
        .await
        .unwrap();

    assert_eq!(page.items()[0]["id"], "00g3");
    assert!(page.is_last());
}

#[tokio::test]
async fn test_link_to_other_origin_is_refused() {
    let server = MockServer::start().await;
    let elsewhere = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&elsewhere)
        .await;

    let store = store_for(&server);
    let request = HttpRequest::get("/api/v1/users")
        .follow(&format!("{}/api/v1/users?after=00u2", elsewhere.uri()));
    let err = store
        .get_array(&request, &RequestContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Other(ref msg) if msg.contains("outside org")));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_array_last_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let page = store
        .get_array(&HttpRequest::get("/api/v1/users"), &RequestContext::default())
        .await
        .unwrap();

    assert!(page.is_empty());
    assert!(page.is_last());
}

#[tokio::test]
async fn test_get_array_rejects_object_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "00g1"})))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store
        .get_array(&HttpRequest::get("/api/v1/groups"), &RequestContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Other(ref msg) if msg.contains("an object")));
}

#[tokio::test]
async fn test_get_array_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\": "))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store
        .get_array(&HttpRequest::get("/api/v1/groups"), &RequestContext::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::JsonParse(_)));
}

#[tokio::test]
async fn test_get_array_maps_okta_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "errorCode": "E0000006",
            "errorSummary": "You do not have permission to perform the requested action",
            "errorId": "oae403",
            "errorCauses": []
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let err = store
        .get_array(&HttpRequest::get("/api/v1/groups"), &RequestContext::default())
        .await
        .unwrap_err();

    match err {
        Error::Api {
            status, error_code, ..
        } => {
            assert_eq!(status, 403);
            assert_eq!(error_code, "E0000006");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_request_context_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups/00g1/users"))
        .and(header("X-Request-Id", "corr-42"))
        .and(header("X-Forwarded-For", "203.0.113.9"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    let request = HttpRequest::get("/api/v1/groups/{groupId}/users")
        .path_param("groupId", "00g1")
        .header("Accept", "application/json");
    let context = RequestContext::new()
        .with_request_id("corr-42")
        .with_forwarded_for("203.0.113.9");

    store.get_array(&request, &context).await.unwrap();
}

// ============================================================================
// send Tests
// ============================================================================

#[tokio::test]
async fn test_send_with_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/groups"))
        .and(body_json(json!({"profile": {"name": "Engineering"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "00gNew",
            "profile": {"name": "Engineering"}
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let created = store
        .send(
            &HttpRequest::post("/api/v1/groups").json(json!({"profile": {"name": "Engineering"}})),
            &RequestContext::default(),
        )
        .await
        .unwrap();

    assert_eq!(created.unwrap()["id"], "00gNew");
}

#[tokio::test]
async fn test_send_no_content() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/groups/00g1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let result = store
        .send(
            &HttpRequest::delete("/api/v1/groups/{groupId}").path_param("groupId", "00g1"),
            &RequestContext::default(),
        )
        .await
        .unwrap();

    assert_eq!(result, None);
}

#[tokio::test]
async fn test_send_empty_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/groups/00g1/users/00u1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let result = store
        .send(
            &HttpRequest::put("/api/v1/groups/{groupId}/users/{userId}")
                .path_param("groupId", "00g1")
                .path_param("userId", "00u1"),
            &RequestContext::default(),
        )
        .await
        .unwrap();

    assert!(result.is_none());
}

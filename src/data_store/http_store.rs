//! [`DataStore`] backed by [`HttpClient`]

use super::DataStore;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpRequest, RequestConfig, RequestContext};
use crate::pagination::Page;
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, LINK};
use reqwest::{Response, StatusCode};
use tracing::trace;
use url::Url;

/// Data store that talks to an Okta org over HTTP
#[derive(Debug)]
pub struct HttpDataStore {
    org_url: Url,
    client: HttpClient,
}

impl HttpDataStore {
    /// Create a data store for the given org
    pub fn new(org_url: Url, client: HttpClient) -> Self {
        Self { org_url, client }
    }

    /// Parse the org URL and create a data store
    pub fn from_org_url(org_url: &str, client: HttpClient) -> Result<Self> {
        Ok(Self::new(Url::parse(org_url)?, client))
    }

    pub fn org_url(&self) -> &Url {
        &self.org_url
    }

    pub fn http_client(&self) -> &HttpClient {
        &self.client
    }

    async fn execute(&self, request: &HttpRequest, context: &RequestContext) -> Result<Response> {
        let url = request.resolve_url(&self.org_url)?;
        if url.origin() != self.org_url.origin() {
            return Err(Error::Other(format!(
                "Refusing to send credentials to {}, outside org {}",
                url.origin().ascii_serialization(),
                self.org_url.origin().ascii_serialization()
            )));
        }

        let mut config = RequestConfig::new();
        for (key, value) in &request.headers {
            config = config.header(key.as_str(), value.as_str());
        }
        for (key, value) in context.headers() {
            config = config.header(key, value);
        }
        if let Some(ref payload) = request.payload {
            config = config.json(payload.clone());
        }

        trace!("{} {}", request.method, url);
        self.client
            .request(request.method.clone(), url.as_str(), config)
            .await
    }
}

#[async_trait]
impl DataStore for HttpDataStore {
    async fn get_array(
        &self,
        request: &HttpRequest,
        context: &RequestContext,
    ) -> Result<Page<JsonValue>> {
        let response = self.execute(request, context).await?;
        let next = next_link(response.headers());
        let body = response.text().await?;

        match serde_json::from_str::<JsonValue>(&body)? {
            JsonValue::Array(items) => Ok(Page::new(items, next)),
            other => Err(Error::Other(format!(
                "Expected a JSON array from {}, got {}",
                request.uri,
                json_kind(&other)
            ))),
        }
    }

    async fn send(
        &self,
        request: &HttpRequest,
        context: &RequestContext,
    ) -> Result<Option<JsonValue>> {
        let response = self.execute(request, context).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&body)?))
    }
}

/// Find the `rel="next"` link across every `Link` header of a response
fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| parse_link_header(value, "next"))
}

/// Parse a Link header and extract the URL for the given rel.
///
/// Format: `<url>; rel="next", <url>; rel="self"`. A `rel` may list several
/// space separated relation types.
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    for part in header.split(',') {
        let mut url = None;
        let mut rels = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if let Some(inner) = segment.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
                url = Some(inner);
            } else if let Some(value) = segment.strip_prefix("rel=") {
                rels = Some(value.trim_matches('"').trim_matches('\''));
            }
        }

        if let (Some(u), Some(r)) = (url, rels) {
            if r.split_whitespace().any(|rel| rel.eq_ignore_ascii_case(target_rel)) {
                return Some(u.to_string());
            }
        }
    }

    None
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

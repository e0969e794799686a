//! Request descriptors
//!
//! `HttpRequest` describes one API call independently of the transport, and
//! `RequestContext` carries per-call metadata that ends up as extra headers.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::Method;
use std::collections::BTreeMap;
use url::Url;

/// A transport-independent description of an API request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,
    /// Path template relative to the org URL (e.g. `/api/v1/groups/{groupId}`)
    /// or a continuation link (absolute or relative URI reference)
    pub uri: String,
    /// Values substituted for `{name}` segments in `uri`
    pub path_params: BTreeMap<String, String>,
    /// Query parameters, in insertion order
    pub query: Vec<(String, String)>,
    /// Request-specific headers
    pub headers: BTreeMap<String, String>,
    /// JSON payload
    pub payload: Option<JsonValue>,
    /// `uri` is a continuation link, resolved as a URI reference rather than
    /// a path template
    pub continuation: bool,
}

impl HttpRequest {
    /// Create a request with the given method and URI
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            path_params: BTreeMap::new(),
            query: Vec::new(),
            headers: BTreeMap::new(),
            payload: None,
            continuation: false,
        }
    }

    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: impl Into<String>) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn put(uri: impl Into<String>) -> Self {
        Self::new(Method::PUT, uri)
    }

    pub fn delete(uri: impl Into<String>) -> Self {
        Self::new(Method::DELETE, uri)
    }

    /// Bind a path parameter
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present
    #[must_use]
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON payload
    #[must_use]
    pub fn json(mut self, payload: JsonValue) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Build the GET that fetches the page behind a continuation link.
    ///
    /// The link already encodes every query parameter, so only the headers
    /// of this request are carried over. Absolute and relative links are
    /// both accepted; relative ones resolve against the org URL.
    pub fn follow(&self, next_link: &str) -> Self {
        Self {
            method: Method::GET,
            uri: next_link.to_string(),
            path_params: BTreeMap::new(),
            query: Vec::new(),
            headers: self.headers.clone(),
            payload: None,
            continuation: true,
        }
    }

    /// Whether `uri` is already an absolute URL
    pub fn is_absolute(&self) -> bool {
        self.uri.starts_with("http://") || self.uri.starts_with("https://")
    }

    /// Resolve the final URL against the org base URL
    pub fn resolve_url(&self, base: &Url) -> Result<Url> {
        let mut url = if self.continuation {
            base.join(&self.uri)?
        } else if self.is_absolute() {
            Url::parse(&self.uri)?
        } else {
            let mut url = base.clone();
            {
                let mut segments = url
                    .path_segments_mut()
                    .map_err(|()| Error::config(format!("'{base}' cannot be used as a base URL")))?;
                segments.pop_if_empty();
                for segment in self.uri.trim_start_matches('/').split('/') {
                    match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                        Some(name) => {
                            let value = self.path_params.get(name).ok_or_else(|| {
                                Error::Other(format!("Missing path parameter '{name}'"))
                            })?;
                            segments.push(value);
                        }
                        None => {
                            segments.push(segment);
                        }
                    }
                }
            }
            url
        };

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }
}

/// Cross-cutting metadata attached to every request of one logical call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation id, sent as `X-Request-Id`
    pub request_id: Option<String>,
    /// Overrides the client's `User-Agent`
    pub user_agent: Option<String>,
    /// Sent as `X-Forwarded-For`
    pub x_forwarded_for: Option<String>,
    /// Sent as `X-Forwarded-Proto`
    pub x_forwarded_proto: Option<String>,
    /// Sent as `X-Forwarded-Port`
    pub x_forwarded_port: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the correlation id
    #[must_use]
    pub fn with_request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Set the user agent override
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the forwarded-for chain
    #[must_use]
    pub fn with_forwarded_for(mut self, value: impl Into<String>) -> Self {
        self.x_forwarded_for = Some(value.into());
        self
    }

    /// Headers contributed by this context
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        [
            ("X-Request-Id", &self.request_id),
            ("User-Agent", &self.user_agent),
            ("X-Forwarded-For", &self.x_forwarded_for),
            ("X-Forwarded-Proto", &self.x_forwarded_proto),
            ("X-Forwarded-Port", &self.x_forwarded_port),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (name, v)))
        .collect()
    }
}

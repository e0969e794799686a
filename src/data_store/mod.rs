//! Data store module
//!
//! The data store performs requests described by [`HttpRequest`] and parses
//! the responses. Enumerators and resource clients only talk to the
//! [`DataStore`] trait, so tests and alternate transports can plug in their
//! own implementation.

mod http_store;

pub use http_store::{parse_link_header, HttpDataStore};

use crate::error::Result;
use crate::http::{HttpRequest, RequestContext};
use crate::pagination::Page;
use crate::types::JsonValue;
use async_trait::async_trait;

/// Executes API requests on behalf of resource clients and enumerators
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Fetch one page of a collection.
    ///
    /// The response body must be a JSON array; the continuation reference is
    /// taken from the response's `rel="next"` link.
    async fn get_array(
        &self,
        request: &HttpRequest,
        context: &RequestContext,
    ) -> Result<Page<JsonValue>>;

    /// Send a request for a single resource. Returns `None` when the server
    /// answers without a body (e.g. `204 No Content`).
    async fn send(
        &self,
        request: &HttpRequest,
        context: &RequestContext,
    ) -> Result<Option<JsonValue>>;
}

#[cfg(test)]
mod tests;

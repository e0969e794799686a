//! HTTP client module
//!
//! Provides the transport used to talk to an Okta org.
//!
//! # Features
//!
//! - **Request descriptors**: `HttpRequest` + `RequestContext`, independent of reqwest
//! - **Automatic Retries**: Okta `429` handling driven by `X-Rate-Limit-Reset`
//! - **Throttling**: Token bucket rate limiter using governor
//! - **Authentication**: Integration with auth module

mod client;
mod rate_limit;
mod request;

pub use client::{api_error, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use request::{HttpRequest, RequestContext};

#[cfg(test)]
mod tests;

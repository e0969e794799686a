//! Authentication module
//!
//! Supports: SSWS API token, Bearer access token, OAuth 2.0 private key JWT
//!
//! The `Authenticator` applies credentials to outgoing requests and caches
//! the access token obtained through the private key flow.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{AuthConfig, CachedToken};

//! Auth configuration types
//!
//! These types represent the runtime auth configuration after the client
//! configuration has been resolved and validated.

use crate::types::JwtAlgorithm;
use chrono::{DateTime, Utc};

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication (useful against local mocks)
    #[default]
    None,

    /// Okta API token
    Ssws {
        /// The API token value
        token: String,
    },

    /// Bearer access token
    Bearer {
        /// The access token
        token: String,
    },

    /// OAuth 2.0 client credentials with a signed JWT client assertion
    PrivateKey {
        /// Org token endpoint, e.g. `https://dev-1.okta.com/oauth2/v1/token`
        token_url: String,
        /// OAuth service app client ID
        client_id: String,
        /// Requested scopes, e.g. `okta.groups.read`
        scopes: Vec<String>,
        /// Private key (PEM format)
        private_key: String,
        /// Signing algorithm
        algorithm: JwtAlgorithm,
        /// Optional `kid` header value
        key_id: Option<String>,
    },
}

impl AuthConfig {
    /// Short name of the scheme, safe to log
    pub fn scheme(&self) -> &'static str {
        match self {
            AuthConfig::None => "none",
            AuthConfig::Ssws { .. } => "SSWS",
            AuthConfig::Bearer { .. } => "Bearer",
            AuthConfig::PrivateKey { .. } => "PrivateKey",
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::PrivateKey {
                token_url,
                client_id,
                scopes,
                algorithm,
                key_id,
                ..
            } => f
                .debug_struct("PrivateKey")
                .field("token_url", token_url)
                .field("client_id", client_id)
                .field("scopes", scopes)
                .field("algorithm", algorithm)
                .field("key_id", key_id)
                .finish_non_exhaustive(),
            other => write!(f, "{}", other.scheme()),
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = Utc::now() + chrono::Duration::seconds(seconds);
        Self {
            token,
            expires_at: Some(expires_at),
        }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false,
        }
    }
}

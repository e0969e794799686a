//! Authenticator implementation
//!
//! Handles applying authentication to requests and managing token refresh.

use super::types::{AuthConfig, CachedToken};
use crate::error::{Error, Result};
use crate::types::JwtAlgorithm;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

const CLIENT_ASSERTION_TYPE: &str = "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";
const ASSERTION_LIFETIME_SECONDS: i64 = 3600;

static ASSERTION_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// Cached access token for the private key flow
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
}

impl Authenticator {
    /// Create a new authenticator with the given config
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(config: AuthConfig, http_client: Client) -> Self {
        Self {
            config,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
        }
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        match &self.config {
            AuthConfig::None => Ok(req),
            AuthConfig::Ssws { token } => Ok(req.header("Authorization", format!("SSWS {token}"))),
            AuthConfig::Bearer { token } => Ok(req.bearer_auth(token)),
            AuthConfig::PrivateKey { .. } => {
                let token = self.get_or_refresh_token().await?;
                Ok(req.bearer_auth(token))
            }
        }
    }

    /// Get a valid token, refreshing if necessary
    async fn get_or_refresh_token(&self) -> Result<String> {
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Another task may have refreshed while we waited for the write lock
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_new_token().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Exchange a signed client assertion for an access token
    async fn fetch_new_token(&self) -> Result<CachedToken> {
        let AuthConfig::PrivateKey {
            token_url,
            client_id,
            scopes,
            private_key,
            algorithm,
            key_id,
        } = &self.config
        else {
            return Err(Error::auth(
                "Token refresh not supported for this auth type",
            ));
        };

        let assertion = build_client_assertion(
            client_id,
            token_url,
            private_key,
            *algorithm,
            key_id.as_deref(),
        )?;

        let form = [
            ("grant_type", "client_credentials".to_string()),
            ("scope", scopes.join(" ")),
            ("client_assertion_type", CLIENT_ASSERTION_TYPE.to_string()),
            ("client_assertion", assertion),
        ];

        debug!("Requesting access token from {token_url}");
        let response = self
            .http_client
            .post(token_url)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::TokenRequest {
                message: format!("Token request failed with status {status}: {body}"),
            });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(token_response.into_cached_token())
    }

    /// Clear the cached token, forcing a new token request on next use
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("scheme", &self.config.scheme())
            .finish_non_exhaustive()
    }
}

/// Sign the JWT used as `client_assertion` in the client credentials grant
pub(crate) fn build_client_assertion(
    client_id: &str,
    token_url: &str,
    private_key: &str,
    algorithm: JwtAlgorithm,
    key_id: Option<&str>,
) -> Result<String> {
    let now = Utc::now();
    let iat = now.timestamp();
    let sequence = ASSERTION_COUNTER.fetch_add(1, Ordering::Relaxed);

    let claims = AssertionClaims {
        iss: client_id.to_string(),
        sub: client_id.to_string(),
        aud: token_url.to_string(),
        iat,
        exp: iat + ASSERTION_LIFETIME_SECONDS,
        jti: format!(
            "{client_id}-{}-{sequence}",
            now.timestamp_nanos_opt().unwrap_or(iat)
        ),
    };

    let mut header = Header::new(algorithm.into());
    header.kid = key_id.map(String::from);

    let encoding_key = if algorithm.is_rsa() {
        EncodingKey::from_rsa_pem(private_key.as_bytes())
    } else {
        EncodingKey::from_ec_pem(private_key.as_bytes())
    }
    .map_err(|e| Error::JwtGeneration {
        message: format!("Invalid private key: {e}"),
    })?;

    encode(&header, &claims, &encoding_key).map_err(|e| Error::JwtGeneration {
        message: format!("Failed to encode JWT: {e}"),
    })
}

/// OAuth2 token response
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_cached_token(self) -> CachedToken {
        match self.expires_in {
            Some(secs) => CachedToken::expires_in(self.access_token, secs),
            None => CachedToken::new(self.access_token, None),
        }
    }
}

/// Client assertion claims
#[derive(Debug, Serialize)]
struct AssertionClaims {
    iss: String,
    sub: String,
    aud: String,
    iat: i64,
    exp: i64,
    jti: String,
}

//! Client configuration
//!
//! Settings are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. `~/.okta/okta.yaml`
//! 3. `./okta.yaml`
//! 4. `OKTA_CLIENT_*` environment variables
//! 5. Explicit values set in code (or on the command line)
//!
//! The YAML files use the layout shared by all Okta SDKs:
//!
//! ```yaml
//! okta:
//!   client:
//!     orgUrl: "https://dev-123456.okta.com"
//!     token: "00abc..."
//!     connectionTimeout: 30
//!     rateLimit:
//!       maxRetries: 4
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::types::{AuthorizationMode, JwtAlgorithm, OptionStringExt};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// File name looked up in the home `.okta` directory and the working directory
pub const CONFIG_FILE_NAME: &str = "okta.yaml";

const REDACTED: &str = "****";

// ============================================================================
// Client Config
// ============================================================================

/// Resolved settings for an [`OktaClient`](crate::client::OktaClient)
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Org URL, e.g. `https://dev-123456.okta.com`
    pub org_url: Option<String>,

    /// API token for SSWS, or the access token for Bearer
    pub token: Option<String>,

    pub authorization_mode: AuthorizationMode,

    /// Service app client ID (PrivateKey mode)
    pub client_id: Option<String>,

    /// Requested OAuth scopes (PrivateKey mode)
    pub scopes: Vec<String>,

    /// PEM private key, or a path to a PEM file (PrivateKey mode)
    pub private_key: Option<String>,

    /// `kid` of the registered public key (PrivateKey mode)
    pub key_id: Option<String>,

    pub connection_timeout_secs: u64,

    pub request_timeout_secs: u64,

    /// Retries for rate limited and failed requests
    pub max_retries: u32,

    /// Client-side throttle, disabled when `None`
    pub rate_limit_per_second: Option<u32>,

    /// Allow plain `http://` org URLs (local mocks)
    pub disable_https_check: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            org_url: None,
            token: None,
            authorization_mode: AuthorizationMode::Ssws,
            client_id: None,
            scopes: Vec::new(),
            private_key: None,
            key_id: None,
            connection_timeout_secs: 30,
            request_timeout_secs: 30,
            max_retries: 2,
            rate_limit_per_second: None,
            disable_https_check: false,
        }
    }
}

impl ClientConfig {
    /// Load from the default files and the process environment
    pub fn load() -> Result<Self> {
        let mut files = Vec::new();
        if let Some(home) = home_config_path() {
            files.push(home);
        }
        files.push(PathBuf::from(CONFIG_FILE_NAME));

        Self::load_from(&files, |name| std::env::var(name).ok())
    }

    /// Load from the given files (missing ones are skipped) and an
    /// environment lookup
    pub fn load_from<F>(files: &[PathBuf], env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        for path in files {
            config.merge_file(path)?;
        }
        config.merge_env(env)?;
        Ok(config)
    }

    /// Overlay the values of a YAML config file, if it exists
    pub fn merge_file(&mut self, path: &Path) -> Result<()> {
        if !path.is_file() {
            return Ok(());
        }
        debug!("Loading Okta configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        self.merge_yaml(&content)
    }

    /// Overlay the values of a YAML document
    pub fn merge_yaml(&mut self, content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Ok(());
        }
        let file: ConfigFile = serde_yaml::from_str(content)?;
        let Some(client) = file.okta.and_then(|okta| okta.client) else {
            return Ok(());
        };

        overlay(&mut self.org_url, client.org_url);
        overlay(&mut self.token, client.token);
        overlay(&mut self.client_id, client.client_id);
        overlay(&mut self.private_key, client.private_key);
        overlay(&mut self.key_id, client.key_id);

        if let Some(mode) = client.authorization_mode {
            self.authorization_mode = mode
                .parse()
                .map_err(|e: String| Error::invalid_value("okta.client.authorizationMode", e))?;
        }
        if let Some(scopes) = client.scopes {
            self.scopes = scopes.into_vec();
        }
        if let Some(secs) = client.connection_timeout {
            self.connection_timeout_secs = secs;
        }
        if let Some(secs) = client.request_timeout {
            self.request_timeout_secs = secs;
        }
        if let Some(rate_limit) = client.rate_limit {
            if let Some(retries) = rate_limit.max_retries {
                self.max_retries = retries;
            }
            if let Some(per_second) = rate_limit.per_second {
                self.rate_limit_per_second = Some(per_second);
            }
        }
        if let Some(disable) = client.disable_https_check {
            self.disable_https_check = disable;
        }
        Ok(())
    }

    /// Overlay `OKTA_CLIENT_*` variables
    pub fn merge_env<F>(&mut self, env: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| env(name).none_if_empty();

        overlay(&mut self.org_url, get("OKTA_CLIENT_ORGURL"));
        overlay(&mut self.token, get("OKTA_CLIENT_TOKEN"));
        overlay(&mut self.client_id, get("OKTA_CLIENT_CLIENTID"));
        overlay(&mut self.private_key, get("OKTA_CLIENT_PRIVATEKEY"));
        overlay(&mut self.key_id, get("OKTA_CLIENT_KEYID"));

        if let Some(mode) = get("OKTA_CLIENT_AUTHORIZATIONMODE") {
            self.authorization_mode = mode
                .parse()
                .map_err(|e: String| Error::invalid_value("OKTA_CLIENT_AUTHORIZATIONMODE", e))?;
        }
        if let Some(scopes) = get("OKTA_CLIENT_SCOPES") {
            self.scopes = split_scopes(&scopes);
        }
        if let Some(value) = get("OKTA_CLIENT_CONNECTIONTIMEOUT") {
            self.connection_timeout_secs = parse_number("OKTA_CLIENT_CONNECTIONTIMEOUT", &value)?;
        }
        if let Some(value) = get("OKTA_CLIENT_REQUESTTIMEOUT") {
            self.request_timeout_secs = parse_number("OKTA_CLIENT_REQUESTTIMEOUT", &value)?;
        }
        if let Some(value) = get("OKTA_CLIENT_RATELIMIT_MAXRETRIES") {
            self.max_retries = parse_number("OKTA_CLIENT_RATELIMIT_MAXRETRIES", &value)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Explicit overrides
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn with_org_url(mut self, org_url: impl Into<String>) -> Self {
        self.org_url = Some(org_url.into());
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_authorization_mode(mut self, mode: AuthorizationMode) -> Self {
        self.authorization_mode = mode;
        self
    }

    #[must_use]
    pub fn with_private_key(
        mut self,
        client_id: impl Into<String>,
        scopes: Vec<String>,
        private_key: impl Into<String>,
    ) -> Self {
        self.authorization_mode = AuthorizationMode::PrivateKey;
        self.client_id = Some(client_id.into());
        self.scopes = scopes;
        self.private_key = Some(private_key.into());
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, per_second: u32) -> Self {
        self.rate_limit_per_second = Some(per_second);
        self
    }

    #[must_use]
    pub fn with_https_check_disabled(mut self) -> Self {
        self.disable_https_check = true;
        self
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Check that the settings are usable, returning the parsed org URL
    pub fn validate(&self) -> Result<Url> {
        let org_url = self.validate_org_url()?;

        match self.authorization_mode {
            AuthorizationMode::Ssws => {
                let token = self
                    .token
                    .as_deref()
                    .ok_or_else(|| Error::missing_field("okta.client.token"))?;
                if token.contains("{apiToken}") {
                    return Err(Error::invalid_value(
                        "okta.client.token",
                        "replace {apiToken} with your Okta API token",
                    ));
                }
            }
            AuthorizationMode::Bearer => {
                self.token
                    .as_deref()
                    .ok_or_else(|| Error::missing_field("okta.client.token"))?;
            }
            AuthorizationMode::PrivateKey => {
                if self.client_id.is_none() {
                    return Err(Error::missing_field("okta.client.clientId"));
                }
                if self.scopes.is_empty() {
                    return Err(Error::missing_field("okta.client.scopes"));
                }
                if self.private_key.is_none() {
                    return Err(Error::missing_field("okta.client.privateKey"));
                }
            }
        }

        Ok(org_url)
    }

    fn validate_org_url(&self) -> Result<Url> {
        const FIELD: &str = "okta.client.orgUrl";

        let raw = self
            .org_url
            .as_deref()
            .ok_or_else(|| Error::missing_field(FIELD))?;

        if raw.contains("{yourOktaDomain}") {
            return Err(Error::invalid_value(
                FIELD,
                "replace {yourOktaDomain} with your Okta domain",
            ));
        }
        if !self.disable_https_check && !raw.starts_with("https://") {
            return Err(Error::invalid_value(
                FIELD,
                format!("'{raw}' must start with https://"),
            ));
        }
        if raw.contains("-admin.") {
            return Err(Error::invalid_value(
                FIELD,
                "use your org URL, not the admin console URL (remove -admin)",
            ));
        }
        if raw.contains(".com.com") {
            return Err(Error::invalid_value(FIELD, "contains '.com.com'"));
        }

        Ok(Url::parse(raw)?)
    }

    // ------------------------------------------------------------------------
    // Bridges
    // ------------------------------------------------------------------------

    /// Transport settings for [`HttpClient`](crate::http::HttpClient)
    pub fn to_http_client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .connect_timeout(Duration::from_secs(self.connection_timeout_secs))
            .max_retries(self.max_retries)
            .header("Accept", "application/json");

        if let Some(ref org_url) = self.org_url {
            builder = builder.base_url(org_url.as_str());
        }
        if let Some(per_second) = self.rate_limit_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(per_second));
        }
        builder.build()
    }

    /// Credentials for the configured authorization mode
    pub fn to_auth_config(&self) -> Result<AuthConfig> {
        match self.authorization_mode {
            AuthorizationMode::Ssws => Ok(AuthConfig::Ssws {
                token: self.require(&self.token, "okta.client.token")?,
            }),
            AuthorizationMode::Bearer => Ok(AuthConfig::Bearer {
                token: self.require(&self.token, "okta.client.token")?,
            }),
            AuthorizationMode::PrivateKey => {
                let org_url = self.require(&self.org_url, "okta.client.orgUrl")?;
                let private_key =
                    load_private_key(&self.require(&self.private_key, "okta.client.privateKey")?)?;
                let algorithm = if private_key.contains("BEGIN EC PRIVATE KEY") {
                    JwtAlgorithm::ES256
                } else {
                    JwtAlgorithm::RS256
                };

                Ok(AuthConfig::PrivateKey {
                    token_url: format!("{}/oauth2/v1/token", org_url.trim_end_matches('/')),
                    client_id: self.require(&self.client_id, "okta.client.clientId")?,
                    scopes: self.scopes.clone(),
                    private_key,
                    algorithm,
                    key_id: self.key_id.clone(),
                })
            }
        }
    }

    fn require(&self, value: &Option<String>, field: &str) -> Result<String> {
        value.clone().ok_or_else(|| Error::missing_field(field))
    }

    /// Copy with secrets masked, suitable for display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.token.is_some() {
            copy.token = Some(REDACTED.to_string());
        }
        if copy.private_key.is_some() {
            copy.private_key = Some(REDACTED.to_string());
        }
        copy
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let masked = |v: &Option<String>| v.as_ref().map(|_| REDACTED);
        f.debug_struct("ClientConfig")
            .field("org_url", &self.org_url)
            .field("token", &masked(&self.token))
            .field("authorization_mode", &self.authorization_mode)
            .field("client_id", &self.client_id)
            .field("scopes", &self.scopes)
            .field("private_key", &masked(&self.private_key))
            .field("key_id", &self.key_id)
            .field("connection_timeout_secs", &self.connection_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("rate_limit_per_second", &self.rate_limit_per_second)
            .field("disable_https_check", &self.disable_https_check)
            .finish()
    }
}

/// `~/.okta/okta.yaml`
pub fn home_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".okta").join(CONFIG_FILE_NAME))
}

// ============================================================================
// YAML file layout
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    okta: Option<OktaSection>,
}

#[derive(Debug, Default, Deserialize)]
struct OktaSection {
    #[serde(default)]
    client: Option<ClientSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientSection {
    org_url: Option<String>,
    token: Option<String>,
    authorization_mode: Option<String>,
    client_id: Option<String>,
    scopes: Option<Scopes>,
    private_key: Option<String>,
    key_id: Option<String>,
    connection_timeout: Option<u64>,
    request_timeout: Option<u64>,
    rate_limit: Option<RateLimitSection>,
    disable_https_check: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateLimitSection {
    max_retries: Option<u32>,
    per_second: Option<u32>,
}

/// Scopes may be a YAML list or a comma/space separated string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scopes {
    List(Vec<String>),
    Joined(String),
}

impl Scopes {
    fn into_vec(self) -> Vec<String> {
        match self {
            Scopes::List(list) => list,
            Scopes::Joined(joined) => split_scopes(&joined),
        }
    }
}

fn split_scopes(value: &str) -> Vec<String> {
    value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn overlay(target: &mut Option<String>, value: Option<String>) {
    if let Some(v) = value.none_if_empty() {
        *target = Some(v);
    }
}

fn parse_number<N: std::str::FromStr>(field: &str, value: &str) -> Result<N> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_value(field, format!("'{value}' is not a valid number")))
}

/// Inline PEM is used as-is; anything else is read as a file path
fn load_private_key(value: &str) -> Result<String> {
    if value.trim_start().starts_with("-----BEGIN") {
        return Ok(value.to_string());
    }
    std::fs::read_to_string(value).map_err(|e| {
        Error::invalid_value(
            "okta.client.privateKey",
            format!("cannot read key file '{value}': {e}"),
        )
    })
}

//! Okta API client
//!
//! [`OktaClient`] is the entry point. It owns the data store shared by every
//! sub-client and every collection enumerator created from it.
//!
//! ```rust,ignore
//! use okta_sdk::client::{ListGroupsOptions, OktaClient};
//! use okta_sdk::config::ClientConfig;
//!
//! let client = OktaClient::new(ClientConfig::load()?)?;
//! let mut groups = client
//!     .groups()
//!     .list_groups(ListGroupsOptions::default())
//!     .enumerate(CancellationToken::new());
//! while groups.move_next().await? {
//!     println!("{:?}", groups.current());
//! }
//! ```

mod groups;
mod users;

pub use groups::{GroupsClient, ListGroupsOptions};
pub use users::{ListUsersOptions, UsersClient};

use crate::config::ClientConfig;
use crate::data_store::{DataStore, HttpDataStore};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpRequest, RequestContext};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::info;

/// Root client for an Okta org
#[derive(Clone)]
pub struct OktaClient {
    data_store: Arc<dyn DataStore>,
    context: RequestContext,
}

impl OktaClient {
    /// Build a client talking to the org named in `config`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let org_url = config.validate()?;
        let http = HttpClient::with_config(config.to_http_client_config())?
            .with_auth(config.to_auth_config()?);

        info!(
            "Okta client for {} ({})",
            org_url,
            config.authorization_mode
        );

        Ok(Self::with_data_store(Arc::new(HttpDataStore::new(
            org_url, http,
        ))))
    }

    /// Build a client from `~/.okta/okta.yaml`, `./okta.yaml` and the
    /// environment
    pub fn from_environment() -> Result<Self> {
        Self::new(ClientConfig::load()?)
    }

    /// Build a client on top of any data store
    pub fn with_data_store(data_store: Arc<dyn DataStore>) -> Self {
        Self {
            data_store,
            context: RequestContext::default(),
        }
    }

    /// Attach request metadata sent with every call made through this client
    #[must_use]
    pub fn with_request_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    pub fn data_store(&self) -> &Arc<dyn DataStore> {
        &self.data_store
    }

    pub fn request_context(&self) -> &RequestContext {
        &self.context
    }

    pub fn groups(&self) -> GroupsClient {
        GroupsClient::new(Arc::clone(&self.data_store), self.context.clone())
    }

    pub fn users(&self) -> UsersClient {
        UsersClient::new(Arc::clone(&self.data_store), self.context.clone())
    }
}

impl std::fmt::Debug for OktaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OktaClient")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Send a request whose response body is a single resource
async fn send_for<R: DeserializeOwned>(
    data_store: &dyn DataStore,
    request: &HttpRequest,
    context: &RequestContext,
) -> Result<R> {
    let body = data_store
        .send(request, context)
        .await?
        .ok_or_else(|| {
            Error::Other(format!(
                "Expected a response body from {} {}",
                request.method, request.uri
            ))
        })?;
    Ok(serde_json::from_value(body)?)
}

/// Send a request whose response body, if any, is ignored
async fn send_empty(
    data_store: &dyn DataStore,
    request: &HttpRequest,
    context: &RequestContext,
) -> Result<()> {
    data_store.send(request, context).await?;
    Ok(())
}

// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Okta SDK
//!
//! An async Rust client for the Okta management API.
//!
//! ## Features
//!
//! - **Lazy collections**: Iterate groups and users across pages as a single
//!   sequence; the next page is fetched only when the current one runs out
//! - **Authentication**: SSWS API token, Bearer token, OAuth 2.0 private key JWT
//! - **Rate limits**: Okta `429` responses are retried after the reset window
//! - **Configuration**: `okta.yaml` files and `OKTA_CLIENT_*` variables
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use okta_sdk::client::{ListUsersOptions, OktaClient};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> okta_sdk::Result<()> {
//!     let client = OktaClient::from_environment()?;
//!
//!     let mut users = client
//!         .users()
//!         .list_users(ListUsersOptions::default())
//!         .enumerate(CancellationToken::new());
//!
//!     while users.move_next().await? {
//!         if let Some(user) = users.current() {
//!             println!("{:?}", user.profile().and_then(|p| p.login().map(String::from)));
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  OktaClient → GroupsClient / UsersClient                 │
//! │  list_*() → CollectionClient<T> → enumerate() / stream() │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//! ┌───────────────────────────┴──────────────────────────────┐
//! │ CollectionAsyncEnumerator<T>   (one item at a time)      │
//! │   └─ PagedCollectionEnumerator<T>   (one page at a time) │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//! ┌──────────────┬────────────┴────────┬─────────────────────┐
//! │  DataStore   │  HttpClient         │  Authenticator      │
//! │  Link header │  Retry / 429 / rate │  SSWS / Bearer / JWT│
//! └──────────────┴─────────────────────┴─────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication implementations
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Request execution and response parsing
pub mod data_store;

/// Lazy enumeration of paged collections
pub mod pagination;

/// Resource model (groups, users)
pub mod resource;

/// Resource clients
pub mod client;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use client::OktaClient;
pub use config::ClientConfig;
pub use pagination::{CollectionAsyncEnumerator, CollectionClient, Page, PagedCollectionEnumerator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

//! Pagination module
//!
//! Okta returns collections one page at a time and links each page to the
//! next through a `rel="next"` Link header. This module turns that into a
//! single lazy sequence.
//!
//! # Overview
//!
//! - [`PagedCollectionEnumerator`] issues the page fetches and holds one
//!   page at a time.
//! - [`CollectionAsyncEnumerator`] serves the items of those pages one by
//!   one, fetching the next page only when the current one runs out.
//! - [`CollectionClient`] describes a collection endpoint and creates fresh
//!   enumerators for each walk.

mod client;
mod collection;
mod paged;
mod types;

pub use client::CollectionClient;
pub use collection::{CollectionAsyncEnumerator, EnumeratorState};
pub use paged::PagedCollectionEnumerator;
pub use types::Page;

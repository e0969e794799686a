//! Page-level enumerator
//!
//! Owns the network-facing cursor of a collection: the initial request, the
//! continuation reference of the page it holds, and the cancellation token
//! observed while a fetch is in flight.

use super::types::Page;
use crate::data_store::DataStore;
use crate::error::{Error, Result};
use crate::http::{HttpRequest, RequestContext};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

/// Walks a collection one page at a time
pub struct PagedCollectionEnumerator<T> {
    data_store: Arc<dyn DataStore>,
    request: HttpRequest,
    context: RequestContext,
    cancel: CancellationToken,
    current: Option<Page<T>>,
    started: bool,
    disposed: bool,
    pages_fetched: usize,
}

impl<T: DeserializeOwned> PagedCollectionEnumerator<T> {
    pub fn new(
        data_store: Arc<dyn DataStore>,
        request: HttpRequest,
        context: RequestContext,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            data_store,
            request,
            context,
            cancel,
            current: None,
            started: false,
            disposed: false,
            pages_fetched: 0,
        }
    }

    /// Advance to the next page.
    ///
    /// The first call issues the initial request; later calls follow the
    /// continuation link of the page currently held. Returns `Ok(false)`
    /// without any I/O once the held page has no link.
    ///
    /// On error nothing changes, so calling again retries the same fetch.
    pub async fn move_next(&mut self) -> Result<bool> {
        if self.disposed {
            return Ok(false);
        }

        let request = if self.started {
            match self.current.as_ref().and_then(Page::next_link) {
                Some(link) => self.request.follow(link),
                None => {
                    trace!("No more pages after {} fetched", self.pages_fetched);
                    return Ok(false);
                }
            }
        } else {
            self.request.clone()
        };

        let page = self.fetch(&request).await?;

        debug!(
            "Fetched page {} of {}: {} items, has next: {}",
            self.pages_fetched + 1,
            self.request.uri,
            page.len(),
            !page.is_last()
        );

        self.current = Some(page);
        self.started = true;
        self.pages_fetched += 1;
        Ok(true)
    }

    async fn fetch(&self, request: &HttpRequest) -> Result<Page<T>> {
        if self.cancel.is_cancelled() {
            return Err(Error::Cancelled);
        }

        let raw = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return Err(Error::Cancelled),
            result = self.data_store.get_array(request, &self.context) => result?,
        };

        raw.try_map_items(|item| serde_json::from_value(item).map_err(Error::from))
    }
}

impl<T> PagedCollectionEnumerator<T> {
    /// The most recently fetched page, `None` before the first successful
    /// `move_next`
    pub fn current_page(&self) -> Option<&Page<T>> {
        self.current.as_ref()
    }

    /// Whether the initial request has completed
    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// The request this enumerator started from
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Drop the buffered page. Further calls to `move_next` report no pages.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.current = None;
            trace!("Disposed page enumerator for {}", self.request.uri);
        }
    }
}

impl<T> std::fmt::Debug for PagedCollectionEnumerator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedCollectionEnumerator")
            .field("request", &self.request)
            .field("started", &self.started)
            .field("disposed", &self.disposed)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}

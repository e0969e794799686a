//! Item-level enumerator
//!
//! Flattens the pages produced by a [`PagedCollectionEnumerator`] into a
//! single forward-only sequence of items. Items within a page are served
//! without I/O; a fetch happens only when the current page runs out.

use super::paged::PagedCollectionEnumerator;
use crate::error::Result;
use futures::Stream;
use serde::de::DeserializeOwned;
use tracing::trace;

/// Where an enumerator is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumeratorState {
    /// No item has been served yet
    NotStarted,
    /// Serving items from a fetched page
    ServingPage,
    /// Terminal: every further `move_next` reports `false`
    Exhausted,
}

/// Iterates every item of a paged collection, fetching pages lazily
#[derive(Debug)]
pub struct CollectionAsyncEnumerator<T> {
    pages: Option<PagedCollectionEnumerator<T>>,
    initialized: bool,
    local_index: usize,
    served: bool,
    exhausted: bool,
}

impl<T: DeserializeOwned> CollectionAsyncEnumerator<T> {
    pub fn new(pages: PagedCollectionEnumerator<T>) -> Self {
        Self {
            pages: Some(pages),
            initialized: false,
            local_index: 0,
            served: false,
            exhausted: false,
        }
    }

    /// Advance to the next item. Returns `true` when [`current`](Self::current)
    /// has an item to read.
    ///
    /// Empty pages in the middle of a collection are skipped. Errors from the
    /// page fetch are returned as-is and leave the position unchanged.
    pub async fn move_next(&mut self) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        let Some(pages) = self.pages.as_mut() else {
            return Ok(false);
        };

        if self.initialized {
            let len = pages.current_page().map_or(0, |page| page.len());
            if self.local_index + 1 < len {
                self.local_index += 1;
                return Ok(true);
            }
        }

        loop {
            if !pages.move_next().await? {
                self.exhausted = true;
                trace!("Collection exhausted after {} pages", pages.pages_fetched());
                return Ok(false);
            }

            self.initialized = true;
            self.local_index = 0;

            if pages.current_page().is_some_and(|page| !page.is_empty()) {
                self.served = true;
                return Ok(true);
            }
        }
    }

    /// Turn the enumerator into a stream of items.
    ///
    /// The stream ends after the collection is exhausted or after yielding
    /// the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<T>>
    where
        T: Clone,
    {
        futures::stream::try_unfold(self, |mut enumerator| async move {
            if !enumerator.move_next().await? {
                return Ok(None);
            }
            Ok(enumerator.current().cloned().map(|item| (item, enumerator)))
        })
    }
}

impl<T> CollectionAsyncEnumerator<T> {
    /// The item at the current position, `None` before the first successful
    /// `move_next` and after the end
    pub fn current(&self) -> Option<&T> {
        if !self.initialized || self.exhausted {
            return None;
        }
        self.pages
            .as_ref()?
            .current_page()?
            .items()
            .get(self.local_index)
    }

    pub fn state(&self) -> EnumeratorState {
        if self.exhausted || self.pages.is_none() {
            EnumeratorState::Exhausted
        } else if self.served {
            EnumeratorState::ServingPage
        } else {
            EnumeratorState::NotStarted
        }
    }

    /// The page-level enumerator, until disposal
    pub fn pages(&self) -> Option<&PagedCollectionEnumerator<T>> {
        self.pages.as_ref()
    }

    /// Release the page enumerator. Safe to call more than once; never
    /// fetches.
    pub fn dispose(&mut self) {
        if let Some(mut pages) = self.pages.take() {
            pages.dispose();
            trace!("Disposed collection enumerator");
        }
    }
}

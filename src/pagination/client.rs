//! Reusable handle on a listable collection

use super::collection::CollectionAsyncEnumerator;
use super::paged::PagedCollectionEnumerator;
use crate::data_store::DataStore;
use crate::error::Result;
use crate::http::{HttpRequest, RequestContext};
use futures::Stream;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Describes a collection endpoint; every call creates fresh enumerators
pub struct CollectionClient<T> {
    data_store: Arc<dyn DataStore>,
    request: HttpRequest,
    context: RequestContext,
    _item: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> CollectionClient<T> {
    pub fn new(data_store: Arc<dyn DataStore>, request: HttpRequest, context: RequestContext) -> Self {
        Self {
            data_store,
            request,
            context,
            _item: PhantomData,
        }
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    /// Page-level enumerator over the collection
    pub fn pages(&self, cancel: CancellationToken) -> PagedCollectionEnumerator<T> {
        PagedCollectionEnumerator::new(
            Arc::clone(&self.data_store),
            self.request.clone(),
            self.context.clone(),
            cancel,
        )
    }

    /// Item-level enumerator over the collection
    pub fn enumerate(&self, cancel: CancellationToken) -> CollectionAsyncEnumerator<T> {
        CollectionAsyncEnumerator::new(self.pages(cancel))
    }

    /// Stream every item; ends after the first error
    pub fn stream(&self) -> impl Stream<Item = Result<T>>
    where
        T: Clone,
    {
        self.enumerate(CancellationToken::new()).into_stream()
    }

    /// Collect the whole collection into memory
    pub async fn to_vec(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        let mut enumerator = self.enumerate(CancellationToken::new());
        let mut items = Vec::new();
        while enumerator.move_next().await? {
            if let Some(item) = enumerator.current() {
                items.push(item.clone());
            }
        }
        Ok(items)
    }

    /// The first item, fetching only as many pages as needed to find it
    pub async fn first(&self) -> Result<Option<T>>
    where
        T: Clone,
    {
        let mut enumerator = self.enumerate(CancellationToken::new());
        let item = if enumerator.move_next().await? {
            enumerator.current().cloned()
        } else {
            None
        };
        enumerator.dispose();
        Ok(item)
    }
}

impl<T> Clone for CollectionClient<T> {
    fn clone(&self) -> Self {
        Self {
            data_store: Arc::clone(&self.data_store),
            request: self.request.clone(),
            context: self.context.clone(),
            _item: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for CollectionClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionClient")
            .field("request", &self.request)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

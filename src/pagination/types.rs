//! Page type shared by the data store and the enumerators

use crate::error::Result;

/// One page of a collection as returned by the server.
///
/// `next` is the continuation reference for the following page (the
/// `rel="next"` link). It is opaque and passed through unmodified. `None`
/// marks the last page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// Create a page with a continuation reference
    pub fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self { items, next }
    }

    /// Create the last page of a collection
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The continuation reference, if there is a following page
    pub fn next_link(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Whether this page carries no continuation reference
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert every item, failing the whole page on the first error
    pub fn try_map_items<U, F>(self, f: F) -> Result<Page<U>>
    where
        F: FnMut(T) -> Result<U>,
    {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>>>()?;
        Ok(Page {
            items,
            next: self.next,
        })
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::last(Vec::new())
    }
}

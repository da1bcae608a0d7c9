//! Cursor handling for the SDK's key-based pagination.
//!
//! The loop starts with an empty key and feeds each response's `next_key`
//! into the following request. It ends when a response carries no
//! pagination metadata or an empty `next_key`.
//!
//! There is no page cap: a node that keeps returning fresh keys keeps the
//! loop going until the caller's timeout fires.

use crate::proto::{PageRequest, PageResponse};

/// Position in a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    next: Option<Vec<u8>>,
    pages: usize,
}

impl Cursor {
    /// A cursor positioned before the first page.
    pub fn start() -> Self {
        Self {
            next: Some(Vec::new()),
            pages: 0,
        }
    }

    /// Key for the next request, or `None` once the listing is exhausted.
    pub fn next_key(&mut self) -> Option<Vec<u8>> {
        self.next.take()
    }

    /// Record a received page and its pagination metadata.
    pub fn advance(&mut self, page: Option<PageResponse>) {
        self.pages += 1;
        self.next = match page {
            Some(p) if !p.next_key.is_empty() => Some(p.next_key),
            _ => None,
        };
    }

    /// Pages received so far.
    pub fn pages(&self) -> usize {
        self.pages
    }
}

/// Page request resuming at `key`.
pub fn page_request(key: Vec<u8>) -> Option<PageRequest> {
    Some(PageRequest {
        key,
        ..Default::default()
    })
}

//! Offset/limit page loading for a paginated sub-collection.
//!
//! A [`PageCursor`] owns the pages fetched so far for one key. Pages are only
//! ever appended in order, one fetch at a time, so the loaded pages are always
//! a gap-free prefix of the full sequence.
//!
//! Fetching is split into tickets so the cursor can be driven either inline
//! ([`PageCursor::ensure_page`]) or from an event loop that spawns each fetch
//! and hands the result back with [`PageCursor::complete`]. Every ticket
//! carries the cursor generation it was issued under; switching keys bumps the
//! generation and results for older tickets are discarded.

use crate::{PlanviewError, PlanviewResult};
use async_trait::async_trait;
use std::fmt::Debug;

/// One fetched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub offset: usize,
    pub limit: usize,
    pub items: Vec<T>,
    /// Size of the whole sub-collection as reported with this page.
    pub total: usize,
}

/// Source of pages for a keyed sub-collection.
#[async_trait]
pub trait PageSource<K, T>: Send + Sync {
    async fn fetch_page(&self, key: &K, limit: usize, offset: usize) -> PlanviewResult<Page<T>>;
}

/// A fetch the cursor wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<K> {
    pub key: K,
    pub generation: u64,
    pub page_index: usize,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Clone)]
pub struct PageCursor<K, T> {
    key: K,
    generation: u64,
    page_size: usize,
    loaded: Vec<Page<T>>,
    total: Option<usize>,
    requested: usize,
    target: Option<usize>,
    in_flight: Option<FetchTicket<K>>,
}

impl<K: Clone + PartialEq + Debug, T> PageCursor<K, T> {
    /// `page_size` is fixed for the cursor's lifetime; zero is treated as one.
    pub fn new(key: K, page_size: usize) -> Self {
        Self {
            key,
            generation: 0,
            page_size: page_size.max(1),
            loaded: Vec::new(),
            total: None,
            requested: 0,
            target: None,
            in_flight: None,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn loaded_pages(&self) -> &[Page<T>] {
        &self.loaded
    }

    /// Total item count, known once the first page has loaded.
    pub fn total(&self) -> Option<usize> {
        self.total
    }

    pub fn total_pages(&self) -> Option<usize> {
        self.total.map(|total| total.div_ceil(self.page_size))
    }

    /// The page index the user asked for, clamped once the total is known.
    pub fn requested_page(&self) -> usize {
        self.requested
    }

    pub fn is_loaded(&self, page_index: usize) -> bool {
        page_index < self.loaded.len()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&FetchTicket<K>> {
        self.in_flight.as_ref()
    }

    /// Whether a page beyond the loaded prefix exists (or might, before the first load).
    pub fn has_next_page(&self) -> bool {
        match self.total {
            Some(total) => self.loaded.len() * self.page_size < total,
            None => true,
        }
    }

    /// Data for the requested page, if it has been loaded.
    pub fn current_page(&self) -> Option<&Page<T>> {
        self.loaded.get(self.requested)
    }

    /// Checked access to a page by index.
    ///
    /// Fails with `InvalidRange` when the index is past the known total, and
    /// returns `Ok(None)` for a valid page that has not been fetched yet.
    pub fn page(&self, page_index: usize) -> PlanviewResult<Option<&Page<T>>> {
        if let Some(pages) = self.total_pages() {
            if page_index >= pages {
                return Err(PlanviewError::InvalidRange {
                    index: page_index,
                    len: pages,
                });
            }
        }
        Ok(self.loaded.get(page_index))
    }

    /// Point the cursor at a different sub-collection.
    ///
    /// Discards every loaded page, resets the requested index to 0 and
    /// invalidates outstanding tickets. Returns false if the key is unchanged.
    pub fn switch_key(&mut self, key: K) -> bool {
        if key == self.key {
            return false;
        }
        tracing::debug!(from = ?self.key, to = ?key, "page cursor switching key");
        self.key = key;
        self.reset();
        true
    }

    /// Drop every loaded page and invalidate outstanding tickets, keeping the key.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.loaded.clear();
        self.total = None;
        self.requested = 0;
        self.target = None;
        self.in_flight = None;
    }

    /// Record the page the user wants to see.
    ///
    /// Out-of-range indices are clamped once the total is known. If the page
    /// is not loaded yet and more pages exist, returns the ticket for the next
    /// fetch in the chain, unless a fetch is already in flight. The chain only
    /// runs toward the latest request: asking for a loaded page stops it.
    pub fn request_page(&mut self, page_index: usize) -> Option<FetchTicket<K>> {
        let page_index = match self.total_pages() {
            Some(0) => 0,
            Some(pages) => page_index.min(pages - 1),
            None => page_index,
        };
        self.requested = page_index;
        if self.is_loaded(page_index) || !self.has_next_page() {
            self.target = None;
            return None;
        }
        self.target = Some(page_index);
        self.next_fetch()
    }

    /// Issue the next ticket toward the current target, if any is due.
    pub fn next_fetch(&mut self) -> Option<FetchTicket<K>> {
        if self.in_flight.is_some() {
            return None;
        }
        let target = self.target?;
        if self.is_loaded(target) || !self.has_next_page() {
            self.target = None;
            return None;
        }
        let page_index = self.loaded.len();
        let ticket = FetchTicket {
            key: self.key.clone(),
            generation: self.generation,
            page_index,
            offset: page_index * self.page_size,
            limit: self.page_size,
        };
        tracing::debug!(key = ?ticket.key, page = page_index, offset = ticket.offset, "fetching page");
        self.in_flight = Some(ticket.clone());
        Some(ticket)
    }

    /// Hand back the outcome of a ticket.
    ///
    /// Results for stale or unexpected tickets are dropped and reported as
    /// `Ok(false)`. A failed fetch aborts the chain and leaves the loaded pages
    /// untouched, so requesting the same page again retries cleanly.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket<K>,
        result: PlanviewResult<Page<T>>,
    ) -> PlanviewResult<bool> {
        if self.in_flight.as_ref() != Some(ticket) {
            tracing::debug!(
                key = ?ticket.key,
                page = ticket.page_index,
                "discarding result for stale page ticket"
            );
            return Ok(false);
        }
        self.in_flight = None;

        let page = match result {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(key = ?ticket.key, page = ticket.page_index, "page fetch failed: {}", e);
                self.target = None;
                return Err(e);
            }
        };

        match self.total {
            None => self.total = Some(page.total),
            Some(total) if total != page.total => {
                tracing::debug!(known = total, reported = page.total, "ignoring changed total");
            }
            Some(_) => {}
        }
        self.loaded.push(Page {
            offset: ticket.offset,
            limit: ticket.limit,
            items: page.items,
            total: self.total.unwrap_or(page.total),
        });
        if let Some(pages) = self.total_pages() {
            self.requested = self.requested.min(pages.saturating_sub(1));
        }
        Ok(true)
    }

    /// Fetch pages in order until `page_index` is loaded.
    ///
    /// Each missing page is fetched once, strictly after the previous one
    /// completes. An outstanding ticket from an event loop is superseded.
    /// An index past the known total fails with `InvalidRange` without
    /// fetching anything further.
    pub async fn ensure_page<S>(&mut self, page_index: usize, source: &S) -> PlanviewResult<()>
    where
        S: PageSource<K, T> + ?Sized,
    {
        if self.is_loaded(page_index) {
            return Ok(());
        }
        self.in_flight = None;
        self.target = Some(page_index);
        loop {
            if let Some(pages) = self.total_pages().filter(|pages| page_index >= *pages) {
                self.target = None;
                return Err(PlanviewError::InvalidRange {
                    index: page_index,
                    len: pages,
                });
            }
            let Some(ticket) = self.next_fetch() else {
                break;
            };
            let result = source.fetch_page(&ticket.key, ticket.limit, ticket.offset).await;
            self.complete(&ticket, result)?;
        }
        if self.is_loaded(page_index) {
            Ok(())
        } else {
            Err(PlanviewError::InvalidRange {
                index: page_index,
                len: self.total_pages().unwrap_or(self.loaded.len()),
            })
        }
    }
}

//! Background listing fetches.
//!
//! The ratatui event loop is synchronous, so fetches run on their own threads
//! and report back over a channel the loop polls between frames.
//!
//! Every request gets an id. Only the newest request per [`Collection`] is
//! delivered; answers to requests that were superseded while in flight are
//! dropped so a slow old page never overwrites a newer one.
//!
//! ```no_run
//! use folio::data::Ledger;
//! use folio::fetch::FetchManager;
//! use folio::pagination::ApiFilters;
//! use folio::source::{Collection, ListQuery, MemorySource};
//!
//! let mut fm = FetchManager::new(MemorySource::new(Ledger::seeded()));
//! fm.spawn(ListQuery {
//!     collection: Collection::Invoices,
//!     search: String::new(),
//!     filters: ApiFilters::default(),
//! });
//!
//! if let Some(outcome) = fm.try_recv() {
//!     match outcome.result {
//!         Ok(page) => println!("{} rows of {}", page.rows.len(), page.total),
//!         Err(e) => println!("fetch failed: {e}"),
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use color_eyre::eyre::Result;
use crossbeam::channel::{unbounded, Receiver, Sender};
use tracing::{debug, warn};

use crate::source::{Collection, ListQuery, PageEnvelope, RecordSource};

/// Result of one fetch, tagged with the request it answers.
#[derive(Debug)]
pub struct FetchOutcome {
    pub request_id: u64,
    pub query: ListQuery,
    pub result: Result<PageEnvelope>,
}

pub struct FetchManager {
    source: Arc<dyn RecordSource>,
    sender: Sender<FetchOutcome>,
    receiver: Receiver<FetchOutcome>,
    next_id: u64,
    /// Newest request id per collection that has not been answered yet.
    in_flight: HashMap<Collection, u64>,
    pending: usize,
}

impl FetchManager {
    pub fn new(source: impl RecordSource + 'static) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            source: Arc::new(source),
            sender,
            receiver,
            next_id: 1,
            in_flight: HashMap::new(),
            pending: 0,
        }
    }

    /// Starts fetching `query` in the background and returns its request id.
    ///
    /// Any earlier request for the same collection is superseded.
    pub fn spawn(&mut self, query: ListQuery) -> u64 {
        let request_id = self.next_id;
        self.next_id += 1;
        self.pending += 1;
        if let Some(previous) = self.in_flight.insert(query.collection, request_id) {
            debug!(previous, request_id, collection = %query.collection, "superseding fetch");
        }
        debug!(
            request_id,
            collection = %query.collection,
            page = query.filters.page,
            per_page = query.filters.per_page,
            "dispatching fetch"
        );

        let source = Arc::clone(&self.source);
        let sender = self.sender.clone();
        thread::spawn(move || {
            let result = source.fetch(&query);
            let _ = sender.send(FetchOutcome {
                request_id,
                query,
                result,
            });
        });
        request_id
    }

    /// Returns the next current outcome, if one has arrived.
    ///
    /// Outcomes of superseded requests are consumed and dropped.
    pub fn try_recv(&mut self) -> Option<FetchOutcome> {
        while self.pending > 0 {
            let outcome = self.receiver.try_recv().ok()?;
            self.pending -= 1;

            let collection = outcome.query.collection;
            if self.in_flight.get(&collection) != Some(&outcome.request_id) {
                debug!(request_id = outcome.request_id, %collection, "discarding stale fetch");
                continue;
            }
            self.in_flight.remove(&collection);

            match &outcome.result {
                Ok(page) => debug!(
                    request_id = outcome.request_id,
                    %collection,
                    rows = page.rows.len(),
                    total = page.total,
                    "fetch complete"
                ),
                Err(e) => warn!(
                    request_id = outcome.request_id,
                    %collection,
                    error = %e,
                    "fetch failed"
                ),
            }
            return Some(outcome);
        }
        None
    }

    /// Whether the newest request for `collection` is still outstanding.
    pub fn is_loading(&self, collection: Collection) -> bool {
        self.in_flight.contains_key(&collection)
    }

    pub fn pending_count(&self) -> usize {
        self.pending
    }

    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Ledger;
    use crate::pagination::ApiFilters;
    use crate::source::MemorySource;
    use color_eyre::eyre::eyre;
    use std::time::{Duration, Instant};

    fn query(collection: Collection, page: u64) -> ListQuery {
        ListQuery {
            collection,
            search: String::new(),
            filters: ApiFilters { page, per_page: 10 },
        }
    }

    fn wait_for(fm: &mut FetchManager) -> Option<FetchOutcome> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(outcome) = fm.try_recv() {
                return Some(outcome);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    /// Answers page 1 slowly and every other page at once.
    struct SlowFirstPage;

    impl RecordSource for SlowFirstPage {
        fn fetch(&self, query: &ListQuery) -> Result<PageEnvelope> {
            if query.filters.page == 1 {
                thread::sleep(Duration::from_millis(150));
            }
            Ok(PageEnvelope {
                rows: vec![vec![format!("page {}", query.filters.page)]],
                total: 100,
            })
        }
    }

    struct Failing;

    impl RecordSource for Failing {
        fn fetch(&self, _query: &ListQuery) -> Result<PageEnvelope> {
            Err(eyre!("backend unavailable"))
        }
    }

    #[test]
    fn test_manager_creation() {
        let fm = FetchManager::new(MemorySource::new(Ledger::default()));
        assert_eq!(fm.pending_count(), 0);
        assert!(!fm.has_pending());
        assert!(!fm.is_loading(Collection::Customers));
    }

    #[test]
    fn test_fetch_completes() {
        let mut fm = FetchManager::new(MemorySource::new(Ledger::with_counts(30, 0, 0)));
        let id = fm.spawn(query(Collection::Customers, 2));
        assert!(fm.is_loading(Collection::Customers));

        let outcome = wait_for(&mut fm).expect("fetch should complete");
        assert_eq!(outcome.request_id, id);
        let page = outcome.result.unwrap();
        assert_eq!(page.total, 30);
        assert_eq!(page.rows.len(), 10);
        assert!(!fm.is_loading(Collection::Customers));
        assert_eq!(fm.pending_count(), 0);
    }

    #[test]
    fn test_superseded_fetch_is_discarded() {
        let mut fm = FetchManager::new(SlowFirstPage);
        fm.spawn(query(Collection::Invoices, 1));
        let newest = fm.spawn(query(Collection::Invoices, 2));

        let outcome = wait_for(&mut fm).expect("newest fetch should arrive");
        assert_eq!(outcome.request_id, newest);
        assert_eq!(outcome.result.unwrap().rows[0][0], "page 2");

        thread::sleep(Duration::from_millis(300));
        assert!(fm.try_recv().is_none());
        assert_eq!(fm.pending_count(), 0);
    }

    #[test]
    fn test_collections_do_not_supersede_each_other() {
        let mut fm = FetchManager::new(SlowFirstPage);
        fm.spawn(query(Collection::Invoices, 2));
        fm.spawn(query(Collection::Tickets, 3));

        let mut seen = vec![
            wait_for(&mut fm).unwrap().query.collection,
            wait_for(&mut fm).unwrap().query.collection,
        ];
        seen.sort_by_key(|c| c.index());
        assert_eq!(seen, vec![Collection::Invoices, Collection::Tickets]);
    }

    #[test]
    fn test_failure_is_delivered() {
        let mut fm = FetchManager::new(Failing);
        fm.spawn(query(Collection::Tickets, 1));

        let outcome = wait_for(&mut fm).unwrap();
        let err = outcome.result.unwrap_err();
        assert!(err.to_string().contains("backend unavailable"));
        assert!(!fm.is_loading(Collection::Tickets));
    }
}

//! Listing data sources.
//!
//! A [`RecordSource`] answers a [`ListQuery`] with one page of rows and the
//! total number of rows matching the query. [`MemorySource`] serves a
//! [`Ledger`] held in memory.

use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

use crate::data::{Customer, Invoice, Ledger, Ticket};
use crate::pagination::ApiFilters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collection {
    Customers,
    Invoices,
    Tickets,
}

impl Collection {
    pub const ALL: [Collection; 3] = [
        Collection::Customers,
        Collection::Invoices,
        Collection::Tickets,
    ];

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Collection::Customers => &["Name", "Tax ID", "Email", "Since"],
            Collection::Invoices => &["Number", "Customer", "Issued", "Total", "Status"],
            Collection::Tickets => &["Subject", "Requester", "Opened", "Status"],
        }
    }

    pub fn next(self) -> Self {
        match self {
            Collection::Customers => Collection::Invoices,
            Collection::Invoices => Collection::Tickets,
            Collection::Tickets => Collection::Customers,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Collection::Customers => 0,
            Collection::Invoices => 1,
            Collection::Tickets => 2,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Collection::Customers => "Customers",
            Collection::Invoices => "Invoices",
            Collection::Tickets => "Tickets",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub collection: Collection,
    /// Case-insensitive text filter; empty matches everything.
    pub search: String,
    pub filters: ApiFilters,
}

/// One display row: cells line up with [`Collection::columns`].
pub type Row = Vec<String>;

/// A page of rows plus the total matching the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEnvelope {
    pub rows: Vec<Row>,
    pub total: u64,
}

pub trait RecordSource: Send + Sync {
    fn fetch(&self, query: &ListQuery) -> Result<PageEnvelope>;
}

/// Records that can appear in a listing.
trait Listable {
    fn cells(&self) -> Row;
}

impl Listable for Customer {
    fn cells(&self) -> Row {
        vec![
            self.name.clone(),
            self.tax_id.clone(),
            self.email.clone(),
            self.created_on.to_string(),
        ]
    }
}

impl Listable for Invoice {
    fn cells(&self) -> Row {
        vec![
            self.number.clone(),
            self.customer.clone(),
            self.issued_on.to_string(),
            self.total_display(),
            self.status.to_string(),
        ]
    }
}

impl Listable for Ticket {
    fn cells(&self) -> Row {
        vec![
            self.subject.clone(),
            self.requester.clone(),
            self.opened_on.to_string(),
            self.status.to_string(),
        ]
    }
}

fn page_of<T: Listable>(records: &[T], search: &str, filters: &ApiFilters) -> PageEnvelope {
    let needle = search.trim().to_lowercase();
    let matching: Vec<Row> = records
        .iter()
        .map(Listable::cells)
        .filter(|cells| {
            needle.is_empty() || cells.iter().any(|c| c.to_lowercase().contains(&needle))
        })
        .collect();

    let total = matching.len() as u64;
    let offset = usize::try_from(filters.offset()).unwrap_or(usize::MAX);
    let per_page = usize::try_from(filters.per_page).unwrap_or(usize::MAX);
    let rows = matching.into_iter().skip(offset).take(per_page).collect();
    PageEnvelope { rows, total }
}

/// Serves listings from an in-memory [`Ledger`].
#[derive(Debug, Clone)]
pub struct MemorySource {
    ledger: Arc<Ledger>,
    latency: Duration,
}

impl MemorySource {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(ledger),
            latency: Duration::ZERO,
        }
    }

    /// Sleeps for `latency` before answering each fetch.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl RecordSource for MemorySource {
    fn fetch(&self, query: &ListQuery) -> Result<PageEnvelope> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
        let ledger = &self.ledger;
        let envelope = match query.collection {
            Collection::Customers => page_of(&ledger.customers, &query.search, &query.filters),
            Collection::Invoices => page_of(&ledger.invoices, &query.search, &query.filters),
            Collection::Tickets => page_of(&ledger.tickets, &query.search, &query.filters),
        };
        Ok(envelope)
    }
}

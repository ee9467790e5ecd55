//! Folio: a terminal browser for paginated business records.
//!
//! The heart of the crate is [`pagination::Paginator`]; everything else hosts
//! it: a data source answering page requests, a background fetcher, per-view
//! state and the ratatui front end.

pub mod config;
pub mod data;
pub mod fetch;
pub mod key_handler;
pub mod logging;
pub mod pages;
pub mod pagination;
pub mod screen;
pub mod source;
pub mod state;
pub mod status_symbols;
pub mod ui_utils;

// Re-export main types used in tests and benches
pub use data::{Customer, Invoice, InvoiceStatus, Ledger, Ticket, TicketStatus};
pub use pagination::{ApiFilters, PageItem, PaginationConfig, PaginationSnapshot, Paginator};
pub use source::{Collection, ListQuery, MemorySource, PageEnvelope, RecordSource};

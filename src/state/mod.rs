//! View state for the Folio TUI.
//!
//! State lives apart from rendering so it can be unit tested without a
//! terminal.
//!
//! ```text
//! App
//! ├── ListingState (Customers)
//! ├── ListingState (Invoices)
//! └── ListingState (Tickets)
//! ```
//!
//! Each listing owns its own `Paginator`; switching views never touches the
//! pagination of another view.

mod listing;

pub use listing::{ListingState, PAGE_SIZE_STEPS};

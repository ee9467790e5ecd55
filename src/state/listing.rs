//! Listing view state.
//!
//! One `ListingState` per listing view. It owns that view's paginator and
//! turns user intent into paginator calls. Methods that return `bool` report
//! whether the rows on screen are now stale and a fetch should be issued.

use throbber_widgets_tui::ThrobberState;
use tracing::info;

use crate::pagination::{PaginationConfig, Paginator};
use crate::source::{Collection, ListQuery, PageEnvelope, Row};

/// Page sizes offered by the grow/shrink keys.
pub const PAGE_SIZE_STEPS: [u64; 6] = [5, 10, 15, 25, 50, 100];

#[derive(Debug)]
pub struct ListingState {
    pub collection: Collection,
    pub paginator: Paginator,
    pub search: String,
    pub rows: Vec<Row>,
    pub selected_row: usize,
    pub last_error: Option<String>,
    pub throbber: ThrobberState,
    loaded: bool,
}

impl ListingState {
    pub fn new(collection: Collection, config: PaginationConfig) -> Self {
        let mut paginator = Paginator::new(config);
        let per_page = paginator.config().default_items_per_page;
        paginator.initialize(1, i64::try_from(per_page).unwrap_or(i64::MAX));
        Self {
            collection,
            paginator,
            search: String::new(),
            rows: Vec::new(),
            selected_row: 0,
            last_error: None,
            throbber: ThrobberState::default(),
            loaded: false,
        }
    }

    /// Query for the page the paginator currently points at.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            collection: self.collection,
            search: self.search.clone(),
            filters: self.paginator.api_filters(),
        }
    }

    /// Whether at least one fetch has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn next_page(&mut self) -> bool {
        self.paginator.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.paginator.previous_page()
    }

    pub fn first_page(&mut self) -> bool {
        self.paginator.first_page()
    }

    pub fn last_page(&mut self) -> bool {
        self.paginator.last_page()
    }

    /// Steps the page size up to the next entry of [`PAGE_SIZE_STEPS`].
    pub fn grow_page_size(&mut self) -> bool {
        let current = self.paginator.items_per_page();
        let target = PAGE_SIZE_STEPS
            .iter()
            .copied()
            .find(|&s| s > current)
            .unwrap_or(self.paginator.config().max_items_per_page);
        self.change_page_size(target)
    }

    /// Steps the page size down to the previous entry of [`PAGE_SIZE_STEPS`].
    pub fn shrink_page_size(&mut self) -> bool {
        let current = self.paginator.items_per_page();
        let target = PAGE_SIZE_STEPS
            .iter()
            .rev()
            .copied()
            .find(|&s| s < current)
            .unwrap_or(self.paginator.config().min_items_per_page);
        self.change_page_size(target)
    }

    fn change_page_size(&mut self, target: u64) -> bool {
        let changed = self
            .paginator
            .set_items_per_page(i64::try_from(target).unwrap_or(i64::MAX));
        if changed {
            info!(
                collection = %self.collection,
                items_per_page = self.paginator.items_per_page(),
                page = self.paginator.current_page(),
                "page size changed"
            );
        }
        changed
    }

    /// Appends to the search text. The listing restarts at page 1.
    pub fn push_search_char(&mut self, c: char) -> bool {
        self.search.push(c);
        self.restart_search();
        true
    }

    pub fn pop_search_char(&mut self) -> bool {
        if self.search.pop().is_none() {
            return false;
        }
        self.restart_search();
        true
    }

    pub fn clear_search(&mut self) -> bool {
        if self.search.is_empty() {
            return false;
        }
        self.search.clear();
        self.restart_search();
        true
    }

    fn restart_search(&mut self) {
        self.paginator.first_page();
        self.selected_row = 0;
    }

    /// Moves the row cursor up. Returns `true` if the selection changed.
    pub fn navigate_up(&mut self) -> bool {
        if self.selected_row > 0 {
            self.selected_row -= 1;
            true
        } else {
            false
        }
    }

    /// Moves the row cursor down. Returns `true` if the selection changed.
    pub fn navigate_down(&mut self) -> bool {
        let max_index = self.rows.len().saturating_sub(1);
        if self.selected_row < max_index {
            self.selected_row += 1;
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&Row> {
        self.rows.get(self.selected_row)
    }

    /// Installs a fetched page.
    ///
    /// The envelope's total goes to the paginator. Returns `true` when the
    /// resulting page differs from the one these rows were requested for, in
    /// which case a refetch is needed.
    pub fn apply_envelope(&mut self, envelope: PageEnvelope) -> bool {
        let requested = self.paginator.api_filters().page;
        self.paginator
            .set_total_items(i64::try_from(envelope.total).unwrap_or(i64::MAX));
        self.rows = envelope.rows;
        self.selected_row = self.selected_row.min(self.rows.len().saturating_sub(1));
        self.last_error = None;
        self.loaded = true;
        self.paginator.current_page() != requested
    }

    /// Records a failed fetch. Rows already on screen stay.
    pub fn apply_error(&mut self, message: String) {
        self.last_error = Some(message);
    }

    /// Advances the busy indicator by one frame.
    pub fn tick(&mut self) {
        self.throbber.calc_next();
    }
}

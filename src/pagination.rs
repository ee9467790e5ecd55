//! Page bookkeeping for listing views.
//!
//! A [`Paginator`] tracks `(current_page, items_per_page, total_items)` and keeps
//! that triple valid under every request a listing view can make: page jumps,
//! page-size changes and fresh totals from the data source. Nothing here fails.
//! Out of range input is clamped, so callers never handle an error from
//! pagination math.
//!
//! # Invariants
//!
//! After every call:
//! - `total_pages() == 0` exactly when `total_items() == 0`
//! - `1 <= current_page() <= max(total_pages(), 1)`
//! - `from() == 0 && to() == 0` exactly when `total_items() == 0`,
//!   otherwise `1 <= from() <= to() <= total_items()`
//!
//! # Usage
//!
//! ```
//! use folio::pagination::Paginator;
//!
//! let mut pager = Paginator::default();
//! pager.initialize(1, 15);
//! pager.set_total_items(42);
//! assert_eq!(pager.total_pages(), 3);
//!
//! assert!(pager.next_page());
//! assert!(pager.next_page());
//! assert_eq!((pager.from(), pager.to()), (31, 42));
//! assert!(!pager.next_page());
//! ```

use crossbeam::channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_ITEMS_PER_PAGE: u64 = 15;
pub const MAX_ITEMS_PER_PAGE: u64 = 100;
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 7;

/// Narrowest compressed page window: first, gap, current, gap, last.
pub const MIN_VISIBLE_PAGES: usize = 5;

/// Marker for an elided run of pages in [`Paginator::page_numbers`].
pub const GAP: i64 = -1;

/// Summary shown by [`Paginator::pagination_info`] for an empty listing.
pub const NO_RECORDS: &str = "No records found";

/// Bounds applied to page-size requests and page windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub min_items_per_page: u64,
    pub max_items_per_page: u64,
    pub default_items_per_page: u64,
    pub max_visible_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            min_items_per_page: 1,
            max_items_per_page: MAX_ITEMS_PER_PAGE,
            default_items_per_page: DEFAULT_ITEMS_PER_PAGE,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
        }
    }
}

impl PaginationConfig {
    /// Returns a copy whose bounds agree with each other.
    ///
    /// A zero minimum becomes 1, a maximum below the minimum is raised to it and
    /// the default page size is pulled into `[min, max]`.
    pub fn normalized(self) -> Self {
        let min = self.min_items_per_page.max(1);
        let max = self.max_items_per_page.max(min);
        Self {
            min_items_per_page: min,
            max_items_per_page: max,
            default_items_per_page: self.default_items_per_page.clamp(min, max),
            max_visible_pages: self.max_visible_pages.max(MIN_VISIBLE_PAGES),
        }
    }

    fn clamp_page_size(&self, requested: i64) -> u64 {
        u64::try_from(requested)
            .unwrap_or(0)
            .clamp(self.min_items_per_page, self.max_items_per_page)
    }
}

/// One slot of a page-number control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageItem {
    Page(u64),
    Gap,
}

impl PageItem {
    /// Numeric form, with [`GAP`] standing in for an elided run.
    pub fn number(self) -> i64 {
        match self {
            PageItem::Page(n) => i64::try_from(n).unwrap_or(i64::MAX),
            PageItem::Gap => GAP,
        }
    }
}

/// Query parameters for the next list request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFilters {
    pub page: u64,
    pub per_page: u64,
}

impl Default for ApiFilters {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl ApiFilters {
    /// Zero-based index of the first row of the requested page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }

    pub fn query_string(&self) -> String {
        format!("page={}&per_page={}", self.page, self.per_page)
    }
}

/// Immutable view of a paginator, derived fields included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationSnapshot {
    pub current_page: u64,
    pub items_per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub from: u64,
    pub to: u64,
    pub is_first_page: bool,
    pub is_last_page: bool,
    pub has_pages: bool,
}

/// Pagination state for a single listing view.
///
/// Each view owns its own instance. State changes are published as
/// [`PaginationSnapshot`]s to every receiver handed out by [`Paginator::watch`].
#[derive(Debug)]
pub struct Paginator {
    current_page: u64,
    items_per_page: u64,
    total_items: u64,
    /// Page asked for by `initialize` before any total was known.
    requested_page: Option<u64>,
    config: PaginationConfig,
    watchers: Vec<Sender<PaginationSnapshot>>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PaginationConfig::default())
    }
}

impl Paginator {
    /// Creates a paginator on page 1 with the configured default page size.
    pub fn new(config: PaginationConfig) -> Self {
        let config = config.normalized();
        Self {
            current_page: 1,
            items_per_page: config.default_items_per_page,
            total_items: 0,
            requested_page: None,
            config,
            watchers: Vec::new(),
        }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Starts a new listing session.
    ///
    /// The total is cleared, so the paginator sits on page 1 until the first
    /// [`set_total_items`](Self::set_total_items). A `page` above 1 is
    /// remembered and applied, clamped, once that total arrives.
    pub fn initialize(&mut self, page: i64, items_per_page: i64) {
        let before = self.state();
        let page = u64::try_from(page).unwrap_or(0).max(1);
        self.items_per_page = self.config.clamp_page_size(items_per_page);
        self.total_items = 0;
        self.current_page = 1;
        self.requested_page = (page > 1).then_some(page);
        self.publish_if_changed(before);
    }

    /// Records the authoritative row count reported by the data source.
    ///
    /// Negative totals count as zero. When the new total leaves the current
    /// page out of range, the page is pulled down to the last one.
    pub fn set_total_items(&mut self, total: i64) {
        let before = self.state();
        self.total_items = u64::try_from(total).unwrap_or(0);

        let total_pages = self.total_pages();
        if total_pages == 0 {
            self.current_page = 1;
        } else {
            if let Some(page) = self.requested_page.take() {
                self.current_page = page;
            }
            if self.current_page > total_pages {
                debug!(
                    from = self.current_page,
                    to = total_pages,
                    "current page out of range after total changed"
                );
                self.current_page = total_pages;
            }
        }
        self.publish_if_changed(before);
    }

    /// Moves to `page`, clamped into `[1, total_pages]`.
    ///
    /// Returns `true` only if the current page changed. Always `false` while
    /// there are no pages.
    pub fn go_to_page(&mut self, page: i64) -> bool {
        let total_pages = self.total_pages();
        if total_pages == 0 {
            return false;
        }

        let target = u64::try_from(page).unwrap_or(0).clamp(1, total_pages);
        if target == self.current_page {
            return false;
        }

        let before = self.state();
        debug!(from = self.current_page, to = target, "page change");
        self.current_page = target;
        self.requested_page = None;
        self.publish_if_changed(before);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(as_input(self.current_page).saturating_sub(1))
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(as_input(self.current_page).saturating_add(1))
    }

    pub fn first_page(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> bool {
        self.go_to_page(as_input(self.total_pages()))
    }

    /// Changes the page size, clamped into the configured bounds.
    ///
    /// The current page is re-anchored so the row that was first on screen
    /// stays visible: it becomes `ceil(old_from / new_size)`. An empty listing
    /// keeps its page, but a page still waiting on its first total is
    /// re-anchored the same way. Returns `true` if the page size changed.
    pub fn set_items_per_page(&mut self, items_per_page: i64) -> bool {
        let size = self.config.clamp_page_size(items_per_page);
        if size == self.items_per_page {
            return false;
        }

        let before = self.state();
        let anchor = self.from();
        if let Some(page) = self.requested_page {
            let first_row = (page - 1)
                .saturating_mul(self.items_per_page)
                .saturating_add(1);
            self.requested_page = Some(first_row.div_ceil(size)).filter(|&p| p > 1);
        }
        self.items_per_page = size;
        if anchor > 0 {
            self.current_page = anchor.div_ceil(size);
        }
        debug!(
            items_per_page = size,
            anchor,
            current_page = self.current_page,
            "page size change"
        );
        self.publish_if_changed(before);
        true
    }

    /// Back to page 1 with no rows. The page size is a user preference and survives.
    pub fn reset(&mut self) {
        let before = self.state();
        self.current_page = 1;
        self.total_items = 0;
        self.requested_page = None;
        self.publish_if_changed(before);
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn items_per_page(&self) -> u64 {
        self.items_per_page
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn total_pages(&self) -> u64 {
        if self.total_items == 0 {
            0
        } else {
            self.total_items.div_ceil(self.items_per_page)
        }
    }

    /// 1-based index of the first visible row, 0 when empty.
    pub fn from(&self) -> u64 {
        if self.total_items == 0 {
            0
        } else {
            (self.current_page - 1)
                .saturating_mul(self.items_per_page)
                .saturating_add(1)
        }
    }

    /// 1-based index of the last visible row, 0 when empty.
    pub fn to(&self) -> u64 {
        self.current_page
            .saturating_mul(self.items_per_page)
            .min(self.total_items)
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page == 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages().max(1)
    }

    pub fn has_pages(&self) -> bool {
        self.total_pages() > 0
    }

    /// Page-number control contents, at most `max_visible` slots wide.
    ///
    /// All pages are listed when they fit. Otherwise the window hugs the start,
    /// hugs the end, or centres on the current page, with [`PageItem::Gap`]
    /// for elided runs. A centred window narrower than 7 drops the current
    /// page's neighbours. `max_visible` below [`MIN_VISIBLE_PAGES`] is raised,
    /// since no narrower window can show first, current and last.
    pub fn page_items(&self, max_visible: usize) -> Vec<PageItem> {
        let total = self.total_pages();
        let max_visible = max_visible.max(MIN_VISIBLE_PAGES) as u64;

        if total <= max_visible {
            return (1..=total).map(PageItem::Page).collect();
        }

        let half = max_visible / 2;
        let current = self.current_page;
        let mut items = Vec::with_capacity(max_visible as usize);

        if current <= half + 1 {
            items.extend((1..=max_visible - 2).map(PageItem::Page));
            items.push(PageItem::Gap);
            items.push(PageItem::Page(total));
        } else if current >= total - half {
            items.push(PageItem::Page(1));
            items.push(PageItem::Gap);
            items.extend((total - (max_visible - 3)..=total).map(PageItem::Page));
        } else {
            let spread = if max_visible >= 7 { 1 } else { 0 };
            items.push(PageItem::Page(1));
            items.push(PageItem::Gap);
            items.extend((current - spread..=current + spread).map(PageItem::Page));
            items.push(PageItem::Gap);
            items.push(PageItem::Page(total));
        }
        items
    }

    /// [`page_items`](Self::page_items) with gaps encoded as [`GAP`].
    pub fn page_numbers(&self, max_visible: usize) -> Vec<i64> {
        self.page_items(max_visible)
            .into_iter()
            .map(PageItem::number)
            .collect()
    }

    /// Page window using the configured width.
    pub fn default_page_items(&self) -> Vec<PageItem> {
        self.page_items(self.config.max_visible_pages)
    }

    pub fn pagination_info(&self) -> String {
        if self.total_items == 0 {
            NO_RECORDS.to_string()
        } else {
            format!(
                "Showing {}-{} of {}",
                self.from(),
                self.to(),
                self.total_items
            )
        }
    }

    /// Parameters for the next list request.
    ///
    /// Before the first total arrives this carries the page asked for by
    /// [`initialize`](Self::initialize), so the first request fetches it.
    pub fn api_filters(&self) -> ApiFilters {
        ApiFilters {
            page: self.requested_page.unwrap_or(self.current_page),
            per_page: self.items_per_page,
        }
    }

    pub fn snapshot(&self) -> PaginationSnapshot {
        PaginationSnapshot {
            current_page: self.current_page,
            items_per_page: self.items_per_page,
            total_items: self.total_items,
            total_pages: self.total_pages(),
            from: self.from(),
            to: self.to(),
            is_first_page: self.is_first_page(),
            is_last_page: self.is_last_page(),
            has_pages: self.has_pages(),
        }
    }

    /// Subscribes to state changes.
    ///
    /// The receiver gets one snapshot per call that changed the state. Dropping
    /// the receiver unsubscribes it.
    pub fn watch(&mut self) -> Receiver<PaginationSnapshot> {
        let (sender, receiver) = unbounded();
        self.watchers.push(sender);
        receiver
    }

    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    fn state(&self) -> (u64, u64, u64) {
        (self.current_page, self.items_per_page, self.total_items)
    }

    fn publish_if_changed(&mut self, before: (u64, u64, u64)) {
        if self.state() == before || self.watchers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.watchers.retain(|w| w.send(snapshot).is_ok());
    }
}

fn as_input(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paginator(total: i64, per_page: i64, page: i64) -> Paginator {
        let mut p = Paginator::default();
        p.initialize(1, per_page);
        p.set_total_items(total);
        p.go_to_page(page);
        p
    }

    fn assert_invariants(p: &Paginator) {
        let pages = p.total_pages();
        assert_eq!(pages == 0, p.total_items() == 0);
        assert!(p.current_page() >= 1);
        assert!(p.current_page() <= pages.max(1));
        if p.total_items() == 0 {
            assert_eq!((p.from(), p.to()), (0, 0));
        } else {
            assert!(1 <= p.from());
            assert!(p.from() <= p.to());
            assert!(p.to() <= p.total_items());
        }
    }

    #[test]
    fn test_new_defaults() {
        let p = Paginator::default();
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(p.total_items(), 0);
        assert_eq!(p.total_pages(), 0);
        assert!(!p.has_pages());
        assert_eq!(p.pagination_info(), NO_RECORDS);
    }

    #[test]
    fn test_initialize_floors_inputs() {
        let mut p = Paginator::default();
        p.initialize(-3, 0);
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.items_per_page(), 1);
        assert_eq!(p.total_items(), 0);
    }

    #[test]
    fn test_initialize_applies_requested_page_once_total_known() {
        let mut p = Paginator::default();
        p.initialize(4, 10);
        assert_eq!(p.current_page(), 1);

        p.set_total_items(100);
        assert_eq!(p.current_page(), 4);

        p.set_total_items(100);
        assert_eq!(p.current_page(), 4);
    }

    #[test]
    fn test_initialize_requested_page_clamped_to_total() {
        let mut p = Paginator::default();
        p.initialize(9, 10);
        p.set_total_items(25);
        assert_eq!(p.current_page(), 3);
    }

    #[test]
    fn test_initialize_requests_page_in_api_filters() {
        let mut p = Paginator::default();
        p.initialize(4, 10);
        assert_eq!(p.api_filters(), ApiFilters { page: 4, per_page: 10 });

        p.set_total_items(100);
        assert_eq!(p.api_filters(), ApiFilters { page: 4, per_page: 10 });

        p.initialize(9, 10);
        p.set_total_items(25);
        assert_eq!(p.api_filters().page, 3);
    }

    #[test]
    fn test_page_size_change_reanchors_requested_page() {
        let mut p = Paginator::default();
        p.initialize(4, 10);
        assert!(p.set_items_per_page(100));
        assert_eq!(p.api_filters(), ApiFilters { page: 1, per_page: 100 });

        p.set_total_items(1000);
        assert_eq!(p.current_page(), 1);
        assert_eq!((p.from(), p.to()), (1, 100));
    }

    #[test]
    fn test_page_size_shrink_keeps_requested_row() {
        let mut p = Paginator::default();
        p.initialize(3, 50);
        p.set_items_per_page(10);
        assert_eq!(p.api_filters().page, 11);

        p.set_total_items(1000);
        assert_eq!(p.from(), 101);
        assert_invariants(&p);
    }

    #[test]
    fn test_reset_drops_requested_page() {
        let mut p = Paginator::default();
        p.initialize(4, 10);
        p.reset();
        assert_eq!(p.api_filters().page, 1);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut p = Paginator::default();
        p.initialize(1, 15);
        p.set_total_items(42);
        assert_eq!(p.total_pages(), 3);
        assert_eq!((p.from(), p.to()), (1, 15));

        assert!(p.next_page());
        assert!(p.next_page());
        assert_eq!(p.current_page(), 3);
        assert_eq!((p.from(), p.to()), (31, 42));
        assert!(p.is_last_page());

        assert!(!p.next_page());
        assert_eq!(p.current_page(), 3);
    }

    #[test]
    fn test_go_to_current_page_is_noop() {
        let mut p = paginator(100, 10, 4);
        let before = p.snapshot();
        assert!(!p.go_to_page(4));
        assert_eq!(p.snapshot(), before);
    }

    #[test]
    fn test_go_to_page_clamps() {
        let mut p = paginator(100, 10, 1);
        assert!(p.go_to_page(500));
        assert_eq!(p.current_page(), 10);
        assert!(p.go_to_page(-7));
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_go_to_page_without_pages() {
        let mut p = Paginator::default();
        assert!(!p.go_to_page(3));
        assert!(!p.next_page());
        assert!(!p.last_page());
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn test_navigation_wrappers() {
        let mut p = paginator(50, 10, 1);
        assert!(!p.previous_page());
        assert!(!p.first_page());
        assert!(p.last_page());
        assert_eq!(p.current_page(), 5);
        assert!(p.previous_page());
        assert_eq!(p.current_page(), 4);
        assert!(p.first_page());
        assert!(p.is_first_page());
    }

    #[test]
    fn test_negative_total_same_as_zero() {
        let mut a = paginator(100, 10, 5);
        let mut b = paginator(100, 10, 5);
        a.set_total_items(-5);
        b.set_total_items(0);
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.current_page(), 1);
        assert_eq!(a.total_pages(), 0);
    }

    #[test]
    fn test_items_per_page_clamped() {
        let mut a = paginator(100, 10, 1);
        let mut b = paginator(100, 10, 1);
        a.set_items_per_page(0);
        b.set_items_per_page(1);
        assert_eq!(a.snapshot(), b.snapshot());

        let mut a = paginator(100, 10, 1);
        let mut b = paginator(100, 10, 1);
        a.set_items_per_page(10_000);
        b.set_items_per_page(100);
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.items_per_page(), MAX_ITEMS_PER_PAGE);
    }

    #[test]
    fn test_set_items_per_page_unchanged_returns_false() {
        let mut p = paginator(100, 10, 3);
        assert!(!p.set_items_per_page(10));
        assert_eq!(p.current_page(), 3);
    }

    #[test]
    fn test_page_size_change_reanchors() {
        let mut p = paginator(100, 15, 3);
        assert_eq!(p.from(), 31);

        assert!(p.set_items_per_page(50));
        assert_eq!(p.current_page(), 1);
        assert!(p.from() <= 31 && 31 <= p.to());
    }

    #[test]
    fn test_page_size_shrink_reanchors() {
        let mut p = paginator(100, 50, 2);
        assert_eq!(p.from(), 51);

        p.set_items_per_page(10);
        assert_eq!(p.current_page(), 6);
        assert_eq!(p.from(), 51);
    }

    #[test]
    fn test_page_size_change_on_empty_keeps_page() {
        let mut p = Paginator::default();
        assert!(p.set_items_per_page(40));
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.items_per_page(), 40);
    }

    #[test]
    fn test_shrinking_total_pulls_page_down() {
        let mut p = paginator(100, 10, 10);
        assert!(p.is_last_page());

        p.set_total_items(25);
        assert_eq!(p.total_pages(), 3);
        assert_eq!(p.current_page(), 3);
        assert_eq!((p.from(), p.to()), (21, 25));
    }

    #[test]
    fn test_reset_keeps_page_size() {
        let mut p = paginator(100, 20, 4);
        p.reset();
        assert_eq!(p.current_page(), 1);
        assert_eq!(p.total_items(), 0);
        assert_eq!(p.items_per_page(), 20);
    }

    #[test]
    fn test_page_numbers_middle() {
        let p = paginator(200, 10, 10);
        assert_eq!(p.total_pages(), 20);
        assert_eq!(p.page_numbers(7), vec![1, -1, 9, 10, 11, -1, 20]);
    }

    #[test]
    fn test_page_numbers_full_list() {
        let p = paginator(50, 10, 2);
        assert_eq!(p.page_numbers(7), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_page_numbers_near_start() {
        let p = paginator(200, 10, 4);
        assert_eq!(p.page_numbers(7), vec![1, 2, 3, 4, 5, -1, 20]);
    }

    #[test]
    fn test_page_numbers_near_end() {
        let p = paginator(200, 10, 17);
        assert_eq!(p.page_numbers(7), vec![1, -1, 16, 17, 18, 19, 20]);
    }

    #[test]
    fn test_page_numbers_empty() {
        let p = Paginator::default();
        assert!(p.page_items(7).is_empty());
    }

    #[test]
    fn test_page_window_width_bounded() {
        let mut p = paginator(1_000_000, 10, 1);
        for page in [1, 2, 5, 50_000, 99_996, 100_000] {
            p.go_to_page(page);
            let items = p.page_items(9);
            assert!(items.len() <= 9, "page {page}: {items:?}");
            assert!(items.contains(&PageItem::Page(p.current_page())));
        }
    }

    #[test]
    fn test_narrow_window_regimes() {
        let mut p = paginator(200, 10, 1);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3, -1, 20]);

        p.go_to_page(10);
        assert_eq!(p.page_numbers(5), vec![1, -1, 10, -1, 20]);
        assert_eq!(p.page_numbers(6), vec![1, -1, 10, -1, 20]);

        p.go_to_page(19);
        assert_eq!(p.page_numbers(5), vec![1, -1, 18, 19, 20]);
    }

    #[test]
    fn test_narrow_window_compresses_short_lists() {
        let p = paginator(60, 10, 1);
        assert_eq!(p.total_pages(), 6);
        assert_eq!(p.page_numbers(5), vec![1, 2, 3, -1, 6]);
        assert_eq!(p.page_numbers(6), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_narrow_window_bounded_at_every_page() {
        let mut p = paginator(200, 10, 1);
        for max_visible in MIN_VISIBLE_PAGES..=9 {
            for page in 1..=20 {
                p.go_to_page(page);
                let items = p.page_items(max_visible);
                assert!(items.len() <= max_visible, "{max_visible}/{page}: {items:?}");
                assert!(items.contains(&PageItem::Page(p.current_page())));
                assert_eq!(items.first(), Some(&PageItem::Page(1)));
                assert_eq!(items.last(), Some(&PageItem::Page(20)));
            }
        }
    }

    #[test]
    fn test_window_below_floor_is_raised() {
        let p = paginator(200, 10, 10);
        assert_eq!(p.page_items(3), p.page_items(MIN_VISIBLE_PAGES));
    }

    #[test]
    fn test_pagination_info() {
        let p = paginator(42, 15, 3);
        assert_eq!(p.pagination_info(), "Showing 31-42 of 42");
    }

    #[test]
    fn test_api_filters() {
        let p = paginator(100, 25, 2);
        let filters = p.api_filters();
        assert_eq!(filters, ApiFilters { page: 2, per_page: 25 });
        assert_eq!(filters.offset(), 25);
        assert_eq!(filters.query_string(), "page=2&per_page=25");
        assert_eq!(
            serde_json::to_string(&filters).unwrap(),
            r#"{"page":2,"per_page":25}"#
        );
    }

    #[test]
    fn test_watchers_receive_changes_only() {
        let mut p = Paginator::default();
        let rx = p.watch();

        p.set_total_items(30);
        assert!(!p.go_to_page(1));
        p.next_page();

        let seen: Vec<_> = rx.try_iter().collect();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].total_pages, 2);
        assert_eq!(seen[1].current_page, 2);
    }

    #[test]
    fn test_dropped_watchers_are_pruned() {
        let mut p = Paginator::default();
        let rx = p.watch();
        let _kept = p.watch();
        drop(rx);

        p.set_total_items(10);
        assert_eq!(p.watcher_count(), 1);
    }

    #[test]
    fn test_config_normalized() {
        let cfg = PaginationConfig {
            min_items_per_page: 0,
            max_items_per_page: 0,
            default_items_per_page: 50,
            max_visible_pages: 2,
        }
        .normalized();
        assert_eq!(cfg.min_items_per_page, 1);
        assert_eq!(cfg.max_items_per_page, 1);
        assert_eq!(cfg.default_items_per_page, 1);
        assert_eq!(cfg.max_visible_pages, MIN_VISIBLE_PAGES);
    }

    #[test]
    fn test_invariants_hold_over_operation_sequence() {
        let mut p = Paginator::default();
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut next = move || {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            seed
        };

        for _ in 0..5_000 {
            let arg = (next() % 400) as i64 - 100;
            match next() % 10 {
                0 => p.initialize(arg, arg / 3),
                1 => p.set_total_items(arg * 3),
                2 => {
                    p.go_to_page(arg);
                }
                3 => {
                    p.previous_page();
                }
                4 => {
                    p.next_page();
                }
                5 => {
                    p.first_page();
                }
                6 => {
                    p.last_page();
                }
                7 => {
                    p.set_items_per_page(arg);
                }
                8 => p.reset(),
                _ => {
                    let items = p.page_items(7);
                    assert!(items.len() <= 7);
                }
            }
            assert_invariants(&p);
        }
    }
}

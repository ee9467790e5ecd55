use std::time::Duration;

use crossbeam::channel::Receiver;
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, info};

use folio::config::Settings;
use folio::fetch::FetchManager;
use folio::key_handler::{KeyAction, KeyHandler};
use folio::screen::{Screen, ScreenContext};
use folio::state::ListingState;
use folio::status_symbols::StatusMessage;
use folio::{logging, Collection, Ledger, MemorySource, PaginationSnapshot};

// How long to wait for input before draining fetch results and redrawing
const POLL_INTERVAL: Duration = Duration::from_millis(80);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let settings = Settings::load()?;
    let _log_guard = logging::init(&settings.log_dir)?;

    let ledger = Ledger::load_or_seed(settings.data_file.as_deref())?;
    info!(
        customers = ledger.customers.len(),
        invoices = ledger.invoices.len(),
        tickets = ledger.tickets.len(),
        "ledger ready"
    );
    let source =
        MemorySource::new(ledger).with_latency(Duration::from_millis(settings.fetch_latency_ms));

    let app = App::new(&settings, source);
    let terminal = ratatui::init();
    let result = app.run(terminal);
    ratatui::restore();
    result
}

pub struct App {
    running: bool,
    screen: Screen,
    key_handler: KeyHandler,
    fetcher: FetchManager,
    /// One per collection, in `Collection::ALL` order.
    listings: Vec<ListingState>,
    page_watch: Vec<Receiver<PaginationSnapshot>>,
    active: Collection,
    show_help: bool,
    status_message: StatusMessage,
}

impl App {
    pub fn new(settings: &Settings, source: MemorySource) -> Self {
        let config = settings.pagination_config();
        let mut listings: Vec<ListingState> = Collection::ALL
            .iter()
            .map(|&c| ListingState::new(c, config))
            .collect();
        let page_watch = listings.iter_mut().map(|l| l.paginator.watch()).collect();

        Self {
            running: false,
            screen: Screen::new(),
            key_handler: KeyHandler::new(),
            fetcher: FetchManager::new(source),
            listings,
            page_watch,
            active: Collection::Customers,
            show_help: false,
            status_message: StatusMessage::default(),
        }
    }

    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        self.refresh(self.active);
        while self.running {
            self.drain_fetches();
            self.drain_page_changes();
            terminal.draw(|frame| self.render(frame))?;
            let action = self.key_handler.handle_crossterm_events(POLL_INTERVAL)?;
            if self.handle_action(action) {
                self.quit();
            }
        }
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        let totals: Vec<Option<u64>> = self
            .listings
            .iter()
            .map(|l| l.is_loaded().then(|| l.paginator.total_items()))
            .collect();
        let ctx = ScreenContext {
            status: &self.status_message,
            active: self.active,
            totals: &totals,
            loading: self.fetcher.is_loading(self.active),
            search_active: self.key_handler.search_mode,
            show_help: self.show_help,
        };
        let listing = &mut self.listings[self.active.index()];
        self.screen.render(frame, ctx, listing);
    }

    fn listing(&mut self) -> &mut ListingState {
        &mut self.listings[self.active.index()]
    }

    /// Requests the page the collection's paginator currently points at.
    fn refresh(&mut self, collection: Collection) {
        let query = self.listings[collection.index()].query();
        self.status_message =
            StatusMessage::progress(format!("Loading {} page {}", collection, query.filters.page));
        self.fetcher.spawn(query);
    }

    fn drain_fetches(&mut self) {
        while let Some(outcome) = self.fetcher.try_recv() {
            let collection = outcome.query.collection;
            let listing = &mut self.listings[collection.index()];
            match outcome.result {
                Ok(page) => {
                    if listing.apply_envelope(page) {
                        // The rows belong to a page that is no longer current.
                        self.refresh(collection);
                    } else if collection == self.active {
                        self.status_message = StatusMessage::success(format!(
                            "{}: {}",
                            collection,
                            listing.paginator.pagination_info()
                        ));
                    }
                }
                Err(e) => {
                    listing.apply_error(e.to_string());
                    if collection == self.active {
                        self.status_message =
                            StatusMessage::error(format!("Loading {} failed: {}", collection, e));
                    }
                }
            }
        }
    }

    fn drain_page_changes(&mut self) {
        for (collection, watch) in Collection::ALL.iter().zip(&self.page_watch) {
            for snapshot in watch.try_iter() {
                debug!(%collection, ?snapshot, "pagination changed");
            }
        }
    }

    /// Returns `true` when the app should quit.
    fn handle_action(&mut self, action: KeyAction) -> bool {
        let collection = self.active;
        let needs_fetch = match action {
            KeyAction::Quit => return true,
            KeyAction::Tick => {
                if self.fetcher.is_loading(collection) {
                    self.listing().tick();
                }
                false
            }
            KeyAction::Help => {
                self.show_help = !self.show_help;
                false
            }
            KeyAction::Back => {
                if self.show_help {
                    self.show_help = false;
                    false
                } else if self.key_handler.search_mode {
                    self.key_handler.search_mode = false;
                    false
                } else {
                    self.listing().clear_search()
                }
            }
            KeyAction::NextView => {
                self.active = self.active.next();
                self.key_handler.search_mode = false;
                let listing = &self.listings[self.active.index()];
                if listing.is_loaded() {
                    self.status_message = StatusMessage::info(format!(
                        "{}: {}",
                        self.active,
                        listing.paginator.pagination_info()
                    ));
                    false
                } else {
                    !self.fetcher.is_loading(self.active)
                }
            }
            KeyAction::NavigateUp => {
                self.listing().navigate_up();
                false
            }
            KeyAction::NavigateDown => {
                self.listing().navigate_down();
                false
            }
            KeyAction::PreviousPage => self.page_move(ListingState::previous_page, "first"),
            KeyAction::NextPage => self.page_move(ListingState::next_page, "last"),
            KeyAction::FirstPage => self.page_move(ListingState::first_page, "first"),
            KeyAction::LastPage => self.page_move(ListingState::last_page, "last"),
            KeyAction::GrowPageSize => self.listing().grow_page_size(),
            KeyAction::ShrinkPageSize => self.listing().shrink_page_size(),
            KeyAction::Search => {
                self.key_handler.search_mode = true;
                false
            }
            KeyAction::InputChar(c) => {
                self.key_handler.search_mode && self.listing().push_search_char(c)
            }
            KeyAction::Backspace => self.listing().pop_search_char(),
            KeyAction::Refresh => true,
            KeyAction::None => false,
        };

        if needs_fetch {
            self.refresh(self.active);
        }
        false
    }

    fn page_move(&mut self, step: fn(&mut ListingState) -> bool, edge: &str) -> bool {
        let moved = step(self.listing());
        if !moved {
            self.status_message = StatusMessage::info(format!("Already on the {} page", edge));
        }
        moved
    }

    fn quit(&mut self) {
        self.running = false;
    }
}

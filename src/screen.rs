use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::Block,
    Frame,
};

use crate::pages::help::HelpPage;
use crate::pages::listing::ListingPage;
use crate::pages::main_menu::MainMenu;
use crate::source::Collection;
use crate::state::ListingState;
use crate::status_symbols::StatusMessage;

/// Everything besides the active listing that a frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct ScreenContext<'a> {
    pub status: &'a StatusMessage,
    pub active: Collection,
    pub totals: &'a [Option<u64>],
    pub loading: bool,
    pub search_active: bool,
    pub show_help: bool,
}

#[derive(Debug, Default)]
pub struct Screen {
    main_menu: MainMenu,
    listing: ListingPage,
    help: HelpPage,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, frame: &mut Frame, ctx: ScreenContext<'_>, listing: &mut ListingState) {
        let area = frame.area();
        let title = Line::from("Folio - Business Records")
            .bold()
            .blue()
            .left_aligned();
        let block = Block::bordered().title(title);
        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        // Split into main content and bottom status bar
        let vlayout = Layout::new(
            Direction::Vertical,
            [Constraint::Min(0), Constraint::Length(1)],
        )
        .split(inner_area);

        // Inside main content, split into menu and listing area
        let layout = Layout::new(
            Direction::Horizontal,
            [Constraint::Length(24), Constraint::Min(0)],
        )
        .split(vlayout[0]);

        self.main_menu.render(frame, layout[0], ctx.active, ctx.totals);
        self.listing.render(frame, layout[1], listing, ctx.loading, ctx.search_active);

        let mut spans = ctx.status.spans();
        spans.push(Span::raw(
            "  |  Tab: Next listing  ←→: Page  +/-: Page size  ?: Help  q: Quit",
        ));
        let status_line = Line::from(spans).on_dark_gray().white();
        frame.render_widget(status_line, vlayout[1]);

        if ctx.show_help {
            self.help.render(frame, centered(area, 80, 26));
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    cell
}

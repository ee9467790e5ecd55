use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Cell, Paragraph, Row, Table},
    Frame,
};
use throbber_widgets_tui::{Throbber, WhichUse, BRAILLE_SIX};

use crate::state::ListingState;
use crate::ui_utils::{create_table_state, focused_block, page_control_line, render_search_bar};

#[derive(Debug)]
pub struct ListingPage;

impl Default for ListingPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingPage {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        listing: &mut ListingState,
        loading: bool,
        search_active: bool,
    ) {
        let sections = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(3),
            ],
        )
        .split(area);

        render_search_bar(frame, sections[0], &listing.search, search_active);
        self.render_table(frame, sections[1], listing, !search_active);
        self.render_footer(frame, sections[2], listing, loading);
    }

    fn render_table(&self, frame: &mut Frame, area: Rect, listing: &ListingState, focused: bool) {
        let columns = listing.collection.columns();
        let header = Row::new(columns.iter().map(|c| Cell::from(*c).bold()))
            .style(Style::new().yellow())
            .bottom_margin(1);

        let rows: Vec<Row> = listing
            .rows
            .iter()
            .map(|cells| Row::new(cells.iter().map(|c| Cell::from(c.as_str()))))
            .collect();
        let widths = vec![Constraint::Fill(1); columns.len()];

        let title = match &listing.last_error {
            Some(_) => format!("{} (stale)", listing.collection),
            None => listing.collection.to_string(),
        };

        if rows.is_empty() {
            let message = if listing.is_loaded() {
                listing.paginator.pagination_info()
            } else {
                "Loading...".to_string()
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(message, Style::new().gray())).centered())
                    .block(focused_block(&title, focused)),
                area,
            );
            return;
        }

        let mut state = create_table_state(listing.selected_row, rows.len());
        frame.render_stateful_widget(
            Table::new(rows, widths)
                .header(header)
                .block(focused_block(&title, focused))
                .row_highlight_style(Style::new().reversed())
                .highlight_symbol(">> "),
            area,
            &mut state,
        );
    }

    fn render_footer(
        &self,
        frame: &mut Frame,
        area: Rect,
        listing: &mut ListingState,
        loading: bool,
    ) {
        let block = Block::bordered().title("Pages");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let cols = Layout::new(
            Direction::Horizontal,
            [
                Constraint::Min(20),
                Constraint::Length(28),
                Constraint::Length(16),
            ],
        )
        .split(inner);

        let pager = &listing.paginator;
        let control = page_control_line(
            &pager.default_page_items(),
            pager.current_page(),
            pager.is_first_page(),
            pager.is_last_page(),
        );
        frame.render_widget(Paragraph::new(control), cols[0]);
        frame.render_widget(
            Paragraph::new(pager.pagination_info()).gray().right_aligned(),
            cols[1],
        );

        if loading {
            let throbber = Throbber::default()
                .label("Loading")
                .style(Style::new().cyan())
                .throbber_set(BRAILLE_SIX)
                .use_type(WhichUse::Spin);
            frame.render_stateful_widget(throbber, cols[2], &mut listing.throbber);
        } else {
            frame.render_widget(
                Paragraph::new(format!("{}/page", pager.items_per_page())).right_aligned(),
                cols[2],
            );
        }
    }
}

use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph, TableState},
    Frame,
};

use crate::pagination::PageItem;

/// Creates a TableState with the selection clamped to the row count
pub fn create_table_state(selected: usize, row_count: usize) -> TableState {
    if row_count == 0 {
        TableState::default()
    } else {
        TableState::default().with_selected(Some(selected.min(row_count - 1)))
    }
}

/// Creates a block with conditional focus styling (yellow border when focused)
pub fn focused_block(title: &str, is_focused: bool) -> Block<'_> {
    let block = Block::bordered().title(title);
    if is_focused {
        block.border_style(Style::new().yellow())
    } else {
        block
    }
}

/// Builds the page-number control: `‹ 1 … 9 [10] 11 … 20 ›`
///
/// The current page is bracketed and highlighted; arrows dim at either end.
pub fn page_control_line(
    items: &[PageItem],
    current: u64,
    is_first: bool,
    is_last: bool,
) -> Line<'static> {
    let arrow = |symbol: &'static str, disabled: bool| {
        if disabled {
            Span::styled(symbol, Style::new().dark_gray())
        } else {
            Span::styled(symbol, Style::new().cyan().bold())
        }
    };

    let mut spans = vec![arrow("‹", is_first), Span::raw(" ")];
    for item in items {
        match *item {
            PageItem::Page(n) if n == current => {
                spans.push(Span::styled(format!("[{n}]"), Style::new().black().on_cyan().bold()))
            }
            PageItem::Page(n) => spans.push(Span::raw(n.to_string())),
            PageItem::Gap => spans.push(Span::styled("…", Style::new().gray())),
        }
        spans.push(Span::raw(" "));
    }
    spans.push(arrow("›", is_last));
    Line::from(spans)
}

/// Renders the search bar; a cursor block is shown while typing
pub fn render_search_bar(frame: &mut Frame, area: Rect, input: &str, active: bool) {
    let content = if active {
        Line::from(vec![
            Span::styled("/ ", Style::new().yellow()),
            Span::raw(input.to_string()),
            Span::styled("█", Style::new().yellow()),
        ])
    } else if input.is_empty() {
        Line::from(Span::styled("Press / to search", Style::new().gray()))
    } else {
        Line::from(vec![
            Span::styled("Filter: ", Style::new().gray()),
            Span::raw(input.to_string()),
        ])
    };

    frame.render_widget(
        Paragraph::new(content).block(focused_block("Search", active)),
        area,
    );
}

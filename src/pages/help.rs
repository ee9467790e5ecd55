use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

#[derive(Debug)]
pub struct HelpPage;

impl Default for HelpPage {
    fn default() -> Self {
        Self::new()
    }
}

fn key_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:<12}"), Style::new().bold().cyan()),
        Span::raw(description),
    ])
}

impl HelpPage {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::new().bg(Color::Black)), area);

        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7),
                Constraint::Length(8),
                Constraint::Min(0),
            ])
            .split(area);

        let navigation = vec![
            key_line("↑↓ / k j", "Select row"),
            key_line("Tab", "Next listing"),
            key_line("/ , Ctrl-F", "Search the current listing"),
            key_line("Esc", "Leave search or close help"),
            key_line("q / Ctrl-C", "Quit"),
        ];
        frame.render_widget(
            Paragraph::new(navigation).block(Block::bordered().title("Navigation")),
            sections[0],
        );

        let paging = vec![
            key_line("← → / h l", "Previous / next page"),
            key_line("PgUp PgDn", "Previous / next page"),
            key_line("Home / g", "First page"),
            key_line("End / G", "Last page"),
            key_line("+ / -", "Larger / smaller pages"),
            key_line("r", "Reload current page"),
        ];
        frame.render_widget(
            Paragraph::new(paging).block(Block::bordered().title("Paging")),
            sections[1],
        );

        let tips = vec![
            Line::from("💡 Changing the page size keeps your first visible row on screen"),
            Line::from("💡 Each listing remembers its own page, size and search"),
            Line::from("💡 Searching starts again from page 1"),
        ];
        frame.render_widget(
            Paragraph::new(tips).block(Block::bordered().title("Tips")),
            sections[2],
        );
    }
}

use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, List, ListItem, ListState},
    Frame,
};

use crate::source::Collection;

#[derive(Debug)]
pub struct MainMenu {
    pub menu_items: Vec<Collection>,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            menu_items: Collection::ALL.to_vec(),
        }
    }

    /// Renders the listing menu; `totals` are shown beside each entry once known.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        active: Collection,
        totals: &[Option<u64>],
    ) {
        let items: Vec<ListItem> = self
            .menu_items
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let label = match totals.get(i).copied().flatten() {
                    Some(total) => format!("{c} ({total})"),
                    None => c.to_string(),
                };
                ListItem::new(Line::from(label))
            })
            .collect();

        let selected = self.menu_items.iter().position(|c| *c == active);
        let mut state = ListState::default().with_selected(selected);

        frame.render_stateful_widget(
            List::new(items)
                .block(Block::bordered().title("Listings").green())
                .highlight_style(Style::new().reversed())
                .highlight_symbol(">> ")
                .repeat_highlight_symbol(true),
            area,
            &mut state,
        );
    }
}

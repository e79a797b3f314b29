//! Example picker.

use crate::state::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .examples
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{}] ", slot_key(index)),
                    Style::default().fg(app.theme.secondary),
                ),
                Span::styled(entry.name.clone(), Style::default().fg(app.theme.text)),
                Span::styled(
                    format!("  {}", entry.description),
                    Style::default().fg(app.theme.text_dim),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(Block::default().title("Examples").borders(Borders::ALL));
    f.render_widget(list, area);
}

/// Key hint shown next to the example at `index`.
pub fn slot_key(index: usize) -> String {
    if index < 4 {
        format!("F{}", index + 1)
    } else if index < 9 {
        format!("Alt+{}", index + 1)
    } else {
        "-".to_string()
    }
}

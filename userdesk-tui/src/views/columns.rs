//! Column visibility menu.

use super::helpers::{centered_rect, checkbox};
use crate::state::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let popup = centered_rect(40, 50, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled("Toggle columns", app.theme.header_style()))
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let search = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(app.theme.primary)),
        Span::styled(app.column_menu.search.as_str(), Style::default().fg(app.theme.text)),
        Span::styled("_", Style::default().fg(app.theme.primary)),
    ]);
    f.render_widget(Paragraph::new(search), chunks[0]);

    let columns = app.column_menu_items();
    if columns.is_empty() {
        f.render_widget(
            Paragraph::new("No columns found.").style(app.theme.muted_style()),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = columns
        .iter()
        .map(|column| {
            let visible = app.visibility.is_visible(&column.id);
            ListItem::new(format!("{} {}", checkbox(Some(visible)), column.label))
        })
        .collect();
    let list = List::new(items).highlight_style(app.theme.cursor_style());
    let mut state = ListState::default();
    state.select(Some(app.column_menu.cursor));
    f.render_stateful_widget(list, chunks[1], &mut state);
}

//! Keybinding reference overlay.

use super::helpers::centered_rect;
use crate::state::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub const TABLE_KEYS: &[(&str, &str)] = &[
    ("j/k, arrows", "move between rows"),
    ("h/l, PgUp/PgDn", "previous / next page"),
    ("g/G", "first / last page"),
    ("Left/Right", "focus column"),
    ("s", "sort focused column"),
    ("Space / A", "select row / page"),
    ("y", "copy email"),
    ("1-5", "rows per page"),
    ("/", "filter names"),
    ("v", "toggle columns"),
    ("f, Ctrl+Shift+F", "open filters"),
    ("Backspace", "remove last filter"),
    ("r", "reload users"),
    ("q", "quit"),
];

pub const FILTER_KEYS: &[(&str, &str)] = &[
    ("a", "add filter"),
    ("d / Backspace", "remove selected / last"),
    ("c", "change column"),
    ("o", "change operator"),
    ("Enter", "edit value"),
    ("t", "toggle and / or"),
    ("K/J", "move filter up / down"),
    ("R", "reset filters"),
];

fn section<'a>(title: &'a str, keys: &'a [(&'a str, &'a str)], app: &App) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled(title, app.theme.header_style()))];
    lines.extend(keys.iter().map(|(key, description)| {
        Line::from(vec![
            Span::styled(format!("  {:<18}", key), Style::default().fg(app.theme.tertiary)),
            Span::styled(*description, Style::default().fg(app.theme.text)),
        ])
    }));
    lines
}

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let popup = centered_rect(60, 80, area);
    f.render_widget(Clear, popup);

    let mut lines = section("Table", TABLE_KEYS, app);
    lines.push(Line::from(""));
    lines.extend(section("Filters", FILTER_KEYS, app));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        app.theme.muted_style(),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(app.focus.title(), app.theme.header_style()))
            .borders(Borders::ALL)
            .border_style(app.theme.border_style(true)),
    );
    f.render_widget(paragraph, popup);
}

//! Screen rendering.

pub mod columns;
pub mod filters;
pub mod help;
pub mod helpers;
pub mod users;

use crate::nav::Focus;
use crate::notifications::NotificationLevel;
use crate::state::App;
use crate::theme::notification_color;
use crate::widgets::{FilterBar, PaginationFooter, StatusIndicator};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_view(f: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.size());

    render_header(f, app, layout[0]);
    render_toolbar(f, app, layout[1]);
    users::render(f, app, layout[2]);
    render_pagination(f, app, layout[3]);
    render_status_line(f, app, layout[4]);

    let screen = f.size();
    if app.filter_panel.open {
        filters::render(f, app, screen);
    }
    match app.focus {
        Focus::ColumnMenu => columns::render(f, app, screen),
        Focus::Help => help::render(f, app, screen),
        _ => {}
    }
}

fn render_header(f: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let title = Line::from(vec![
        Span::styled("Users", app.theme.header_style()),
        Span::styled("  Manage your users here.", app.theme.muted_style()),
    ]);
    f.render_widget(Paragraph::new(title), inner);
    StatusIndicator::for_load_state(&app.load_state, app.users.len(), &app.theme).render(f, inner);
}

fn render_toolbar(f: &mut Frame<'_>, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let editing = app.focus == Focus::QuickFilter;
    let placeholder = app
        .catalog
        .get(&app.quick_filter.column_id)
        .and_then(|c| c.placeholder.clone())
        .unwrap_or_default();
    let text = if app.quick_filter.text.is_empty() && !editing {
        Span::styled(placeholder, app.theme.muted_style())
    } else {
        let cursor = if editing { "_" } else { "" };
        Span::styled(
            format!("{}{}", app.quick_filter.text, cursor),
            Style::default().fg(app.theme.text),
        )
    };
    let quick = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title("/ Filter")
            .borders(Borders::ALL)
            .border_style(app.theme.border_style(editing)),
    );
    f.render_widget(quick, chunks[0]);

    let filters = app.filters();
    FilterBar {
        title: "Filters [f]",
        filters: &filters,
        catalog: &app.catalog,
        theme: &app.theme,
        focused: app.filter_panel.open,
    }
    .render(f, chunks[1]);
}

fn render_pagination(f: &mut Frame<'_>, app: &App, area: Rect) {
    let model = app.row_model();
    PaginationFooter {
        pagination: app.pagination,
        filtered_count: model.filtered_count,
        selected_count: app.filtered_selection_count(),
        theme: &app.theme,
    }
    .render(f, area);
}

fn render_status_line(f: &mut Frame<'_>, app: &App, area: Rect) {
    let line = match app.notifications.last() {
        Some(note) => {
            let label = match note.level {
                NotificationLevel::Info => "INFO",
                NotificationLevel::Warning => "WARN",
                NotificationLevel::Error => "ERROR",
                NotificationLevel::Success => "OK",
            };
            let color = notification_color(note.level, &app.theme);
            let mut spans = vec![Span::styled(
                format!("{}: {}", label, note.message),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )];
            if let Some(hint) = note.action_hint() {
                spans.push(Span::styled(format!("  [{}]", hint), app.theme.muted_style()));
            }
            Line::from(spans)
        }
        None => Line::from(Span::styled(
            format!("{} • ? help • q quit", app.focus.title()),
            app.theme.muted_style(),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

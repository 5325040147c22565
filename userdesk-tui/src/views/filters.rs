//! Advanced filter panel and the value editor popup.

use super::helpers::{centered_rect, checkbox};
use crate::nav::Focus;
use crate::state::{App, ValueEditor};
use crate::theme::{filter_value_color, join_operator_color};
use crate::widgets::display_value;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use userdesk_core::operator::operator_label;
use userdesk_core::range::{format_bound, slider_step, Bound};
use userdesk_core::FilterCollection;

const PANEL_HINT: &str =
    "a add • d remove • c column • o operator • Enter value • t and/or • K/J move • R reset • Esc close";

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let popup = centered_rect(80, 60, area);
    f.render_widget(Clear, popup);

    let filters = app.filters();
    let focused = app.focus == Focus::FilterPanel;
    let title = if filters.is_empty() {
        "Filters".to_string()
    } else {
        format!("Filters ({})", filters.len())
    };
    let block = Block::default()
        .title(Span::styled(title, app.theme.header_style()))
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(focused));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    if filters.is_empty() {
        let lines = vec![
            Line::from(Span::styled(
                "No filters applied",
                Style::default().fg(app.theme.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Add filters to refine your rows.",
                app.theme.muted_style(),
            )),
        ];
        f.render_widget(Paragraph::new(lines), chunks[0]);
    } else {
        let items = filter_rows(app, &filters);
        let list = List::new(items).highlight_style(app.theme.cursor_style());
        let mut state = ListState::default();
        state.select(Some(app.filter_panel.selected));
        f.render_stateful_widget(list, chunks[0], &mut state);
    }

    f.render_widget(
        Paragraph::new(PANEL_HINT).style(app.theme.muted_style()),
        chunks[1],
    );

    if let Some(editor) = &app.value_editor {
        render_editor(f, app, area, editor);
    }
}

fn filter_rows<'a>(app: &App, filters: &FilterCollection) -> Vec<ListItem<'a>> {
    filters
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let join = filters.join_label(index);
            let join_style = if index == 0 {
                app.theme.muted_style()
            } else {
                Style::default().fg(join_operator_color(filters.join_operator, &app.theme))
            };
            let column = app
                .catalog
                .get(&entry.column_id)
                .map(|c| c.label.clone())
                .unwrap_or_else(|| entry.column_id.clone());
            let operator = operator_label(entry.variant, entry.operator)
                .unwrap_or_else(|| entry.operator.as_str());
            let value = if entry.operator.ignores_value() {
                String::new()
            } else if entry.value.is_blank() {
                "Enter a value...".to_string()
            } else {
                display_value(entry, &app.catalog)
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<6}", join), join_style),
                Span::styled(format!("{:<14}", column), Style::default().fg(app.theme.primary)),
                Span::styled(format!("{:<20}", operator), Style::default().fg(app.theme.secondary)),
                Span::styled(
                    value,
                    Style::default().fg(filter_value_color(&entry.value, &app.theme)),
                ),
            ]))
        })
        .collect()
}

fn render_editor(f: &mut Frame<'_>, app: &App, area: Rect, editor: &ValueEditor) {
    let popup = centered_rect(50, 30, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(app.focus.title(), app.theme.header_style()))
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    match editor {
        ValueEditor::Text { input, variant, .. } => {
            let hint = if variant.is_temporal() {
                "Pick a date (YYYY-MM-DD)"
            } else {
                "Enter a value..."
            };
            let lines = vec![
                input_line("Value", input, true, app),
                Line::from(""),
                Line::from(Span::styled(hint, app.theme.muted_style())),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
        ValueEditor::Pair {
            from,
            to,
            bound,
            dates,
            limits,
            ..
        } => {
            let mut lines = vec![
                input_line("From", from, *bound == Bound::Min, app),
                input_line("To", to, *bound == Bound::Max, app),
                Line::from(""),
            ];
            if !*dates && limits.0.is_finite() && limits.1.is_finite() {
                lines.push(Line::from(Span::styled(
                    format!(
                        "Range {} - {}, step {}",
                        format_bound(&limits.0.to_string()),
                        format_bound(&limits.1.to_string()),
                        slider_step(limits.0, limits.1)
                    ),
                    app.theme.muted_style(),
                )));
            }
            if let Some(error) = &app.filter_panel.input_error {
                lines.push(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(app.theme.error),
                )));
            }
            lines.push(Line::from(Span::styled(
                "Tab switch bound • Enter done • Esc close",
                app.theme.muted_style(),
            )));
            f.render_widget(Paragraph::new(lines), inner);
        }
        ValueEditor::Options {
            options,
            cursor,
            chosen,
            ..
        } => {
            if options.is_empty() {
                f.render_widget(
                    Paragraph::new("No options found.").style(app.theme.muted_style()),
                    inner,
                );
                return;
            }
            let items: Vec<ListItem> = options
                .iter()
                .map(|option| {
                    let checked = chosen.contains(&option.value);
                    let count = option
                        .count
                        .map(|c| format!(" ({})", c))
                        .unwrap_or_default();
                    ListItem::new(format!("{} {}{}", checkbox(Some(checked)), option.label, count))
                })
                .collect();
            let list = List::new(items).highlight_style(app.theme.cursor_style());
            let mut state = ListState::default();
            state.select(Some(*cursor));
            f.render_stateful_widget(list, inner, &mut state);
        }
    }
}

fn input_line<'a>(label: &'a str, value: &'a str, active: bool, app: &App) -> Line<'a> {
    let value_style = if active {
        Style::default()
            .fg(app.theme.text)
            .add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default().fg(app.theme.text_dim)
    };
    let cursor = if active { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{:<6}", label), Style::default().fg(app.theme.primary)),
        Span::styled(value, value_style),
        Span::styled(cursor, Style::default().fg(app.theme.primary)),
    ])
}

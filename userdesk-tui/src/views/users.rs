//! Users table view.

use super::helpers::checkbox;
use crate::nav::Focus;
use crate::state::{App, LoadState};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use userdesk_core::TableRow;

const CHECKBOX_WIDTH: u16 = 4;
const SKELETON_CELL: &str = "░░░░░░░░░░";

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let focused = app.focus == Focus::Table;
    let block = Block::default()
        .title(Span::styled("Users", app.theme.header_style()))
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(focused));

    match &app.load_state {
        LoadState::Loading if app.users.is_empty() => render_skeleton(f, app, area, block),
        LoadState::Failed(message) if app.users.is_empty() => {
            render_error(f, app, area, block, message)
        }
        _ => render_table(f, app, area, block),
    }
}

fn column_widths(app: &App) -> Vec<Constraint> {
    std::iter::once(Constraint::Length(CHECKBOX_WIDTH))
        .chain(app.visible_columns().iter().map(|c| Constraint::Length(c.width)))
        .collect()
}

fn render_table(f: &mut Frame<'_>, app: &App, area: Rect, block: Block<'_>) {
    let columns = app.visible_columns();
    let model = app.row_model();

    if model.is_empty() {
        let empty = Paragraph::new("No results.")
            .alignment(Alignment::Center)
            .style(app.theme.muted_style())
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let page_selected = model
        .page_rows
        .iter()
        .filter(|r| app.selection.is_selected(r.row_id()))
        .count();
    let header_check = match page_selected {
        0 => Some(false),
        n if n == model.page_rows.len() => Some(true),
        _ => None,
    };

    let header_cells = std::iter::once(Cell::from(checkbox(header_check))).chain(
        columns.iter().enumerate().map(|(index, column)| {
            let indicator = app
                .sorting
                .direction_of(&column.id)
                .map(|d| format!(" {}", d.indicator()))
                .unwrap_or_default();
            let mut style = app.theme.header_style();
            if index == app.focused_column {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            Cell::from(Span::styled(format!("{}{}", column.label, indicator), style))
        }),
    );

    let rows = model.page_rows.iter().map(|row| {
        let selected = app.selection.is_selected(row.row_id());
        let cells = std::iter::once(Cell::from(checkbox(Some(selected))))
            .chain(columns.iter().map(|column| Cell::from(row.cell(&column.id))));
        let style = if selected {
            app.theme.selected_row_style()
        } else {
            Style::default().fg(app.theme.text)
        };
        Row::new(cells).style(style)
    });

    let table = Table::new(rows, column_widths(app))
        .header(Row::new(header_cells).bottom_margin(1))
        .block(block)
        .highlight_style(app.theme.cursor_style());

    let mut state = TableState::default();
    state.select(Some(app.cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_skeleton(f: &mut Frame<'_>, app: &App, area: Rect, block: Block<'_>) {
    let columns = app.visible_columns();
    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(columns.iter().map(|c| Cell::from(c.label.as_str()))),
    )
    .style(app.theme.header_style());

    let rows = (0..app.pagination.page_size).map(|_| {
        Row::new(
            std::iter::once(Cell::from(""))
                .chain(columns.iter().map(|_| Cell::from(SKELETON_CELL))),
        )
        .style(Style::default().fg(app.theme.text_muted))
    });

    let table = Table::new(rows, column_widths(app))
        .header(header.bottom_margin(1))
        .block(block);
    f.render_widget(table, area);
}

fn render_error(f: &mut Frame<'_>, app: &App, area: Rect, block: Block<'_>, message: &str) {
    let lines = vec![
        Line::from(Span::styled(
            "Error loading users",
            Style::default()
                .fg(app.theme.error)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(message.to_string(), app.theme.muted_style())),
        Line::from(""),
        Line::from(Span::styled("r: retry", Style::default().fg(app.theme.primary))),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(paragraph, area);
}

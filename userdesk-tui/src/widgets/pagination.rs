//! Table footer: selection count, page size and page position.

use crate::theme::SynthBruteTheme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use userdesk_core::table::{Pagination, PAGE_SIZES};

pub struct PaginationFooter<'a> {
    pub pagination: Pagination,
    pub filtered_count: usize,
    pub selected_count: usize,
    pub theme: &'a SynthBruteTheme,
}

impl<'a> PaginationFooter<'a> {
    pub fn selection_text(&self) -> String {
        format!(
            "{} of {} row(s) selected.",
            self.selected_count, self.filtered_count
        )
    }

    pub fn page_text(&self) -> String {
        format!(
            "Page {} of {}",
            self.pagination.page_index + 1,
            self.pagination.page_count(self.filtered_count)
        )
    }

    fn page_size_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![Span::styled("Rows per page ", self.theme.muted_style())];
        for (index, size) in PAGE_SIZES.iter().enumerate() {
            let style = if *size == self.pagination.page_size {
                self.theme.header_style()
            } else {
                self.theme.muted_style()
            };
            spans.push(Span::styled(format!("{}:{} ", index + 1, size), style));
        }
        spans
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(35),
                Constraint::Percentage(40),
                Constraint::Percentage(25),
            ])
            .split(area);

        let nav_style = |enabled: bool| {
            if enabled {
                Style::default().fg(self.theme.text)
            } else {
                Style::default().fg(self.theme.text_muted)
            }
        };
        let nav = Line::from(vec![
            Span::styled("« ‹ ", nav_style(self.pagination.can_previous())),
            Span::styled(self.page_text(), Style::default().fg(self.theme.text)),
            Span::styled(" › »", nav_style(self.pagination.can_next(self.filtered_count))),
        ]);

        f.render_widget(
            Paragraph::new(self.selection_text()).style(self.theme.muted_style()),
            chunks[0],
        );
        f.render_widget(Paragraph::new(Line::from(self.page_size_spans())), chunks[1]);
        f.render_widget(Paragraph::new(nav), chunks[2]);
    }
}

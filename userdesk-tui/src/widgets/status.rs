//! Load status indicator shown in the header.

use crate::state::LoadState;
use crate::theme::SynthBruteTheme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

pub struct StatusIndicator {
    pub status: String,
    pub style: Style,
}

impl StatusIndicator {
    pub fn for_load_state(state: &LoadState, user_count: usize, theme: &SynthBruteTheme) -> Self {
        let (status, color) = match state {
            LoadState::Loading => ("Loading users...".to_string(), theme.tertiary),
            LoadState::Loaded => (format!("{} users loaded from the API", user_count), theme.success),
            LoadState::Failed(_) => ("Error loading users".to_string(), theme.error),
        };
        Self {
            status,
            style: Style::default().fg(color),
        }
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let paragraph = Paragraph::new(self.status.as_str())
            .style(self.style)
            .alignment(Alignment::Right);
        f.render_widget(paragraph, area);
    }
}

//! SynthBrute theme and the styles the users screen derives from it.

use crate::notifications::NotificationLevel;
use ratatui::style::{Color, Modifier, Style};
use userdesk_core::{FilterValue, JoinOperator};

#[derive(Debug, Clone)]
pub struct SynthBruteTheme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub primary_dim: Color,
    pub secondary: Color,
    pub tertiary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub text: Color,
    pub text_dim: Color,
    pub text_muted: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl SynthBruteTheme {
    pub fn synthbrute() -> Self {
        Self {
            bg: Color::Rgb(10, 10, 10),
            bg_highlight: Color::Rgb(42, 42, 42),
            primary: Color::Rgb(0, 255, 255),
            primary_dim: Color::Rgb(0, 136, 136),
            secondary: Color::Rgb(255, 0, 255),
            tertiary: Color::Rgb(255, 255, 0),
            success: Color::Rgb(0, 255, 0),
            warning: Color::Rgb(255, 191, 0),
            error: Color::Rgb(255, 0, 0),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(136, 136, 136),
            text_muted: Color::Rgb(68, 68, 68),
            border: Color::Rgb(68, 68, 68),
            border_focus: Color::Rgb(0, 255, 255),
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.border_focus } else { self.border })
    }

    pub fn header_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn cursor_style(&self) -> Style {
        Style::default()
            .bg(self.bg_highlight)
            .fg(self.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected_row_style(&self) -> Style {
        Style::default().fg(self.secondary)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_dim)
    }
}

pub fn notification_color(level: NotificationLevel, theme: &SynthBruteTheme) -> Color {
    match level {
        NotificationLevel::Info => theme.primary,
        NotificationLevel::Success => theme.success,
        NotificationLevel::Warning => theme.warning,
        NotificationLevel::Error => theme.error,
    }
}

pub fn join_operator_color(join: JoinOperator, theme: &SynthBruteTheme) -> Color {
    match join {
        JoinOperator::And => theme.primary_dim,
        JoinOperator::Or => theme.tertiary,
    }
}

/// Blank filter values are shown dimmed so unset filters stand out.
pub fn filter_value_color(value: &FilterValue, theme: &SynthBruteTheme) -> Color {
    if value.is_blank() {
        theme.text_muted
    } else {
        theme.text
    }
}

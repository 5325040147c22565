//! Active filter chips shown in the toolbar.

use crate::theme::{filter_value_color, join_operator_color, SynthBruteTheme};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use userdesk_core::format::format_millis_date;
use userdesk_core::operator::operator_label;
use userdesk_core::{ColumnCatalog, FilterCollection, FilterEntry, FilterValue};

/// One filter, summarised as `Column operator value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub label: String,
    pub value: FilterValue,
}

/// The entry's value as the user would read it: option labels, formatted
/// dates, nothing for value-less operators.
pub fn display_value(entry: &FilterEntry, catalog: &ColumnCatalog) -> String {
    let column = catalog.get(&entry.column_id);
    let show = |text: &str| {
        if entry.variant.is_temporal() {
            format_millis_date(text)
        } else {
            column.map(|c| c.option_label(text)).unwrap_or(text).to_string()
        }
    };
    match &entry.value {
        _ if entry.operator.ignores_value() => String::new(),
        FilterValue::Scalar(v) => show(v.as_str()),
        FilterValue::Pair(from, to) if from.is_empty() && to.is_empty() => String::new(),
        FilterValue::Pair(from, to) => format!("{} - {}", show(from.as_str()), show(to.as_str())),
        FilterValue::List(items) => items
            .iter()
            .map(|v| show(v.as_str()))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

impl FilterChip {
    pub fn from_entry(entry: &FilterEntry, catalog: &ColumnCatalog) -> Self {
        let column = catalog.get(&entry.column_id);
        let column_label = column.map(|c| c.label.as_str()).unwrap_or(entry.column_id.as_str());
        let operator = operator_label(entry.variant, entry.operator)
            .unwrap_or_else(|| entry.operator.as_str())
            .to_lowercase();

        let value = display_value(entry, catalog);

        let label = if value.is_empty() {
            format!("{} {}", column_label, operator)
        } else {
            format!("{} {} {}", column_label, operator, value)
        };
        Self {
            label,
            value: entry.value.clone(),
        }
    }
}

pub struct FilterBar<'a> {
    pub title: &'a str,
    pub filters: &'a FilterCollection,
    pub catalog: &'a ColumnCatalog,
    pub theme: &'a SynthBruteTheme,
    pub focused: bool,
}

impl<'a> FilterBar<'a> {
    pub fn chips(&self) -> Vec<FilterChip> {
        self.filters
            .iter()
            .map(|entry| FilterChip::from_entry(entry, self.catalog))
            .collect()
    }

    pub fn render(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans: Vec<Span> = Vec::new();
        if self.filters.is_empty() {
            spans.push(Span::styled("No filters applied", self.theme.muted_style()));
        }
        for (index, chip) in self.chips().into_iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(
                    format!(" {} ", self.filters.join_operator),
                    Style::default()
                        .fg(join_operator_color(self.filters.join_operator, self.theme))
                        .add_modifier(Modifier::BOLD),
                ));
            }
            spans.push(Span::styled(
                format!("[{}]", chip.label),
                Style::default().fg(filter_value_color(&chip.value, self.theme)),
            ));
        }

        let title = format!("{} ({})", self.title, self.filters.len());
        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(self.theme.border_style(self.focused)),
        );
        f.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userdesk_core::user::users_catalog;
    use userdesk_core::{FilterId, FilterOperator, FilterVariant};

    fn entry(column: &str, variant: FilterVariant, operator: FilterOperator, value: FilterValue) -> FilterEntry {
        let mut entry = FilterEntry::with_filter_id(FilterId::new("abc"), column, variant);
        entry.operator = operator;
        entry.value = value;
        entry
    }

    #[test]
    fn test_chip_label_uses_column_and_operator_labels() {
        let catalog = users_catalog();
        let chip = FilterChip::from_entry(
            &entry("name", FilterVariant::Text, FilterOperator::Contains, FilterValue::Scalar("Omar".into())),
            &catalog,
        );
        assert_eq!(chip.label, "Name contains Omar");
    }

    #[test]
    fn test_chip_for_valueless_operator() {
        let catalog = users_catalog();
        let chip = FilterChip::from_entry(
            &entry("mobile", FilterVariant::Text, FilterOperator::IsEmpty, FilterValue::default()),
            &catalog,
        );
        assert_eq!(chip.label, "Mobile is empty");
    }

    #[test]
    fn test_chip_formats_dates() {
        let catalog = users_catalog();
        let chip = FilterChip::from_entry(
            &entry(
                "createdAt",
                FilterVariant::Date,
                FilterOperator::Equals,
                FilterValue::Scalar("1709164800000".into()),
            ),
            &catalog,
        );
        assert_eq!(chip.label, "Created At is 29 Feb 2024");
    }
}

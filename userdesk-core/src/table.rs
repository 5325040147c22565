//! Table model: column definitions, sorting, visibility, pagination, row
//! selection and the row pipeline feeding the users view.

use crate::operator::FilterVariant;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Page sizes offered by the pagination footer.
pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 40, 50];

pub const DEFAULT_PAGE_SIZE: usize = 10;

// ============================================================================
// COLUMNS
// ============================================================================

/// Choice offered by select and multiSelect columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOption {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ColumnOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            count: None,
        }
    }
}

/// Definition of one table column and how it can be filtered.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub id: String,
    pub label: String,
    pub variant: FilterVariant,
    pub width: u16,
    pub filterable: bool,
    pub sortable: bool,
    pub hideable: bool,
    pub placeholder: Option<String>,
    pub options: Vec<ColumnOption>,
    pub range: Option<(f64, f64)>,
}

impl ColumnDef {
    pub fn new(id: impl Into<String>, label: impl Into<String>, variant: FilterVariant) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            variant,
            width: 16,
            filterable: true,
            sortable: true,
            hideable: true,
            placeholder: None,
            options: Vec::new(),
            range: None,
        }
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_options(mut self, options: Vec<ColumnOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn not_hideable(mut self) -> Self {
        self.hideable = false;
        self
    }

    /// Label of an option value, falling back to the value itself.
    pub fn option_label<'a>(&'a self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map(|o| o.label.as_str())
            .unwrap_or(value)
    }
}

/// Ordered set of columns of one table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnCatalog {
    columns: Vec<ColumnDef>,
}

impl ColumnCatalog {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn filterable_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.filterable)
    }

    /// Ids a decoded filter entry may reference.
    pub fn filterable_ids(&self) -> Vec<String> {
        self.filterable_columns().map(|c| c.id.clone()).collect()
    }

    pub fn first_filterable(&self) -> Option<&ColumnDef> {
        self.filterable_columns().next()
    }

    /// The filterable column after `current`, wrapping around. Starts at the
    /// first filterable column when `current` is not one.
    pub fn next_filterable(&self, current: &str) -> Option<&ColumnDef> {
        let filterable: Vec<&ColumnDef> = self.filterable_columns().collect();
        let next = filterable
            .iter()
            .position(|c| c.id == current)
            .map(|i| (i + 1) % filterable.len())
            .unwrap_or(0);
        filterable.get(next).copied()
    }
}

// ============================================================================
// SORTING
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn indicator(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Single-column sort.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortingState {
    sort: Option<(String, SortDirection)>,
}

impl SortingState {
    pub fn column(&self) -> Option<(&str, SortDirection)> {
        self.sort.as_ref().map(|(id, dir)| (id.as_str(), *dir))
    }

    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        match &self.sort {
            Some((id, dir)) if id == column_id => Some(*dir),
            _ => None,
        }
    }

    /// Cycle `asc -> desc -> none` on a column; a new column starts at `asc`.
    pub fn cycle(&mut self, column_id: &str) {
        self.sort = match self.sort.take() {
            Some((id, SortDirection::Asc)) if id == column_id => Some((id, SortDirection::Desc)),
            Some((id, SortDirection::Desc)) if id == column_id => None,
            _ => Some((column_id.to_string(), SortDirection::Asc)),
        };
    }

    pub fn clear(&mut self) {
        self.sort = None;
    }
}

// ============================================================================
// VISIBILITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnVisibility {
    hidden: HashSet<String>,
}

impl ColumnVisibility {
    pub fn is_visible(&self, column_id: &str) -> bool {
        !self.hidden.contains(column_id)
    }

    /// Toggle a column. Columns that are not hideable are left visible.
    pub fn toggle(&mut self, column: &ColumnDef) {
        if !column.hideable {
            return;
        }
        if !self.hidden.remove(&column.id) {
            self.hidden.insert(column.id.clone());
        }
    }

    pub fn visible_columns<'a>(&self, catalog: &'a ColumnCatalog) -> Vec<&'a ColumnDef> {
        catalog
            .columns()
            .iter()
            .filter(|c| self.is_visible(&c.id))
            .collect()
    }

    /// Hideable columns whose label contains `search`, case-insensitively.
    pub fn hideable_matching<'a>(catalog: &'a ColumnCatalog, search: &str) -> Vec<&'a ColumnDef> {
        let needle = search.to_lowercase();
        catalog
            .columns()
            .iter()
            .filter(|c| c.hideable && c.label.to_lowercase().contains(&needle))
            .collect()
    }
}

// ============================================================================
// PAGINATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Number of pages for `total` rows; at least one.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, total: usize) -> bool {
        self.page_index + 1 < self.page_count(total)
    }

    pub fn next(&mut self, total: usize) {
        if self.can_next(total) {
            self.page_index += 1;
        }
    }

    pub fn previous(&mut self) {
        self.page_index = self.page_index.saturating_sub(1);
    }

    pub fn first(&mut self) {
        self.page_index = 0;
    }

    pub fn last(&mut self, total: usize) {
        self.page_index = self.page_count(total) - 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page_index = 0;
    }

    /// Pull the page index back inside the range after the row count shrank.
    pub fn clamp(&mut self, total: usize) {
        self.page_index = self.page_index.min(self.page_count(total) - 1);
    }

    pub fn range(&self, total: usize) -> std::ops::Range<usize> {
        let start = (self.page_index * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }
}

// ============================================================================
// SELECTION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowSelection {
    selected: HashSet<String>,
}

impl RowSelection {
    pub fn is_selected(&self, row_id: &str) -> bool {
        self.selected.contains(row_id)
    }

    pub fn toggle(&mut self, row_id: &str) {
        if !self.selected.remove(row_id) {
            self.selected.insert(row_id.to_string());
        }
    }

    /// Select every row of the page, or clear them all when every one is
    /// already selected.
    pub fn toggle_all<'a>(&mut self, page_ids: impl IntoIterator<Item = &'a str> + Clone) {
        let all_selected = page_ids.clone().into_iter().all(|id| self.is_selected(id));
        for id in page_ids {
            if all_selected {
                self.selected.remove(id);
            } else {
                self.selected.insert(id.to_string());
            }
        }
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    /// Selected rows among `ids`, e.g. the rows left by the quick filter.
    pub fn count_in<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> usize {
        ids.into_iter().filter(|id| self.is_selected(id)).count()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Drop selections of rows that no longer exist.
    pub fn retain_existing<'a>(&mut self, ids: impl IntoIterator<Item = &'a str>) {
        let existing: HashSet<&str> = ids.into_iter().collect();
        self.selected.retain(|id| existing.contains(id.as_str()));
    }
}

// ============================================================================
// ROW PIPELINE
// ============================================================================

/// A row the table can display.
pub trait TableRow {
    fn row_id(&self) -> &str;

    /// Display text of a cell; empty for unknown columns.
    fn cell(&self, column_id: &str) -> String;

    /// Key used for sorting. Defaults to the display text.
    fn sort_key(&self, column_id: &str) -> String {
        self.cell(column_id)
    }
}

/// Toolbar quick filter: case-insensitive substring match on one column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuickFilter {
    pub column_id: String,
    pub text: String,
}

impl QuickFilter {
    pub fn new(column_id: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            text: String::new(),
        }
    }

    pub fn matches<R: TableRow>(&self, row: &R) -> bool {
        if self.text.is_empty() {
            return true;
        }
        row.cell(&self.column_id)
            .to_lowercase()
            .contains(&self.text.to_lowercase())
    }
}

/// Rows of the current page after quick filtering and sorting.
#[derive(Debug)]
pub struct RowModel<'a, R> {
    pub page_rows: Vec<&'a R>,
    /// Every row that passed the quick filter, in display order.
    pub filtered_rows: Vec<&'a R>,
    pub filtered_count: usize,
    pub page_count: usize,
}

impl<'a, R: TableRow> RowModel<'a, R> {
    pub fn build(
        rows: &'a [R],
        quick_filter: &QuickFilter,
        sorting: &SortingState,
        pagination: &Pagination,
    ) -> Self {
        let mut filtered: Vec<&R> = rows.iter().filter(|r| quick_filter.matches(*r)).collect();

        if let Some((column_id, direction)) = sorting.column() {
            filtered.sort_by(|a, b| {
                let ord = compare_keys(&a.sort_key(column_id), &b.sort_key(column_id));
                match direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }

        let filtered_count = filtered.len();
        let range = pagination.range(filtered_count);
        Self {
            page_rows: filtered[range].to_vec(),
            page_count: pagination.page_count(filtered_count),
            filtered_rows: filtered,
            filtered_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.page_rows.is_empty()
    }

    pub fn filtered_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.filtered_rows.iter().map(|r| r.row_id())
    }
}

/// Sort key: finite numbers rank before text. NaN and infinities are text.
#[derive(Debug, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn parse(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => SortKey::Number(n),
            _ => SortKey::Text(raw.to_lowercase()),
        }
    }
}

fn compare_keys(a: &str, b: &str) -> Ordering {
    match (SortKey::parse(a), SortKey::parse(b)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(&y),
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: the page range always lies inside the row count
        #[test]
        fn prop_page_range_in_bounds(total in 0usize..500, size in 1usize..60, index in 0usize..60) {
            let page = Pagination { page_index: index, page_size: size };
            let range = page.range(total);
            prop_assert!(range.start <= range.end);
            prop_assert!(range.end <= total);
            prop_assert!(range.len() <= size);
        }

        /// Property: after clamping, the page index addresses an existing page
        #[test]
        fn prop_clamp_keeps_index_valid(total in 0usize..500, size in 1usize..60, index in 0usize..100) {
            let mut page = Pagination { page_index: index, page_size: size };
            page.clamp(total);
            prop_assert!(page.page_index < page.page_count(total));
        }

        /// Property: key comparison is a total order (antisymmetric and transitive)
        #[test]
        fn prop_compare_keys_total_order(
            keys in prop::collection::vec(
                prop_oneof![
                    "-?[0-9]{1,4}(\\.[0-9]{1,2})?",
                    "[0-9][a-z0-9]{0,3}",
                    "(nan|NaN|inf|Inf|infinity)",
                    "[+ 0-9]{1,6}",
                    "[A-Za-z]{1,5}",
                ],
                3,
            )
        ) {
            let (a, b, c) = (&keys[0], &keys[1], &keys[2]);
            prop_assert_eq!(compare_keys(a, b), compare_keys(b, a).reverse());
            if compare_keys(a, b) != Ordering::Greater && compare_keys(b, c) != Ordering::Greater {
                prop_assert_ne!(compare_keys(a, c), Ordering::Greater);
            }
        }

        /// Property: three sort cycles on one column return to unsorted
        #[test]
        fn prop_sort_cycle_period_three(column in "[a-z]{1,8}") {
            let mut sorting = SortingState::default();
            for _ in 0..3 {
                sorting.cycle(&column);
            }
            prop_assert_eq!(sorting, SortingState::default());
        }
    }
}

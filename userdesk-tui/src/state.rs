//! Application state for the userdesk TUI.
//!
//! All key handling funnels through [`App::handle_action`], which mutates
//! state and reports whether the event loop has work to do. Filter changes
//! go through the [`FilterStore`]: edits that follow typing are staged and
//! settle after the debounce delay, structural edits commit immediately.

use crate::config::TuiConfig;
use crate::events::TuiEvent;
use crate::keys::{map_key, Action};
use crate::nav::{wrap_next, wrap_previous, Focus};
use crate::notifications::{
    Notification, NotificationAction, NotificationLevel, MAX_NOTIFICATIONS,
};
use crate::theme::SynthBruteTheme;
use std::time::{Duration, Instant};
use userdesk_core::format::{date_input_to_millis, millis_to_date_input};
use userdesk_core::mutation::{self, FilterPatch};
use userdesk_core::operator::next_operator;
use userdesk_core::range::{range_bound_update, resolve_range, Bound};
use userdesk_core::table::{
    ColumnVisibility, Pagination, QuickFilter, RowModel, RowSelection, SortingState,
};
use userdesk_core::user::users_catalog;
use userdesk_core::{
    ColumnCatalog, ColumnDef, ColumnOption, FilterCollection, FilterEntry, FilterId,
    FilterStore, FilterValue, FilterVariant, Location, MemoryLocation, TableRow, UserRow,
    ValueShape,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

/// Work the event loop must do after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Refresh,
    CopyToClipboard(String),
}

// ============================================================================
// VALUE EDITORS
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum ValueEditor {
    /// Single text, number or date value. Dates are typed as `YYYY-MM-DD`.
    Text {
        filter_id: FilterId,
        input: String,
        variant: FilterVariant,
    },
    /// Two bounds, for range variants and the `between` operator.
    Pair {
        filter_id: FilterId,
        from: String,
        to: String,
        bound: Bound,
        dates: bool,
        limits: (f64, f64),
    },
    /// Choice among column options.
    Options {
        filter_id: FilterId,
        options: Vec<ColumnOption>,
        cursor: usize,
        chosen: Vec<String>,
        multi: bool,
    },
}

impl ValueEditor {
    pub fn filter_id(&self) -> &FilterId {
        match self {
            ValueEditor::Text { filter_id, .. }
            | ValueEditor::Pair { filter_id, .. }
            | ValueEditor::Options { filter_id, .. } => filter_id,
        }
    }

    pub fn focus(&self) -> Focus {
        match self {
            ValueEditor::Options { .. } => Focus::OptionPicker,
            _ => Focus::ValueInput,
        }
    }
}

fn boolean_options() -> Vec<ColumnOption> {
    vec![
        ColumnOption::new("True", "true"),
        ColumnOption::new("False", "false"),
    ]
}

fn accepts_char(variant: FilterVariant, c: char) -> bool {
    if variant.is_temporal() {
        c.is_ascii_digit() || c == '-'
    } else if variant.is_numeric() {
        c.is_ascii_digit() || c == '.' || c == '-'
    } else {
        !c.is_control()
    }
}

/// Length of a complete `YYYY-MM-DD` date.
const DATE_INPUT_LEN: usize = 10;

/// Stored text of one bound of a pair editor. `Ok(None)` while a date is
/// still being typed.
fn pair_bound_value(text: &str, dates: bool) -> Result<Option<String>, String> {
    if !dates {
        return Ok(Some(text.trim().to_string()));
    }
    match date_input_to_millis(text) {
        Some(millis) => Ok(Some(millis)),
        None if text.trim().len() < DATE_INPUT_LEN => Ok(None),
        None => Err(format!("'{}' is not a date, use YYYY-MM-DD", text.trim())),
    }
}

fn range_error(dates: bool, limits: (f64, f64)) -> String {
    if dates {
        "From date must not be after To date".to_string()
    } else if limits.0.is_finite() && limits.1.is_finite() {
        format!("Range must lie within {} and {}, from <= to", limits.0, limits.1)
    } else {
        "Enter numbers with from <= to".to_string()
    }
}

// ============================================================================
// PANEL STATE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct FilterPanelState {
    pub open: bool,
    pub selected: usize,
    /// Set when the last typed bound was rejected.
    pub input_error: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ColumnMenuState {
    pub search: String,
    pub cursor: usize,
}

// ============================================================================
// APP
// ============================================================================

pub struct App {
    pub config: TuiConfig,
    pub theme: SynthBruteTheme,
    pub catalog: ColumnCatalog,
    pub users: Vec<UserRow>,
    pub load_state: LoadState,
    pub store: FilterStore<MemoryLocation>,

    pub focus: Focus,
    return_focus: Focus,
    pub filter_panel: FilterPanelState,
    pub value_editor: Option<ValueEditor>,
    pub column_menu: ColumnMenuState,

    pub quick_filter: QuickFilter,
    pub sorting: SortingState,
    pub visibility: ColumnVisibility,
    pub pagination: Pagination,
    pub selection: RowSelection,
    /// Row under the cursor, relative to the current page.
    pub cursor: usize,
    /// Index into the visible columns.
    pub focused_column: usize,

    pub notifications: Vec<Notification>,
}

impl App {
    pub fn new(config: TuiConfig, initial_query: &str) -> Self {
        let catalog = users_catalog();
        let store = FilterStore::new(
            MemoryLocation::new(initial_query),
            config.query_keys.clone(),
            catalog.filterable_ids(),
            Duration::from_millis(config.filter_debounce_ms),
        );
        let pagination = Pagination::new(config.page_size);
        Self {
            config,
            theme: SynthBruteTheme::synthbrute(),
            catalog,
            users: Vec::new(),
            load_state: LoadState::Loading,
            store,
            focus: Focus::Table,
            return_focus: Focus::Table,
            filter_panel: FilterPanelState::default(),
            value_editor: None,
            column_menu: ColumnMenuState::default(),
            quick_filter: QuickFilter::new("name"),
            sorting: SortingState::default(),
            visibility: ColumnVisibility::default(),
            pagination,
            selection: RowSelection::default(),
            cursor: 0,
            focused_column: 0,
            notifications: Vec::new(),
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.push_notification(Notification::new(level, message));
    }

    fn push_notification(&mut self, notification: Notification) {
        self.notifications.push(notification);
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }

    // === Data ===

    pub fn begin_loading(&mut self) {
        self.load_state = LoadState::Loading;
    }

    pub fn users_loaded(&mut self, users: Vec<UserRow>) {
        tracing::info!(count = users.len(), "Users loaded");
        self.users = users;
        self.load_state = LoadState::Loaded;
        self.selection
            .retain_existing(self.users.iter().map(|u| u.row_id()));
        let filtered = self.row_model().filtered_count;
        self.pagination.clamp(filtered);
        self.clamp_cursor();
    }

    pub fn users_failed(&mut self, message: String) {
        tracing::warn!(error = %message, "Users fetch failed");
        self.load_state = LoadState::Failed(message.clone());
        self.push_notification(
            Notification::new(NotificationLevel::Error, format!("Error loading users: {}", message))
                .with_action(NotificationAction::Retry),
        );
    }

    pub fn row_model(&self) -> RowModel<'_, UserRow> {
        RowModel::build(&self.users, &self.quick_filter, &self.sorting, &self.pagination)
    }

    /// Report the outcome of a clipboard write requested by
    /// [`Effect::CopyToClipboard`].
    pub fn clipboard_written(&mut self, result: std::io::Result<()>) {
        match result {
            Ok(()) => self.notify(NotificationLevel::Success, "Email copied"),
            Err(err) => {
                tracing::warn!(error = %err, "Clipboard write failed");
                self.notify(NotificationLevel::Error, format!("Could not copy email: {}", err));
            }
        }
    }

    /// Selected rows that pass the quick filter.
    pub fn filtered_selection_count(&self) -> usize {
        self.selection.count_in(self.row_model().filtered_ids())
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDef> {
        self.visibility.visible_columns(&self.catalog)
    }

    /// Filter state as the UI should show it, pending edits included.
    pub fn filters(&self) -> FilterCollection {
        self.store.current()
    }

    pub fn selected_filter(&self) -> Option<FilterEntry> {
        self.filters()
            .entries
            .get(self.filter_panel.selected)
            .cloned()
    }

    pub fn location_query(&self) -> String {
        self.store.location().query()
    }

    /// Commit settled filter edits. Called on every tick.
    pub fn tick(&mut self, now: Instant) {
        if self.store.tick(now) {
            self.clamp_filter_selection();
        }
    }

    /// Commit whatever is pending, as on shutdown.
    pub fn flush(&mut self) {
        self.store.flush();
    }

    // === Events ===

    pub fn handle_event(&mut self, event: TuiEvent, now: Instant) -> Effect {
        match event {
            TuiEvent::Input(key) => match map_key(key, self.focus) {
                Some(action) => self.handle_action(action, now),
                None => Effect::None,
            },
            TuiEvent::Tick => {
                self.tick(now);
                Effect::None
            }
            TuiEvent::Resize { .. } => Effect::None,
            TuiEvent::UsersLoaded(users) => {
                self.users_loaded(users);
                Effect::None
            }
            TuiEvent::ApiError(message) => {
                self.users_failed(message);
                Effect::None
            }
        }
    }

    // === Actions ===

    pub fn handle_action(&mut self, action: Action, now: Instant) -> Effect {
        if action == Action::Quit {
            return Effect::Quit;
        }
        match self.focus {
            Focus::Table => self.handle_table_action(action),
            Focus::FilterPanel => {
                self.handle_filter_panel_action(action, now);
                Effect::None
            }
            Focus::ValueInput | Focus::OptionPicker => {
                self.handle_editor_action(action, now);
                Effect::None
            }
            Focus::QuickFilter => {
                self.handle_quick_filter_action(action);
                Effect::None
            }
            Focus::ColumnMenu => {
                self.handle_column_menu_action(action);
                Effect::None
            }
            Focus::Help => {
                self.focus = self.return_focus;
                Effect::None
            }
        }
    }

    fn open_help(&mut self) {
        self.return_focus = self.focus;
        self.focus = Focus::Help;
    }

    fn handle_table_action(&mut self, action: Action) -> Effect {
        let model = self.row_model();
        let filtered = model.filtered_count;
        let page_len = model.page_rows.len();
        let cursor_id = model.page_rows.get(self.cursor).map(|r| r.id.clone());
        let cursor_email = model.page_rows.get(self.cursor).map(|r| r.email.clone());
        let page_ids: Vec<String> = model.page_rows.iter().map(|r| r.id.clone()).collect();

        match action {
            Action::Refresh => {
                self.begin_loading();
                return Effect::Refresh;
            }
            Action::MoveUp => self.cursor = self.cursor.saturating_sub(1),
            Action::MoveDown => {
                if self.cursor + 1 < page_len {
                    self.cursor += 1;
                }
            }
            Action::PrevPage => {
                self.pagination.previous();
                self.cursor = 0;
            }
            Action::NextPage => {
                self.pagination.next(filtered);
                self.cursor = 0;
            }
            Action::FirstPage => {
                self.pagination.first();
                self.cursor = 0;
            }
            Action::LastPage => {
                self.pagination.last(filtered);
                self.cursor = 0;
            }
            Action::FocusPrevColumn => {
                self.focused_column = wrap_previous(self.focused_column, self.visible_columns().len());
            }
            Action::FocusNextColumn => {
                self.focused_column = wrap_next(self.focused_column, self.visible_columns().len());
            }
            Action::CycleSort => self.cycle_sort(),
            Action::ToggleRow => {
                if let Some(id) = cursor_id {
                    self.selection.toggle(&id);
                }
            }
            Action::ToggleAllRows => {
                self.selection.toggle_all(page_ids.iter().map(String::as_str));
            }
            Action::CopyEmail => match cursor_email.filter(|email| !email.trim().is_empty()) {
                Some(email) => return Effect::CopyToClipboard(email),
                None => self.notify(NotificationLevel::Warning, "No email to copy"),
            },
            Action::SetPageSize(size) => {
                self.pagination.set_page_size(size);
                self.cursor = 0;
            }
            Action::OpenHelp => self.open_help(),
            Action::OpenQuickFilter => self.focus = Focus::QuickFilter,
            Action::OpenColumnMenu => {
                self.column_menu = ColumnMenuState::default();
                self.focus = Focus::ColumnMenu;
            }
            Action::ToggleFilterPanel => self.open_filter_panel(),
            Action::RemoveLastFilter => self.remove_last_filter(),
            Action::Cancel => self.notifications.clear(),
            _ => {}
        }
        Effect::None
    }

    fn cycle_sort(&mut self) {
        let column = self
            .visible_columns()
            .get(self.focused_column)
            .filter(|c| c.sortable)
            .map(|c| c.id.clone());
        if let Some(column_id) = column {
            self.sorting.cycle(&column_id);
            self.pagination.first();
            self.cursor = 0;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.row_model().page_rows.len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    // === Filter panel ===

    fn open_filter_panel(&mut self) {
        self.filter_panel.open = true;
        self.focus = Focus::FilterPanel;
        self.clamp_filter_selection();
    }

    fn close_filter_panel(&mut self) {
        self.filter_panel.open = false;
        self.value_editor = None;
        self.focus = Focus::Table;
    }

    fn clamp_filter_selection(&mut self) {
        let len = self.filters().len();
        self.filter_panel.selected = self.filter_panel.selected.min(len.saturating_sub(1));
    }

    fn remove_last_filter(&mut self) {
        let current = self.filters();
        if current.is_empty() {
            return;
        }
        self.store.commit_now(mutation::remove_last(&current));
        self.clamp_filter_selection();
    }

    fn handle_filter_panel_action(&mut self, action: Action, now: Instant) {
        let current = self.filters();
        let selected = self.filter_panel.selected;
        let selected_entry = current.entries.get(selected).cloned();

        match action {
            Action::AddFilter => {
                let next = mutation::add(&current, &self.catalog);
                if next.len() == current.len() {
                    self.notify(NotificationLevel::Warning, "No filterable columns");
                    return;
                }
                self.filter_panel.selected = next.len() - 1;
                self.store.stage(next, now);
            }
            Action::ResetFilters => {
                self.store.commit_now(mutation::reset());
                self.filter_panel.selected = 0;
            }
            Action::RemoveFilter => {
                if let Some(entry) = selected_entry {
                    self.store.commit_now(mutation::remove(&current, &entry.filter_id));
                    self.clamp_filter_selection();
                }
            }
            Action::RemoveLastFilter => self.remove_last_filter(),
            Action::MoveFilterUp => {
                if selected > 0 && selected < current.len() {
                    self.store.commit_now(mutation::reorder(&current, selected, selected - 1));
                    self.filter_panel.selected = selected - 1;
                }
            }
            Action::MoveFilterDown => {
                if selected + 1 < current.len() {
                    self.store.commit_now(mutation::reorder(&current, selected, selected + 1));
                    self.filter_panel.selected = selected + 1;
                }
            }
            Action::CycleColumn => {
                if let Some(entry) = selected_entry {
                    if let Some(column) = self.catalog.next_filterable(&entry.column_id) {
                        let patch = FilterPatch::column(column);
                        self.store
                            .stage(mutation::update(&current, &entry.filter_id, patch), now);
                    }
                }
            }
            Action::CycleOperator => {
                if let Some(entry) = selected_entry {
                    let operator = next_operator(entry.variant, entry.operator);
                    self.store.stage(
                        mutation::update(&current, &entry.filter_id, FilterPatch::operator(operator)),
                        now,
                    );
                }
            }
            Action::ToggleJoin => {
                let join = current.join_operator.toggled();
                self.store.commit_now(mutation::set_join_operator(&current, join));
            }
            Action::EditValue => {
                if let Some(entry) = selected_entry {
                    self.open_value_editor(&entry);
                }
            }
            Action::MoveUp => {
                self.filter_panel.selected = wrap_previous(selected, current.len());
            }
            Action::MoveDown => {
                self.filter_panel.selected = wrap_next(selected, current.len());
            }
            Action::OpenHelp => self.open_help(),
            Action::ToggleFilterPanel | Action::Cancel => self.close_filter_panel(),
            _ => {}
        }
    }

    // === Value editors ===

    fn open_value_editor(&mut self, entry: &FilterEntry) {
        if entry.operator.ignores_value() {
            self.notify(
                NotificationLevel::Info,
                format!("'{}' takes no value", entry.operator),
            );
            return;
        }
        let Some(column) = self.catalog.get(&entry.column_id).cloned() else {
            return;
        };
        let filter_id = entry.filter_id.clone();
        let dates = entry.variant.is_temporal();

        let editor = match (ValueShape::expected(entry.variant, entry.operator), &entry.value) {
            (ValueShape::List, value) => ValueEditor::Options {
                filter_id,
                options: column.options.clone(),
                cursor: 0,
                chosen: match value {
                    FilterValue::List(items) => items.clone(),
                    _ => Vec::new(),
                },
                multi: true,
            },
            (ValueShape::Pair, value) => {
                let (from, to) = match value {
                    FilterValue::Pair(from, to) => (from.clone(), to.clone()),
                    _ => (String::new(), String::new()),
                };
                let show = |text: &str| {
                    if dates {
                        millis_to_date_input(text)
                    } else {
                        text.to_string()
                    }
                };
                ValueEditor::Pair {
                    filter_id,
                    from: show(&from),
                    to: show(&to),
                    bound: Bound::Min,
                    dates,
                    limits: self.limits_for(&column),
                }
            }
            (ValueShape::Scalar, value)
                if matches!(entry.variant, FilterVariant::Select | FilterVariant::Boolean) =>
            {
                let options = if entry.variant == FilterVariant::Boolean {
                    boolean_options()
                } else {
                    column.options.clone()
                };
                let current = value.to_string();
                let cursor = options.iter().position(|o| o.value == current).unwrap_or(0);
                ValueEditor::Options {
                    filter_id,
                    options,
                    cursor,
                    chosen: if current.is_empty() { Vec::new() } else { vec![current] },
                    multi: false,
                }
            }
            (ValueShape::Scalar, value) => {
                let text = value.to_string();
                ValueEditor::Text {
                    filter_id,
                    input: if dates { millis_to_date_input(&text) } else { text },
                    variant: entry.variant,
                }
            }
        };

        self.filter_panel.input_error = None;
        self.focus = editor.focus();
        self.value_editor = Some(editor);
    }

    /// Bounds enforced on range input. Only `range` columns are bounded.
    fn limits_for(&self, column: &ColumnDef) -> (f64, f64) {
        if column.variant != FilterVariant::Range {
            return (f64::NEG_INFINITY, f64::INFINITY);
        }
        let values: Vec<f64> = self
            .users
            .iter()
            .filter_map(|u| u.sort_key(&column.id).trim().parse().ok())
            .collect();
        resolve_range(column.range, &values)
    }

    fn close_value_editor(&mut self) {
        self.value_editor = None;
        self.filter_panel.input_error = None;
        self.focus = Focus::FilterPanel;
    }

    fn stage_value(&mut self, filter_id: &FilterId, value: FilterValue, now: Instant) {
        let current = self.filters();
        self.store
            .stage(mutation::update(&current, filter_id, FilterPatch::value(value)), now);
    }

    fn handle_editor_action(&mut self, action: Action, now: Instant) {
        let Some(mut editor) = self.value_editor.take() else {
            self.focus = Focus::FilterPanel;
            return;
        };

        match action {
            Action::Cancel => {
                self.close_value_editor();
                return;
            }
            Action::ToggleFilterPanel => {
                self.close_filter_panel();
                return;
            }
            Action::RemoveLastFilter => {
                self.close_value_editor();
                self.remove_last_filter();
                return;
            }
            _ => {}
        }

        let mut close = action == Action::Confirm;
        match &mut editor {
            ValueEditor::Text {
                filter_id,
                input,
                variant,
            } => {
                let changed = match action {
                    Action::InputChar(c) if accepts_char(*variant, c) => {
                        input.push(c);
                        true
                    }
                    Action::InputBackspace => input.pop().is_some(),
                    _ => false,
                };
                if changed {
                    let stored = if variant.is_temporal() {
                        date_input_to_millis(input)
                    } else {
                        Some(input.clone())
                    };
                    if let Some(text) = stored {
                        let filter_id = filter_id.clone();
                        self.stage_value(&filter_id, FilterValue::Scalar(text), now);
                    }
                }
            }
            ValueEditor::Pair {
                filter_id,
                from,
                to,
                bound,
                dates,
                limits,
            } => {
                let variant_char_ok = |c: char| {
                    if *dates {
                        c.is_ascii_digit() || c == '-'
                    } else {
                        c.is_ascii_digit() || c == '.' || c == '-'
                    }
                };
                let changed = {
                    let buffer = match bound {
                        Bound::Min => &mut *from,
                        Bound::Max => &mut *to,
                    };
                    match action {
                        Action::InputChar(c) if variant_char_ok(c) => {
                            buffer.push(c);
                            true
                        }
                        Action::InputBackspace => buffer.pop().is_some(),
                        Action::SwitchBound => {
                            *bound = match bound {
                                Bound::Min => Bound::Max,
                                Bound::Max => Bound::Min,
                            };
                            false
                        }
                        _ => false,
                    }
                };
                if changed {
                    match (pair_bound_value(from.as_str(), *dates), pair_bound_value(to.as_str(), *dates)) {
                        (Err(message), _) | (_, Err(message)) => {
                            self.filter_panel.input_error = Some(message);
                        }
                        (Ok(Some(lo)), Ok(Some(hi))) => {
                            let accepted = range_bound_update(("", ""), Bound::Min, &lo, *limits)
                                .and_then(|(lo, _)| {
                                    range_bound_update((&lo, ""), Bound::Max, &hi, *limits)
                                });
                            match accepted {
                                Some((lo, hi)) => {
                                    self.filter_panel.input_error = None;
                                    let filter_id = filter_id.clone();
                                    self.stage_value(&filter_id, FilterValue::Pair(lo, hi), now);
                                }
                                None => {
                                    self.filter_panel.input_error = Some(range_error(*dates, *limits));
                                }
                            }
                        }
                        _ => self.filter_panel.input_error = None,
                    }
                }
            }
            ValueEditor::Options {
                filter_id,
                options,
                cursor,
                chosen,
                multi,
            } => {
                match action {
                    Action::MoveUp => *cursor = wrap_previous(*cursor, options.len()),
                    Action::MoveDown => *cursor = wrap_next(*cursor, options.len()),
                    _ => {}
                }
                let pick = matches!(action, Action::ToggleOption)
                    || (!*multi && action == Action::Confirm);
                if pick {
                    if let Some(option) = options.get(*cursor) {
                        let value = option.value.clone();
                        let toggling = *multi || action == Action::ToggleOption;
                        match chosen.iter().position(|v| *v == value) {
                            Some(pos) if toggling => {
                                chosen.remove(pos);
                            }
                            Some(_) => {}
                            None if *multi => chosen.push(value),
                            None => *chosen = vec![value],
                        }
                        let filter_value = if *multi {
                            FilterValue::List(chosen.clone())
                        } else {
                            FilterValue::Scalar(chosen.first().cloned().unwrap_or_default())
                        };
                        let filter_id = filter_id.clone();
                        self.stage_value(&filter_id, filter_value, now);
                    }
                    if !*multi {
                        close = true;
                    }
                }
            }
        }

        if close {
            self.close_value_editor();
        } else {
            self.value_editor = Some(editor);
        }
    }

    // === Quick filter ===

    fn handle_quick_filter_action(&mut self, action: Action) {
        match action {
            Action::InputChar(c) => {
                self.quick_filter.text.push(c);
                self.pagination.first();
                self.cursor = 0;
            }
            Action::InputBackspace => {
                self.quick_filter.text.pop();
                self.pagination.first();
                self.cursor = 0;
            }
            Action::Confirm | Action::Cancel => self.focus = Focus::Table,
            _ => {}
        }
    }

    // === Column view options ===

    pub fn column_menu_items(&self) -> Vec<&ColumnDef> {
        ColumnVisibility::hideable_matching(&self.catalog, &self.column_menu.search)
    }

    fn handle_column_menu_action(&mut self, action: Action) {
        let count = self.column_menu_items().len();
        match action {
            Action::InputChar(c) => {
                self.column_menu.search.push(c);
                self.column_menu.cursor = 0;
            }
            Action::InputBackspace => {
                self.column_menu.search.pop();
                self.column_menu.cursor = 0;
            }
            Action::MoveUp => self.column_menu.cursor = wrap_previous(self.column_menu.cursor, count),
            Action::MoveDown => self.column_menu.cursor = wrap_next(self.column_menu.cursor, count),
            Action::Confirm => {
                let column = self.column_menu_items().get(self.column_menu.cursor).map(|c| (*c).clone());
                if let Some(column) = column {
                    self.visibility.toggle(&column);
                    let visible = self.visible_columns().len();
                    self.focused_column = self.focused_column.min(visible.saturating_sub(1));
                }
            }
            Action::Cancel => self.focus = Focus::Table,
            _ => {}
        }
    }
}

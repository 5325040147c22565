//! Focus tracking: which part of the screen receives keys.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Table,
    QuickFilter,
    FilterPanel,
    ValueInput,
    OptionPicker,
    ColumnMenu,
    Help,
}

impl Focus {
    pub fn title(&self) -> &'static str {
        match self {
            Focus::Table => "Users",
            Focus::QuickFilter => "Filter names",
            Focus::FilterPanel => "Filters",
            Focus::ValueInput => "Filter value",
            Focus::OptionPicker => "Filter options",
            Focus::ColumnMenu => "Toggle columns",
            Focus::Help => "Keybindings",
        }
    }

    /// True while a text field has the keyboard.
    pub fn is_text_input(&self) -> bool {
        matches!(self, Focus::QuickFilter | Focus::ValueInput | Focus::ColumnMenu)
    }
}

/// Index after `current` in a list of `len`, wrapping around.
pub fn wrap_next(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (current + 1) % len
    }
}

/// Index before `current` in a list of `len`, wrapping around.
pub fn wrap_previous(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 || current >= len {
        len - 1
    } else {
        current - 1
    }
}

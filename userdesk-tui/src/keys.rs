//! Keybinding definitions for the TUI.

use crate::nav::Focus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    MoveUp,
    MoveDown,
    PrevPage,
    NextPage,
    FirstPage,
    LastPage,
    FocusPrevColumn,
    FocusNextColumn,
    CycleSort,
    ToggleRow,
    ToggleAllRows,
    CopyEmail,
    SetPageSize(usize),
    OpenHelp,
    OpenQuickFilter,
    OpenColumnMenu,
    ToggleFilterPanel,
    AddFilter,
    ResetFilters,
    RemoveFilter,
    RemoveLastFilter,
    MoveFilterUp,
    MoveFilterDown,
    CycleColumn,
    CycleOperator,
    EditValue,
    ToggleJoin,
    ToggleOption,
    SwitchBound,
    InputChar(char),
    InputBackspace,
    Confirm,
    Cancel,
}

/// Ctrl (or Super) + Shift + F.
fn is_filter_shortcut(code: KeyCode, modifiers: KeyModifiers) -> bool {
    let command = modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
    let shift = modifiers.contains(KeyModifiers::SHIFT);
    matches!(code, KeyCode::Char(c) if c.eq_ignore_ascii_case(&'f')) && command && shift
}

pub fn map_key(event: KeyEvent, focus: Focus) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if !focus.is_text_input() && is_filter_shortcut(code, modifiers) {
        return Some(Action::ToggleFilterPanel);
    }

    match focus {
        Focus::Table => map_table_key(code),
        Focus::FilterPanel => map_filter_panel_key(code),
        Focus::QuickFilter | Focus::ValueInput | Focus::ColumnMenu => map_input_key(code),
        Focus::OptionPicker => map_option_key(code),
        Focus::Help => Some(Action::Cancel),
    }
}

fn map_table_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char('/') => Some(Action::OpenQuickFilter),
        KeyCode::Char('v') => Some(Action::OpenColumnMenu),
        KeyCode::Char('f') => Some(Action::ToggleFilterPanel),
        KeyCode::Char('s') => Some(Action::CycleSort),
        KeyCode::Char(' ') => Some(Action::ToggleRow),
        KeyCode::Char('A') => Some(Action::ToggleAllRows),
        KeyCode::Char('y') => Some(Action::CopyEmail),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char('h') | KeyCode::PageUp => Some(Action::PrevPage),
        KeyCode::Char('l') | KeyCode::PageDown => Some(Action::NextPage),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstPage),
        KeyCode::Char('G') | KeyCode::End => Some(Action::LastPage),
        KeyCode::Left => Some(Action::FocusPrevColumn),
        KeyCode::Right => Some(Action::FocusNextColumn),
        KeyCode::Backspace | KeyCode::Delete => Some(Action::RemoveLastFilter),
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            Some(Action::SetPageSize(userdesk_core::table::PAGE_SIZES[index]))
        }
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

fn map_filter_panel_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('a') => Some(Action::AddFilter),
        KeyCode::Char('R') => Some(Action::ResetFilters),
        KeyCode::Char('d') => Some(Action::RemoveFilter),
        KeyCode::Backspace | KeyCode::Delete => Some(Action::RemoveLastFilter),
        KeyCode::Char('K') => Some(Action::MoveFilterUp),
        KeyCode::Char('J') => Some(Action::MoveFilterDown),
        KeyCode::Char('c') => Some(Action::CycleColumn),
        KeyCode::Char('o') => Some(Action::CycleOperator),
        KeyCode::Char('t') => Some(Action::ToggleJoin),
        KeyCode::Enter => Some(Action::EditValue),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Esc | KeyCode::Char('q') => Some(Action::Cancel),
        _ => None,
    }
}

fn map_input_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchBound),
        KeyCode::Backspace => Some(Action::InputBackspace),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        _ => None,
    }
}

fn map_option_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Char(' ') => Some(Action::ToggleOption),
        KeyCode::Backspace | KeyCode::Delete => Some(Action::RemoveLastFilter),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

//! Event types for the TUI event loop.

use crossterm::event::KeyEvent;
use userdesk_core::UserRow;

#[derive(Debug, Clone)]
pub enum TuiEvent {
    Input(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    UsersLoaded(Vec<UserRow>),
    ApiError(String),
}

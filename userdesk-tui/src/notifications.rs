//! Notification system for the TUI.

use chrono::{DateTime, Utc};

/// Notifications kept for display; older ones are dropped.
pub const MAX_NOTIFICATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    Retry,
    Dismiss,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub action: Option<NotificationAction>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            action: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_action(mut self, action: NotificationAction) -> Self {
        self.action = Some(action);
        self
    }

    /// Hint shown next to the message.
    pub fn action_hint(&self) -> Option<&'static str> {
        match self.action {
            Some(NotificationAction::Retry) => Some("r: retry"),
            Some(NotificationAction::Dismiss) => Some("Esc: dismiss"),
            None => None,
        }
    }
}

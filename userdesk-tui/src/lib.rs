//! Userdesk terminal client: a users table with quick filtering, sorting,
//! paging and an advanced filter panel whose state lives in the query string.

pub mod api_client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod events;
pub mod keys;
pub mod logging;
pub mod nav;
pub mod notifications;
pub mod state;
pub mod theme;
pub mod views;
pub mod widgets;

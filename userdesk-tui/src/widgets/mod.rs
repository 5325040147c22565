//! Reusable widget components.

pub mod filter;
pub mod pagination;
pub mod status;

pub use filter::{display_value, FilterBar, FilterChip};
pub use pagination::PaginationFooter;
pub use status::StatusIndicator;

//! Userdesk Core - Filter Model
//!
//! Operator catalog, filter entries, the query-string codec that persists
//! them, the mutation API, and the table model the users view is built on.
//! No I/O: the terminal client and tests drive everything from here.

pub mod codec;
pub mod error;
pub mod filter;
pub mod format;
pub mod mutation;
pub mod operator;
pub mod range;
pub mod store;
pub mod table;
pub mod user;

pub use codec::{QueryKeys, QueryState};
pub use error::ParseError;
pub use filter::{FilterCollection, FilterEntry, FilterId, FilterValue, JoinOperator, ValueShape};
pub use mutation::FilterPatch;
pub use operator::{FilterOperator, FilterVariant, OperatorOption};
pub use store::{Debouncer, FilterStore, Location, MemoryLocation};
pub use table::{ColumnCatalog, ColumnDef, ColumnOption, TableRow};
pub use user::{UserRecord, UserRow};

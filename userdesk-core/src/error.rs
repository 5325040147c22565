//! Error types for userdesk core parsing.
//!
//! Filter state coming from a query string never fails as a whole; these
//! errors only surface from the explicit `FromStr` implementations.

use thiserror::Error;

/// Parse errors for the closed vocabularies of the filter model.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid filter variant: {0}")]
    UnknownVariant(String),

    #[error("Invalid filter operator: {0}")]
    UnknownOperator(String),

    #[error("Invalid join operator: {0}")]
    UnknownJoinOperator(String),
}

//! SQL parsing errors.

use thiserror::Error;

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// SQL parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing or invalid {0} clause")]
    MissingClause(String),

    #[error("empty query")]
    EmptyQuery,
}

//! Planning errors.

use thiserror::Error;

use crate::sql::ParseError;

/// Result type for planning operations.
pub type PlanResult<T> = Result<T, PlanError>;

/// Query planning errors. Every variant is terminal for the query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A reference that is not of the form `alias.column`.
    #[error("malformed field reference: {0}")]
    MalformedField(String),

    /// Unbound alias, or a column the resolved table does not declare.
    #[error("invalid field: {0}")]
    InvalidField(String),

    /// An alias bound twice in one query (strict alias mode only).
    #[error("duplicate alias: {0}")]
    DuplicateAlias(String),
}

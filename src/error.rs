//! Configuration errors raised by the table engine.
//!
//! Only integration bugs surface here: a dataset whose rows cannot be told
//! apart, a schema that references a formatter nobody registered, or a page
//! size of zero. Everything else (stale identities, unknown columns, unknown
//! schemas) is normalized to a no-op or a fallback and never reaches the caller.

use thiserror::Error;

use crate::data::identity::Identity;

/// Failures that stop the engine from producing a table state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Two rows in one dataset resolved to the same identity.
    #[error("duplicate row identity {identity} in field '{field}' (rows {first} and {second})")]
    DuplicateIdentity {
        field: String,
        identity: Identity,
        first: usize,
        second: usize,
    },

    /// A row has no usable value in the identity field.
    #[error("row {row} has no value for identity field '{field}'")]
    MissingIdentity { field: String, row: usize },

    /// The identity field holds a value that is not a stable scalar.
    #[error("row {row} has a non-scalar identity in field '{field}': {value}")]
    InvalidIdentity {
        field: String,
        row: usize,
        value: String,
    },

    /// A column asks for a custom formatter that does not exist.
    #[error("column '{column}' uses unknown cell formatter '{formatter}'")]
    UnresolvableColumnKind { column: String, formatter: String },

    /// Two columns in one schema share a key.
    #[error("schema declares column key '{0}' more than once")]
    DuplicateColumnKey(String),

    #[error("page size must be at least 1")]
    InvalidPageSize,

    /// A pattern predicate failed to compile.
    #[error("invalid filter pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

pub type TableResult<T> = std::result::Result<T, TableError>;

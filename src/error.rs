//! Crate-wide error taxonomy.

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, TabulaError>;

/// Failures surfaced to query callers.
///
/// Every failure is reported exactly once through `Result`; nothing inside
/// the query core retries or converts errors into control flow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TabulaError {
    /// Requested table name is not registered in the row store.
    #[error("unknown table '{table}'")]
    UnknownTable {
        /// Name the caller asked for.
        table: String,
    },
    /// Registered table holds a different row type than the caller requested.
    #[error("table '{table}' is registered as {registered}, not {requested}")]
    TableType {
        /// Name of the mismatched table.
        table: String,
        /// Row type the caller asked for.
        requested: &'static str,
        /// Row type the table was registered with.
        registered: &'static str,
    },
    /// `sum`/`average` requested over a group with zero rows.
    #[error("{operation} over an empty group")]
    EmptyGroup {
        /// Aggregate that was attempted.
        operation: &'static str,
    },
}

impl TabulaError {
    /// Returns a machine-readable code for the error variant.
    pub fn code(&self) -> &'static str {
        match self {
            TabulaError::UnknownTable { .. } => "UnknownTable",
            TabulaError::TableType { .. } => "TableType",
            TabulaError::EmptyGroup { .. } => "EmptyGroup",
        }
    }
}

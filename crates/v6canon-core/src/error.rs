//! Error types for v6canon
//!
//! All fallible operations return `Result<T, Error>`.
//! Non-fatal table conditions are logged, not returned.

use thiserror::Error;

/// v6canon error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Address text is not 8 colon-separated groups of 1-4 hex digits
    #[error("Invalid address format: {0}")]
    InvalidAddressFormat(String),

    /// Filter table rows do not all have the same length
    #[error("Inconsistent rows: row {row} has {found} columns, expected {expected}")]
    InconsistentRows {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type alias for v6canon operations
pub type Result<T> = std::result::Result<T, Error>;

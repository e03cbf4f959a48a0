//! Error types for the search crate.

use thiserror::Error;

/// Errors produced while building a Grover search.
///
/// Every error is raised at construction time; nothing is partially built.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SearchError {
    /// Malformed marked states, inconsistent lengths, empty input, or a
    /// negative iteration count.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The iteration formula was asked to divide by a zero marked-state count.
    #[error("Division by zero: no marked states to amplify")]
    DivisionByZero,

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] grover_ir::IrError),
}

/// Result type for search construction.
pub type SearchResult<T> = Result<T, SearchError>;

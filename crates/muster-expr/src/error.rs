//! Error types for the predicate-expression engine.

use thiserror::Error;

/// Errors raised while composing predicate expressions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ExprError {
    /// Two expressions being composed declare different numbers of free
    /// variables. Checked before any tree construction; not recoverable
    /// within the composition call.
    #[error("expressions must declare the same number of free variables ({first} vs {second})")]
    ArityMismatch {
        /// Free-variable count of the first expression.
        first: usize,
        /// Free-variable count of the second expression.
        second: usize,
    },
}

/// Result type for composition operations.
pub type Result<T> = std::result::Result<T, ExprError>;

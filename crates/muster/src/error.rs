//! Error types for the specification layer.

use thiserror::Error;

/// Errors raised when combining specifications.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MusterError {
    /// The underlying predicate expressions could not be composed.
    #[error(transparent)]
    Compose(#[from] muster_expr::ExprError),
    /// A commit or rollback was attempted on an already-finalized
    /// transaction.
    #[error("transaction already finalized")]
    TransactionFinalized,
    /// A transaction configured to report rollbacks was rolled back.
    #[error("transaction was rolled back")]
    TransactionRolledBack,
}

/// Result type for specification operations.
pub type Result<T> = std::result::Result<T, MusterError>;

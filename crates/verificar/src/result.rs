//! Result and error types for Verificar.

use thiserror::Error;

/// Result type for Verificar operations
pub type VerificarResult<T> = Result<T, VerificarError>;

/// Errors that can occur in Verificar
#[derive(Debug, Error)]
pub enum VerificarError {
    /// Predicate built from an empty text list
    #[error("Predicate requires at least one criterion")]
    EmptyCriteria,

    /// NOT combinator applied to more than one criterion
    #[error("NOT combines exactly one criterion, got {count}")]
    NegationArity {
        /// Number of criteria supplied
        count: usize,
    },

    /// A matches-mode pattern failed to compile
    #[error("Invalid match pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// Compiler error message
        message: String,
    },

    /// Bounded wait expired
    #[error("Condition not met within {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
